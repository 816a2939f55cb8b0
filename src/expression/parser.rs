use crate::expression::ast::{BinaryOp, Expr, Literal, UnaryOp};
use crate::expression::catalog;
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};
use crate::foundation::error::VlResult;

/// Parse expression source text into a tree.
///
/// Accepts the canonical rendering plus ordinary unparenthesized source with
/// JavaScript precedence. Identifiers naming a catalog constant become [`Expr::Const`];
/// other bare identifiers become [`Expr::Var`]. The ternary operator is not part of the
/// node model; write `if(test,a,b)` instead.
pub fn parse_expr(src: &str) -> VlResult<Expr> {
    Ok(parse(src)?)
}

pub(crate) fn parse(src: &str) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = p.parse_or()?;
    if p.peek().kind == TokenKind::Question {
        return Err(ExprError::new(
            p.span().start,
            "conditional operator is not supported; use if(test,a,b)",
        ));
    }
    p.expect(TokenKind::Eof)?;
    Ok(expr)
}

/// Nesting limit for parentheses, call arguments and prefix operators.
const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ExprError>,
    ) -> Result<T, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::new(
                self.span().start,
                "expression nested too deeply",
            ));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> Token {
        let t = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ExprError> {
        if self.peek().kind == kind {
            self.bump();
            Ok(())
        } else {
            Err(ExprError::new(
                self.span().start,
                format!("expected {kind:?}, found {:?}", self.peek().kind),
            ))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the first of `ops` that matches the next token.
    fn consume_op(&mut self, ops: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let op = ops
            .iter()
            .find(|(kind, _)| self.peek().kind == *kind)
            .map(|(_, op)| *op)?;
        self.bump();
        Some(op)
    }

    fn left_assoc(
        &mut self,
        ops: &[(TokenKind, BinaryOp)],
        next: fn(&mut Self) -> Result<Expr, ExprError>,
    ) -> Result<Expr, ExprError> {
        let mut e = next(self)?;
        while let Some(op) = self.consume_op(ops) {
            let r = next(self)?;
            e = Expr::binary(op, e, r);
        }
        Ok(e)
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        self.left_assoc(&[(TokenKind::OrOr, BinaryOp::Or)], Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        self.left_assoc(&[(TokenKind::AndAnd, BinaryOp::And)], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr, ExprError> {
        self.left_assoc(
            &[
                (TokenKind::EqEqEq, BinaryOp::StrictEq),
                (TokenKind::NeEq, BinaryOp::StrictNe),
                (TokenKind::EqEq, BinaryOp::Eq),
                (TokenKind::Ne, BinaryOp::Ne),
            ],
            Self::parse_comparison,
        )
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        self.left_assoc(
            &[
                (TokenKind::Lt, BinaryOp::Lt),
                (TokenKind::Le, BinaryOp::Le),
                (TokenKind::Gt, BinaryOp::Gt),
                (TokenKind::Ge, BinaryOp::Ge),
            ],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        self.left_assoc(
            &[
                (TokenKind::Plus, BinaryOp::Add),
                (TokenKind::Minus, BinaryOp::Sub),
            ],
            Self::parse_factor,
        )
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        self.left_assoc(
            &[
                (TokenKind::Star, BinaryOp::Mul),
                (TokenKind::Slash, BinaryOp::Div),
                (TokenKind::Percent, BinaryOp::Mod),
            ],
            Self::parse_unary,
        )
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        self.bump();
        let e = self.nested(Self::parse_unary)?;
        Ok(Expr::unary(op, e))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let mut e = self.parse_primary()?;

        loop {
            if self.consume(TokenKind::Dot) {
                let t = self.bump();
                match t.kind {
                    TokenKind::Ident(name) => e = e.attr(name),
                    other => {
                        return Err(ExprError::new(
                            t.span.start,
                            format!("expected property name after '.', found {other:?}"),
                        ));
                    }
                }
                continue;
            }

            if self.consume(TokenKind::LBracket) {
                let t = self.bump();
                let key = match t.kind {
                    TokenKind::Str(s) => s,
                    other => {
                        return Err(ExprError::new(
                            t.span.start,
                            format!("expected string key inside '[]', found {other:?}"),
                        ));
                    }
                };
                self.expect(TokenKind::RBracket)?;
                e = e.item(key);
                continue;
            }

            if self.peek().kind == TokenKind::LParen {
                let start = self.span().start;
                self.bump();
                let args = self.parse_args()?;
                let name = match e {
                    Expr::Var(name) => name,
                    _ => {
                        return Err(ExprError::new(
                            start,
                            "call target must be a function name",
                        ));
                    }
                };
                e = Expr::call(name, args);
                continue;
            }

            break;
        }

        Ok(e)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.nested(Self::parse_or)?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen)?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let t = self.bump();
        match t.kind {
            TokenKind::Int(v) => Ok(Expr::Lit(Literal::Int(v))),
            TokenKind::Float(v) => Ok(Expr::Lit(Literal::Float(v))),
            TokenKind::Str(s) => Ok(Expr::Lit(Literal::Str(s))),
            TokenKind::True => Ok(Expr::Lit(Literal::Bool(true))),
            TokenKind::False => Ok(Expr::Lit(Literal::Bool(false))),
            TokenKind::Null => Ok(Expr::Lit(Literal::Null)),
            TokenKind::Ident(s) => Ok(catalog::constant(&s).unwrap_or(Expr::Var(s))),
            TokenKind::LParen => {
                let e = self.nested(Self::parse_or)?;
                self.expect(TokenKind::RParen)?;
                Ok(e)
            }
            other => Err(ExprError::new(
                t.span.start,
                format!("unexpected token {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
