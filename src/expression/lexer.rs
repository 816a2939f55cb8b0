use crate::expression::error::ExprError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    True,
    False,
    Null,

    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    Bang,

    EqEq,
    Ne,
    EqEqEq,
    NeEq,
    Lt,
    Le,
    Gt,
    Ge,

    AndAnd,
    OrOr,

    Question,
    Colon,

    Eof,
}

/// Punctuation and operators, longest first so `===` wins over `==`.
const OPERATORS: &[(&str, TokenKind)] = &[
    ("===", TokenKind::EqEqEq),
    ("!==", TokenKind::NeEq),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::Ne),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("!", TokenKind::Bang),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("?", TokenKind::Question),
    (":", TokenKind::Colon),
];

fn token(kind: TokenKind, start: usize, end: usize) -> Token {
    Token {
        kind,
        span: Span { start, end },
    }
}

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;

        // Number: [0-9]+(.[0-9]+)?([eE][+-]?[0-9]+)? or .[0-9]+([eE][+-]?[0-9]+)?
        if c.is_ascii_digit()
            || (c == '.' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit())
        {
            let mut is_float = c == '.';
            if c == '.' {
                i += 1;
            } else {
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                    is_float = true;
                    i += 1;
                }
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }

            if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
                let e_pos = i;
                is_float = true;
                i += 1;
                if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
                    i += 1;
                }
                let exp_start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if exp_start == i {
                    return Err(ExprError::new(
                        e_pos,
                        "invalid number exponent (expected digits)",
                    ));
                }
            }

            let s = &input[start..i];
            let kind = match (is_float, s.parse::<i64>()) {
                (false, Ok(v)) => TokenKind::Int(v),
                _ => TokenKind::Float(
                    s.parse()
                        .map_err(|_| ExprError::new(start, "invalid number"))?,
                ),
            };
            out.push(token(kind, start, i));
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' || c == '$' {
            i += 1;
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'_' | b'$'))
            {
                i += 1;
            }
            let s = &input[start..i];
            let kind = match s {
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                "null" => TokenKind::Null,
                _ => TokenKind::Ident(s.to_owned()),
            };
            out.push(token(kind, start, i));
            continue;
        }

        if c == '\'' || c == '"' {
            let (text, end) = lex_string(input, start, c)?;
            i = end;
            out.push(token(TokenKind::Str(text), start, end));
            continue;
        }

        match OPERATORS
            .iter()
            .find(|(text, _)| bytes[i..].starts_with(text.as_bytes()))
        {
            Some((text, kind)) => {
                i += text.len();
                out.push(token(kind.clone(), start, i));
            }
            None => {
                let ch = input[start..].chars().next().unwrap_or(c);
                return Err(ExprError::new(
                    start,
                    format!("unexpected character '{ch}'"),
                ));
            }
        }
    }

    out.push(token(TokenKind::Eof, input.len(), input.len()));

    Ok(out)
}

/// Lex a quoted string starting at `start`; returns the unescaped text and the end offset.
fn lex_string(input: &str, start: usize, quote: char) -> Result<(String, usize), ExprError> {
    let mut text = String::new();
    let mut chars = input[start + 1..].char_indices();
    while let Some((off, ch)) = chars.next() {
        let pos = start + 1 + off;
        match ch {
            c if c == quote => return Ok((text, pos + 1)),
            '\\' => {
                let Some((_, esc)) = chars.next() else {
                    break;
                };
                match esc {
                    'n' => text.push('\n'),
                    'r' => text.push('\r'),
                    't' => text.push('\t'),
                    'u' => {
                        let hex: String = chars.by_ref().take(4).map(|(_, h)| h).collect();
                        let decoded = u32::from_str_radix(&hex, 16)
                            .ok()
                            .filter(|_| hex.len() == 4)
                            .and_then(char::from_u32)
                            .ok_or_else(|| ExprError::new(pos, "invalid \\u escape"))?;
                        text.push(decoded);
                    }
                    other => text.push(other),
                }
            }
            c => text.push(c),
        }
    }
    Err(ExprError::new(start, "unterminated string literal"))
}
