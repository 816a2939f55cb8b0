//! Operator overloads and explicit builder methods. Every operator builds a node.

use std::ops::{Add, BitAnd, BitOr, Div, Mul, Neg, Not, Rem, Sub};

use crate::expression::ast::{BinaryOp, Expr, UnaryOp};

macro_rules! scalar_lhs {
    ($trait:ident :: $method:ident => $op:expr; $($t:ty),*) => {$(
        impl $trait<Expr> for $t {
            type Output = Expr;
            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<&Expr> for $t {
            type Output = Expr;
            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self, rhs.clone())
            }
        }
    )*};
}

macro_rules! binary_ops {
    ($($trait:ident :: $method:ident => $op:expr),* $(,)?) => {$(
        impl<R: Into<Expr>> $trait<R> for Expr {
            type Output = Expr;
            fn $method(self, rhs: R) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl<R: Into<Expr>> $trait<R> for &Expr {
            type Output = Expr;
            fn $method(self, rhs: R) -> Expr {
                Expr::binary($op, self.clone(), rhs)
            }
        }

        scalar_lhs!($trait :: $method => $op; i32, i64, f64);
    )*};
}

binary_ops! {
    Add::add => BinaryOp::Add,
    Sub::sub => BinaryOp::Sub,
    Mul::mul => BinaryOp::Mul,
    Div::div => BinaryOp::Div,
    Rem::rem => BinaryOp::Mod,
    BitAnd::bitand => BinaryOp::And,
    BitOr::bitor => BinaryOp::Or,
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::unary(UnaryOp::Neg, self.clone())
    }
}

impl Not for Expr {
    type Output = Expr;
    fn not(self) -> Expr {
        Expr::unary(UnaryOp::Not, self)
    }
}

impl Not for &Expr {
    type Output = Expr;
    fn not(self) -> Expr {
        Expr::unary(UnaryOp::Not, self.clone())
    }
}

/// Comparisons and the operators Rust cannot overload to return a node.
///
/// `==` on two [`Expr`] values compares trees structurally; use [`Expr::equals`] to build
/// an equality node.
impl Expr {
    /// `(self == rhs)`
    pub fn equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Eq, self, rhs)
    }

    /// `(self != rhs)`
    pub fn not_equals(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Ne, self, rhs)
    }

    /// `(self < rhs)`
    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Lt, self, rhs)
    }

    /// `(self <= rhs)`
    pub fn le(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Le, self, rhs)
    }

    /// `(self > rhs)`
    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Gt, self, rhs)
    }

    /// `(self >= rhs)`
    pub fn ge(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Ge, self, rhs)
    }

    /// `(self && rhs)`
    pub fn and(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::And, self, rhs)
    }

    /// `(self || rhs)`
    pub fn or(self, rhs: impl Into<Expr>) -> Expr {
        Expr::binary(BinaryOp::Or, self, rhs)
    }

    /// `pow(self,rhs)`
    pub fn pow(self, rhs: impl Into<Expr>) -> Expr {
        Expr::call("pow", [self, rhs.into()])
    }

    /// `abs(self)`
    pub fn abs(self) -> Expr {
        Expr::call("abs", [self])
    }

    /// `(+self)`
    pub fn pos(self) -> Expr {
        Expr::unary(UnaryOp::Pos, self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/ops.rs"]
mod tests;
