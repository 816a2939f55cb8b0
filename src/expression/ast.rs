use serde_json::Value;

/// Node of an expression in the Vega expression language.
///
/// Trees are built, never evaluated; [`std::fmt::Display`] renders the canonical
/// source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value.
    Lit(Literal),
    /// Named mathematical constant such as `PI`.
    Const(String),
    /// Root identifier such as `datum` or `event`.
    Var(String),
    /// Reference to a parameter by name.
    Param(String),
    /// `base.name`
    Attr {
        /// Object expression.
        base: Box<Expr>,
        /// Property name.
        name: String,
    },
    /// `base['key']`
    Item {
        /// Object expression.
        base: Box<Expr>,
        /// Property key.
        key: String,
    },
    /// `(op operand)`
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// `(left op right)`
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `name(arg,...)`. `None` marks an omitted optional argument.
    Call {
        /// Function name.
        name: String,
        /// Arguments; never ends with `None`.
        args: Vec<Option<Expr>>,
    },
}

/// Literal leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
}

impl Literal {
    /// Convert a JSON scalar. Arrays and objects have no literal form.
    pub fn from_json(value: &Value) -> Option<Literal> {
        match value {
            Value::Null => Some(Literal::Null),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Literal::Int)
                .or_else(|| n.as_f64().map(Literal::Float)),
            Value::String(s) => Some(Literal::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

impl UnaryOp {
    /// Source token.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
            UnaryOp::Not => "!",
        }
    }
}

/// Infix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    StrictEq,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Source token.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl Expr {
    /// Root identifier, e.g. `Expr::var("event")`.
    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    /// The `datum` root.
    pub fn datum() -> Expr {
        Expr::var("datum")
    }

    /// Parameter reference.
    pub fn param(name: impl Into<String>) -> Expr {
        Expr::Param(name.into())
    }

    /// `self.name`
    pub fn attr(self, name: impl Into<String>) -> Expr {
        Expr::Attr {
            base: Box::new(self),
            name: name.into(),
        }
    }

    /// `self['key']`
    pub fn item(self, key: impl Into<String>) -> Expr {
        Expr::Item {
            base: Box::new(self),
            key: key.into(),
        }
    }

    /// Unary node.
    pub fn unary(op: UnaryOp, operand: impl Into<Expr>) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand.into()),
        }
    }

    /// Binary node.
    pub fn binary(op: BinaryOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// Call with every argument supplied. The name is not checked against the catalog.
    pub fn call<I, A>(name: impl Into<String>, args: I) -> Expr
    where
        I: IntoIterator<Item = A>,
        A: Into<Expr>,
    {
        Expr::Call {
            name: name.into(),
            args: args.into_iter().map(|a| Some(a.into())).collect(),
        }
    }

    /// Call where `None` marks an omitted optional argument.
    ///
    /// Trailing omissions are dropped; omissions followed by a supplied argument are
    /// kept and render as `null`.
    pub fn call_optional<I>(name: impl Into<String>, args: I) -> Expr
    where
        I: IntoIterator<Item = Option<Expr>>,
    {
        let mut args: Vec<Option<Expr>> = args.into_iter().collect();
        while matches!(args.last(), Some(None)) {
            args.pop();
        }
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// Canonical source text. Same as `to_string()`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// `datum.name`, or `datum['name']` when `name` is not a plain identifier.
pub fn datum(name: &str) -> Expr {
    if is_identifier(name) {
        Expr::datum().attr(name)
    } else {
        Expr::datum().item(name)
    }
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl From<Literal> for Expr {
    fn from(v: Literal) -> Self {
        Expr::Lit(v)
    }
}

impl From<&Expr> for Expr {
    fn from(v: &Expr) -> Self {
        v.clone()
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        Expr::Lit(Literal::Bool(v))
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Expr::Lit(Literal::Int(v.into()))
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Lit(Literal::Int(v))
    }
}

impl From<u32> for Expr {
    fn from(v: u32) -> Self {
        Expr::Lit(Literal::Int(v.into()))
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Lit(Literal::Float(v))
    }
}

impl From<f32> for Expr {
    fn from(v: f32) -> Self {
        Expr::Lit(Literal::Float(v.into()))
    }
}

/// String literal, not a field reference. Use [`datum`] for fields.
impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Expr::Lit(Literal::Str(v.to_owned()))
    }
}

impl From<String> for Expr {
    fn from(v: String) -> Self {
        Expr::Lit(Literal::Str(v))
    }
}

impl<T: Into<Expr>> From<Option<T>> for Expr {
    fn from(v: Option<T>) -> Self {
        v.map_or(Expr::Lit(Literal::Null), Into::into)
    }
}
