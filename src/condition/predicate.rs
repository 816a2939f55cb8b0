use std::ops::{BitAnd, BitOr, Not};

use serde_json::{Map, Value, json};

use crate::condition::param::{ParamKind, Parameter};
use crate::expression::{Expr, parse_expr};
use crate::foundation::error::{VlError, VlResult, json_kind};

/// The parts of a [`Parameter`] a condition needs.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamRef {
    /// Parameter name.
    pub name: String,
    /// Variable or selection.
    pub kind: ParamKind,
    /// Default `empty` behavior.
    pub empty: Option<bool>,
    /// Defining expression of a variable parameter.
    pub expr: Option<Expr>,
}

impl From<&Parameter> for ParamRef {
    fn from(p: &Parameter) -> Self {
        Self {
            name: p.name().to_owned(),
            kind: p.kind(),
            empty: p.empty(),
            expr: p.definition_expr().cloned(),
        }
    }
}

/// Test deciding whether a condition branch applies.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    /// Expression tree, emitted as `{"test": "<rendered>"}`.
    Expr(Expr),
    /// Raw expression text.
    Test(String),
    /// Parameter reference.
    Param(ParamRef),
    /// Field predicate object such as `{"field": "x", "range": [0, 5]}`.
    Field(Map<String, Value>),
    /// All of.
    And(Vec<Predicate>),
    /// Any of.
    Or(Vec<Predicate>),
    /// Negation.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Parse expression text into an [`Predicate::Expr`], which unlike a raw
    /// [`Predicate::Test`] can be composed.
    pub fn parse_test(src: &str) -> VlResult<Predicate> {
        Ok(Predicate::Expr(parse_expr(src)?))
    }

    /// Classify a JSON predicate: strings are tests, objects are field predicates.
    pub fn from_json(value: &Value) -> VlResult<Predicate> {
        match value {
            Value::String(s) => Ok(Predicate::Test(s.clone())),
            Value::Object(map) => Ok(Predicate::Field(map.clone())),
            other => Err(VlError::type_error(format!(
                "expected a predicate (expression string or predicate object), got {}",
                json_kind(other)
            ))),
        }
    }

    /// Whether the predicate may take part in `&`, `|` and multi-predicate `when`.
    pub fn is_composable(&self) -> bool {
        !matches!(self, Predicate::Test(_) | Predicate::Field(_))
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Predicate::Expr(_) => "expression",
            Predicate::Test(_) => "string",
            Predicate::Param(_) => "parameter",
            Predicate::Field(_) => "field predicate",
            Predicate::And(_) | Predicate::Or(_) | Predicate::Not(_) => "logical composition",
        }
    }

    /// Expression form of expression-valued predicates: trees and variable parameters.
    fn as_expression(&self) -> Option<Expr> {
        match self {
            Predicate::Expr(e) => Some(e.clone()),
            Predicate::Param(p) if p.kind == ParamKind::Variable => {
                Some(Expr::param(p.name.clone()))
            }
            _ => None,
        }
    }

    /// Conjunction. Two expression-valued operands yield an expression.
    pub fn and(self, rhs: impl Into<Predicate>) -> Predicate {
        let rhs = rhs.into();
        if let (Some(l), Some(r)) = (self.as_expression(), rhs.as_expression()) {
            return Predicate::Expr(l & r);
        }
        let mut items = Vec::new();
        for p in [self, rhs] {
            match p {
                Predicate::And(inner) => items.extend(inner),
                other => items.push(other),
            }
        }
        Predicate::And(items)
    }

    /// Disjunction. Two expression-valued operands yield an expression.
    pub fn or(self, rhs: impl Into<Predicate>) -> Predicate {
        let rhs = rhs.into();
        if let (Some(l), Some(r)) = (self.as_expression(), rhs.as_expression()) {
            return Predicate::Expr(l | r);
        }
        let mut items = Vec::new();
        for p in [self, rhs] {
            match p {
                Predicate::Or(inner) => items.extend(inner),
                other => items.push(other),
            }
        }
        Predicate::Or(items)
    }

    /// Negation.
    pub fn negate(self) -> Predicate {
        match self.as_expression() {
            Some(e) => Predicate::Expr(!e),
            None => Predicate::Not(Box::new(self)),
        }
    }

    /// Condition object for this predicate. `empty` overrides a selection's default.
    pub fn to_condition(&self, empty: Option<bool>) -> Map<String, Value> {
        let mut out = Map::new();
        match self {
            Predicate::Param(p) => match (&p.kind, &p.expr) {
                (ParamKind::Variable, Some(expr)) => {
                    out.insert("test".into(), Value::String(expr.render()));
                }
                _ => {
                    out.insert("param".into(), Value::String(p.name.clone()));
                    if let Some(empty) = empty.or(p.empty) {
                        out.insert("empty".into(), Value::Bool(empty));
                    }
                }
            },
            Predicate::Expr(e) => {
                out.insert("test".into(), Value::String(e.render()));
            }
            Predicate::Test(s) => {
                out.insert("test".into(), Value::String(s.clone()));
            }
            Predicate::Field(map) => {
                out.insert("test".into(), Value::Object(map.clone()));
            }
            Predicate::And(_) | Predicate::Or(_) | Predicate::Not(_) => {
                out.insert("test".into(), self.composition_json());
            }
        }
        out
    }

    /// Logical-composition form used inside `{"test": ...}`.
    fn composition_json(&self) -> Value {
        if let Some(e) = self.as_expression() {
            return Value::String(e.render());
        }
        match self {
            Predicate::And(items) => {
                json!({ "and": items.iter().map(Predicate::composition_json).collect::<Vec<_>>() })
            }
            Predicate::Or(items) => {
                json!({ "or": items.iter().map(Predicate::composition_json).collect::<Vec<_>>() })
            }
            Predicate::Not(inner) => json!({ "not": inner.composition_json() }),
            Predicate::Param(p) => {
                let mut out = Map::new();
                out.insert("param".into(), Value::String(p.name.clone()));
                if let Some(empty) = p.empty {
                    out.insert("empty".into(), Value::Bool(empty));
                }
                Value::Object(out)
            }
            Predicate::Test(s) => Value::String(s.clone()),
            Predicate::Field(map) => Value::Object(map.clone()),
            Predicate::Expr(e) => Value::String(e.render()),
        }
    }
}

impl From<Expr> for Predicate {
    fn from(e: Expr) -> Self {
        Predicate::Expr(e)
    }
}

impl From<&Parameter> for Predicate {
    fn from(p: &Parameter) -> Self {
        Predicate::Param(p.into())
    }
}

impl From<Parameter> for Predicate {
    fn from(p: Parameter) -> Self {
        Predicate::Param((&p).into())
    }
}

impl From<&str> for Predicate {
    fn from(s: &str) -> Self {
        Predicate::Test(s.to_owned())
    }
}

impl From<String> for Predicate {
    fn from(s: String) -> Self {
        Predicate::Test(s)
    }
}

impl From<Map<String, Value>> for Predicate {
    fn from(map: Map<String, Value>) -> Self {
        Predicate::Field(map)
    }
}

impl<R: Into<Predicate>> BitAnd<R> for Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: R) -> Predicate {
        self.and(rhs)
    }
}

impl<R: Into<Predicate>> BitOr<R> for Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: R) -> Predicate {
        self.or(rhs)
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        self.negate()
    }
}

impl<R: Into<Predicate>> BitAnd<R> for &Parameter {
    type Output = Predicate;

    fn bitand(self, rhs: R) -> Predicate {
        Predicate::from(self).and(rhs)
    }
}

impl<R: Into<Predicate>> BitOr<R> for &Parameter {
    type Output = Predicate;

    fn bitor(self, rhs: R) -> Predicate {
        Predicate::from(self).or(rhs)
    }
}

impl Not for &Parameter {
    type Output = Predicate;

    fn not(self) -> Predicate {
        Predicate::from(self).negate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/condition/predicate.rs"]
mod tests;
