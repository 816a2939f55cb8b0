use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::expression::Expr;
use crate::expression::ast::is_identifier;
use crate::foundation::error::{VlError, VlResult};
use crate::foundation::naming::NameCounter;

/// Whether a parameter holds a scalar or an interactive selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Scalar value, referenced by name inside expressions.
    Variable,
    /// Interactive selection, referenced as `{"param": name}`.
    Selection,
}

/// Interaction style of a selection parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionType {
    /// Discrete clicked points.
    Point,
    /// Continuous brushed range.
    Interval,
}

impl SelectionType {
    fn as_str(self) -> &'static str {
        match self {
            SelectionType::Point => "point",
            SelectionType::Interval => "interval",
        }
    }
}

/// A named parameter definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    name: String,
    kind: ParamKind,
    value: Option<Value>,
    expr: Option<Expr>,
    bind: Option<Value>,
    select: Option<SelectionType>,
    fields: Vec<String>,
    encodings: Vec<String>,
    empty: Option<bool>,
}

impl Parameter {
    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable or selection.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Whether the parameter is a selection.
    pub fn is_selection(&self) -> bool {
        self.kind == ParamKind::Selection
    }

    /// Defining expression of a variable parameter.
    pub fn definition_expr(&self) -> Option<&Expr> {
        self.expr.as_ref()
    }

    /// Default `empty` behavior used when the parameter appears in a condition.
    pub fn empty(&self) -> Option<bool> {
        self.empty
    }

    /// Reference to the parameter inside an expression tree.
    pub fn expr(&self) -> Expr {
        Expr::param(self.name.clone())
    }

    /// JSON used to reference the parameter from a property: `{"param": name}` for
    /// selections, `{"expr": name}` for variables.
    pub fn reference(&self) -> Value {
        match self.kind {
            ParamKind::Selection => json!({ "param": self.name }),
            ParamKind::Variable => json!({ "expr": self.name }),
        }
    }

    /// Top-level `params` entry.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.name.clone()));
        if let Some(value) = &self.value {
            out.insert("value".into(), value.clone());
        }
        if let Some(expr) = &self.expr {
            out.insert("expr".into(), Value::String(expr.render()));
        }
        if let Some(bind) = &self.bind {
            out.insert("bind".into(), bind.clone());
        }
        if let Some(select) = self.select {
            let mut sel = Map::new();
            sel.insert("type".into(), Value::String(select.as_str().to_owned()));
            if !self.fields.is_empty() {
                sel.insert("fields".into(), json!(self.fields));
            }
            if !self.encodings.is_empty() {
                sel.insert("encodings".into(), json!(self.encodings));
            }
            out.insert("select".into(), Value::Object(sel));
        }
        Value::Object(out)
    }
}

/// Builder for [`Parameter`]. Parameters without an explicit name get `param_<n>`.
#[derive(Clone, Debug, Default)]
pub struct ParamBuilder {
    name: Option<String>,
    value: Option<Value>,
    expr: Option<Expr>,
    bind: Option<Value>,
    select: Option<SelectionType>,
    fields: Vec<String>,
    encodings: Vec<String>,
    empty: Option<bool>,
}

/// Start a parameter definition.
pub fn param() -> ParamBuilder {
    ParamBuilder::new()
}

/// Start a point selection parameter.
pub fn selection_point() -> ParamBuilder {
    ParamBuilder::new().point()
}

/// Start an interval selection parameter.
pub fn selection_interval() -> ParamBuilder {
    ParamBuilder::new().interval()
}

impl ParamBuilder {
    /// Anonymous variable parameter with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicit name; must be a valid identifier.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Initial value.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Expression defining a variable parameter.
    pub fn expr(mut self, expr: impl Into<Expr>) -> Self {
        self.expr = Some(expr.into());
        self
    }

    /// Input binding, emitted as given.
    pub fn bind(mut self, bind: Value) -> Self {
        self.bind = Some(bind);
        self
    }

    /// Make this a point selection.
    pub fn point(mut self) -> Self {
        self.select = Some(SelectionType::Point);
        self
    }

    /// Make this an interval selection.
    pub fn interval(mut self) -> Self {
        self.select = Some(SelectionType::Interval);
        self
    }

    /// Data fields the selection projects over.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Encoding channels the selection projects over.
    pub fn encodings<I, S>(mut self, encodings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encodings.extend(encodings.into_iter().map(Into::into));
        self
    }

    /// Whether an empty selection matches all data.
    pub fn empty(mut self, empty: bool) -> Self {
        self.empty = Some(empty);
        self
    }

    /// Build, naming anonymous parameters from the process-wide counter.
    pub fn build(self) -> VlResult<Parameter> {
        self.build_with(NameCounter::global())
    }

    /// Build, naming anonymous parameters from `counter`.
    pub fn build_with(self, counter: &NameCounter) -> VlResult<Parameter> {
        let kind = if self.select.is_some() {
            ParamKind::Selection
        } else {
            ParamKind::Variable
        };
        match kind {
            ParamKind::Selection if self.expr.is_some() => {
                return Err(VlError::argument(
                    "`expr` applies to variable parameters, not selections",
                ));
            }
            ParamKind::Variable if !self.fields.is_empty() || !self.encodings.is_empty() => {
                return Err(VlError::argument(
                    "`fields` and `encodings` apply to selection parameters",
                ));
            }
            ParamKind::Variable if self.empty.is_some() => {
                return Err(VlError::argument("`empty` applies to selection parameters"));
            }
            _ => {}
        }

        let name = match self.name {
            Some(name) if is_identifier(&name) => name,
            Some(name) => {
                return Err(VlError::argument(format!(
                    "parameter name '{name}' is not a valid identifier"
                )));
            }
            None => counter.next_name("param"),
        };

        Ok(Parameter {
            name,
            kind,
            value: self.value,
            expr: self.expr,
            bind: self.bind,
            select: self.select,
            fields: self.fields,
            encodings: self.encodings,
            empty: self.empty,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/condition/param.rs"]
mod tests;
