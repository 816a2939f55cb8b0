use serde::Serialize;
use serde_json::{Map, Value};

use crate::channel::def::ChannelDef;
use crate::foundation::error::{VlError, VlResult, json_kind};
use crate::shorthand::{FieldDescriptor, parse_shorthand};

/// Keys whose presence makes an outcome reference a data field.
pub const SHORTHAND_KEYS: &[&str] = &[
    "field", "aggregate", "type", "timeUnit", "bin", "sort", "scale", "axis", "legend",
];

/// A literal outcome: `{"value": v}` plus optional extra properties.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueDef(Map<String, Value>);

/// Literal outcome for a condition branch or fallback.
pub fn value(v: impl Into<Value>) -> ValueDef {
    let mut map = Map::new();
    map.insert("value".into(), v.into());
    ValueDef(map)
}

impl ValueDef {
    /// Return the definition with an extra property.
    pub fn with(mut self, key: impl Into<String>, v: impl Into<Value>) -> Self {
        self.0.insert(key.into(), v.into());
        self
    }

    /// The literal value.
    pub fn value(&self) -> Option<&Value> {
        self.0.get("value")
    }

    /// Take the underlying object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// The outcome of a condition branch, or a fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// Shorthand string, parsed into field keys.
    Shorthand(String),
    /// Already-parsed field reference.
    Field(FieldDescriptor),
    /// Literal value.
    Value(ValueDef),
    /// Arbitrary definition object.
    Object(Map<String, Value>),
    /// Complete channel definition.
    Channel(ChannelDef),
}

/// A classified statement.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) field_bearing: bool,
    pub(crate) body: Map<String, Value>,
}

impl Outcome {
    /// Shorthand keys of the body as compact JSON, for conflict messages.
    pub(crate) fn shorthand_label(&self) -> String {
        shorthand_label(&self.body)
    }
}

pub(crate) fn shorthand_label(body: &Map<String, Value>) -> String {
    let keys: Map<String, Value> = body
        .iter()
        .filter(|(k, _)| SHORTHAND_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Value::Object(keys).to_string()
}

fn has_shorthand_keys(map: &Map<String, Value>) -> bool {
    map.keys().any(|k| SHORTHAND_KEYS.contains(&k.as_str()))
}

impl Statement {
    /// Classify a JSON statement: strings are shorthand, objects are definitions.
    pub fn from_json(value: &Value) -> VlResult<Statement> {
        match value {
            Value::String(s) => Ok(Statement::Shorthand(s.clone())),
            Value::Object(map) => Ok(Statement::Object(map.clone())),
            other => Err(VlError::type_error(format!(
                "expected a statement (shorthand string or definition object), got {}; \
                 wrap literals with value()",
                json_kind(other)
            ))),
        }
    }

    /// Whether the statement references a data field.
    pub fn is_field_bearing(&self) -> bool {
        match self {
            Statement::Shorthand(_) | Statement::Field(_) => true,
            Statement::Value(_) => false,
            Statement::Object(map) => has_shorthand_keys(map),
            Statement::Channel(def) => def.is_field_bearing(),
        }
    }

    pub(crate) fn classify(self) -> Outcome {
        let field_bearing = self.is_field_bearing();
        let body = match self {
            Statement::Shorthand(s) => parse_shorthand(&s).to_map(),
            Statement::Field(d) => d.to_map(),
            Statement::Value(v) => v.into_map(),
            Statement::Object(map) => map,
            Statement::Channel(def) => def.into_map(),
        };
        Outcome {
            field_bearing,
            body,
        }
    }
}

impl From<&str> for Statement {
    fn from(s: &str) -> Self {
        Statement::Shorthand(s.to_owned())
    }
}

impl From<String> for Statement {
    fn from(s: String) -> Self {
        Statement::Shorthand(s)
    }
}

impl From<FieldDescriptor> for Statement {
    fn from(d: FieldDescriptor) -> Self {
        Statement::Field(d)
    }
}

impl From<ValueDef> for Statement {
    fn from(v: ValueDef) -> Self {
        Statement::Value(v)
    }
}

impl From<Map<String, Value>> for Statement {
    fn from(map: Map<String, Value>) -> Self {
        Statement::Object(map)
    }
}

impl From<ChannelDef> for Statement {
    fn from(def: ChannelDef) -> Self {
        Statement::Channel(def)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/condition/statement.rs"]
mod tests;
