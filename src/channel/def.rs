use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::condition::statement::SHORTHAND_KEYS;

/// The JSON definition of one encoding channel: a field, value or datum definition,
/// optionally with a `condition`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelDef(Map<String, Value>);

impl ChannelDef {
    /// Empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Return the definition with `key` set.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `condition` entry, if any.
    pub fn condition(&self) -> Option<&Value> {
        self.0.get("condition")
    }

    /// Whether any top-level key references a data field.
    pub fn is_field_bearing(&self) -> bool {
        self.0.keys().any(|k| SHORTHAND_KEYS.contains(&k.as_str()))
    }

    /// Borrow the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// JSON value of the definition.
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for ChannelDef {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ChannelDef> for Value {
    fn from(def: ChannelDef) -> Self {
        Value::Object(def.0)
    }
}
