use serde_json::{Map, Value};

use crate::channel::capability::{ChannelCapability, channel};
use crate::channel::def::ChannelDef;
use crate::condition::ValueDef;
use crate::data::{Dataset, infer_type};
use crate::foundation::error::{VlError, VlResult, json_kind};
use crate::schema::{SchemaErrors, SchemaValidator, validate_encoding};
use crate::shorthand::{FieldDescriptor, FieldType, ShorthandOpts, ShorthandParser};

/// What a channel is bound to.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelSpec {
    /// Shorthand string, parsed with the builder's options and data.
    Shorthand(String),
    /// Parsed field reference.
    Field(FieldDescriptor),
    /// Literal value.
    Value(ValueDef),
    /// Data-space constant.
    Datum(Value),
    /// Complete definition, e.g. from a condition chain.
    Def(ChannelDef),
    /// List of definitions, for `tooltip`, `detail` and `order`.
    Many(Vec<ChannelSpec>),
    /// Another spec plus extra properties.
    Extended(Box<ChannelSpec>, Map<String, Value>),
}

impl ChannelSpec {
    /// Attach an extra property such as `title` or `scale`.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> ChannelSpec {
        match self {
            ChannelSpec::Extended(base, mut extra) => {
                extra.insert(key.into(), value.into());
                ChannelSpec::Extended(base, extra)
            }
            other => {
                let mut extra = Map::new();
                extra.insert(key.into(), value.into());
                ChannelSpec::Extended(Box::new(other), extra)
            }
        }
    }
}

impl ChannelSpec {
    /// Read a spec from JSON: a shorthand string, a definition object (whose optional
    /// `shorthand` member is parsed like a string), or a list of those.
    pub fn from_json(value: &Value) -> VlResult<ChannelSpec> {
        match value {
            Value::String(s) => Ok(ChannelSpec::Shorthand(s.clone())),
            Value::Object(map) => match map.get("shorthand") {
                Some(Value::String(s)) => {
                    let mut extra = map.clone();
                    extra.remove("shorthand");
                    let base = ChannelSpec::Shorthand(s.clone());
                    Ok(if extra.is_empty() {
                        base
                    } else {
                        ChannelSpec::Extended(Box::new(base), extra)
                    })
                }
                Some(other) => Err(VlError::type_error(format!(
                    "`shorthand` must be a string, got {}",
                    json_kind(other)
                ))),
                None => Ok(ChannelSpec::Def(ChannelDef::from_map(map.clone()))),
            },
            Value::Array(items) => Ok(ChannelSpec::Many(
                items.iter().map(ChannelSpec::from_json).collect::<VlResult<_>>()?,
            )),
            other => Err(VlError::type_error(format!(
                "expected a shorthand string, definition object or list, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl From<&str> for ChannelSpec {
    fn from(s: &str) -> Self {
        ChannelSpec::Shorthand(s.to_owned())
    }
}

impl From<String> for ChannelSpec {
    fn from(s: String) -> Self {
        ChannelSpec::Shorthand(s)
    }
}

impl From<FieldDescriptor> for ChannelSpec {
    fn from(d: FieldDescriptor) -> Self {
        ChannelSpec::Field(d)
    }
}

impl From<ValueDef> for ChannelSpec {
    fn from(v: ValueDef) -> Self {
        ChannelSpec::Value(v)
    }
}

impl From<ChannelDef> for ChannelSpec {
    fn from(def: ChannelDef) -> Self {
        ChannelSpec::Def(def)
    }
}

impl From<crate::condition::Then> for ChannelSpec {
    fn from(then: crate::condition::Then) -> Self {
        ChannelSpec::Def(then.to_channel_def())
    }
}

impl From<Vec<ChannelSpec>> for ChannelSpec {
    fn from(items: Vec<ChannelSpec>) -> Self {
        ChannelSpec::Many(items)
    }
}

/// Assembles an `encoding` object, one channel at a time.
#[derive(Default)]
pub struct EncodingBuilder<'a> {
    data: Option<&'a dyn Dataset>,
    mark: Option<String>,
    opts: ShorthandOpts,
    channels: Vec<(&'static ChannelCapability, ChannelSpec)>,
}

impl<'a> EncodingBuilder<'a> {
    /// Builder with no channels, data or mark.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dataset used to infer missing field types.
    pub fn data(mut self, data: &'a dyn Dataset) -> Self {
        self.data = Some(data);
        self
    }

    /// Mark type, used to warn about channels the mark ignores.
    pub fn mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    /// Shorthand parsing options.
    pub fn opts(mut self, opts: ShorthandOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Bind `name` to `spec`. Unknown and repeated channels are rejected.
    pub fn channel(mut self, name: &str, spec: impl Into<ChannelSpec>) -> VlResult<Self> {
        let cap = channel(name)
            .ok_or_else(|| VlError::validation(format!("unknown encoding channel '{name}'")))?;
        if self.channels.iter().any(|(c, _)| c.name == cap.name) {
            return Err(VlError::validation(format!(
                "channel '{name}' is set more than once"
            )));
        }
        self.channels.push((cap, spec.into()));
        Ok(self)
    }

    /// Resolve every channel into a checked [`Encoding`].
    #[tracing::instrument(skip(self), fields(mark = ?self.mark, channels = self.channels.len()))]
    pub fn build(self) -> VlResult<Encoding> {
        let mut channels = Map::new();
        for (cap, spec) in &self.channels {
            if let Some(mark) = self.mark.as_deref()
                && !cap.applies_to(mark)
            {
                tracing::warn!(channel = cap.name, mark, "channel has no effect on this mark");
            }
            let value = match spec {
                ChannelSpec::Many(items) if cap.multi => Value::Array(
                    items
                        .iter()
                        .map(|item| self.resolve(cap, item).map(Value::Object))
                        .collect::<VlResult<Vec<_>>>()?,
                ),
                ChannelSpec::Many(_) => {
                    return Err(VlError::validation(format!(
                        "channel '{}' does not accept a list of definitions",
                        cap.name
                    )));
                }
                single => Value::Object(self.resolve(cap, single)?),
            };
            tracing::debug!(channel = cap.name, definition = %value, "channel resolved");
            channels.insert(cap.name.to_owned(), value);
        }
        Ok(Encoding {
            mark: self.mark,
            channels,
        })
    }

    fn resolve(&self, cap: &ChannelCapability, spec: &ChannelSpec) -> VlResult<Map<String, Value>> {
        let mut map = self.resolve_body(cap, spec)?;
        self.resolve_type(cap, &mut map);
        if let Some(Value::Object(cond)) = map.get_mut("condition") {
            self.resolve_type(cap, cond);
        }
        check_keys(cap, &map)?;
        Ok(map)
    }

    fn resolve_body(
        &self,
        cap: &ChannelCapability,
        spec: &ChannelSpec,
    ) -> VlResult<Map<String, Value>> {
        Ok(match spec {
            ChannelSpec::Shorthand(s) => {
                let mut parser = ShorthandParser::new().with_opts(self.opts);
                if let Some(data) = self.data {
                    parser = parser.with_data(data);
                }
                let mut map = parser.parse(s).to_map();
                if !cap.allows("sort") {
                    map.remove("sort");
                }
                map
            }
            ChannelSpec::Field(d) => d.to_map(),
            ChannelSpec::Value(v) => v.clone().into_map(),
            ChannelSpec::Datum(v) => {
                let mut map = Map::new();
                map.insert("datum".into(), v.clone());
                map
            }
            ChannelSpec::Def(def) => def.as_map().clone(),
            ChannelSpec::Many(_) => {
                return Err(VlError::validation(format!(
                    "channel '{}' cannot nest lists of definitions",
                    cap.name
                )));
            }
            ChannelSpec::Extended(base, extra) => {
                if matches!(**base, ChannelSpec::Many(_)) {
                    return Err(VlError::validation(format!(
                        "channel '{}': extra properties cannot be attached to a list",
                        cap.name
                    )));
                }
                let mut map = self.resolve_body(cap, base)?;
                if extra.contains_key("field") && map.contains_key("field") {
                    return Err(VlError::validation(format!(
                        "channel '{}': field is set both by the definition and by extra properties",
                        cap.name
                    )));
                }
                map.extend(extra.clone());
                map
            }
        })
    }

    /// Fill a missing `type`: data first, then aggregate or bin, then time unit, then
    /// the channel default.
    fn resolve_type(&self, cap: &ChannelCapability, map: &mut Map<String, Value>) {
        let field_bearing = map.contains_key("field") || map.contains_key("aggregate");
        if map.contains_key("type") || !field_bearing {
            return;
        }
        let column = match (self.data, map.get("field").and_then(Value::as_str)) {
            (Some(data), Some(field)) => data.column(&field.replace('\\', "")),
            _ => None,
        };
        let resolved = if let Some(column) = column {
            let inferred = infer_type(column);
            if let Some(sort) = inferred.sort
                && cap.allows("sort")
                && !map.contains_key("sort")
            {
                map.insert("sort".into(), Value::Array(sort));
            }
            Some(inferred.field_type)
        } else if map.contains_key("aggregate") || is_binned(map.get("bin")) {
            Some(FieldType::Quantitative)
        } else if map.contains_key("timeUnit") {
            Some(FieldType::Temporal)
        } else {
            cap.default_type
        };
        if let Some(ty) = resolved {
            map.insert("type".into(), Value::String(ty.as_str().to_owned()));
        }
    }
}

fn is_binned(bin: Option<&Value>) -> bool {
    !matches!(bin, None | Some(Value::Null) | Some(Value::Bool(false)))
}

fn check_keys(cap: &ChannelCapability, map: &Map<String, Value>) -> VlResult<()> {
    if let Some(key) = map.keys().find(|k| !cap.allows(k)) {
        return Err(VlError::validation(format!(
            "property '{key}' is not valid for channel '{}'",
            cap.name
        )));
    }
    if map.contains_key("field") && map.contains_key("value") {
        return Err(VlError::validation(format!(
            "channel '{}': `field` and `value` cannot both be set",
            cap.name
        )));
    }
    Ok(())
}

/// A built `encoding` object.
#[derive(Clone, Debug, PartialEq)]
pub struct Encoding {
    mark: Option<String>,
    channels: Map<String, Value>,
}

impl Encoding {
    /// Definition of one channel.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.channels.get(name)
    }

    /// Names of the bound channels.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// The `encoding` object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.channels.clone())
    }

    /// Unit spec fragment `{"mark": ..., "encoding": ...}`.
    pub fn to_spec_json(&self) -> Value {
        let mut out = Map::new();
        if let Some(mark) = &self.mark {
            out.insert("mark".into(), Value::String(mark.clone()));
        }
        out.insert("encoding".into(), self.to_json());
        Value::Object(out)
    }

    /// Check the encoding's structural invariants.
    pub fn validate(&self) -> Result<(), SchemaErrors> {
        validate_encoding(&self.to_spec_json())
    }

    /// Validate the unit spec fragment against `schema`.
    pub fn validate_with(
        &self,
        validator: &dyn SchemaValidator,
        schema: &Value,
    ) -> Result<(), SchemaErrors> {
        validator.validate(&self.to_spec_json(), schema)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/channel/builder.rs"]
mod tests;
