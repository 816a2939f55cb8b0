use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shorthand::parser::parse_shorthand;
use crate::shorthand::vocab;

/// Semantic encoding type of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Continuous numeric data.
    Quantitative,
    /// Unordered categories.
    Nominal,
    /// Ordered categories.
    Ordinal,
    /// Dates and times.
    Temporal,
    /// Geographic shapes.
    Geojson,
}

impl FieldType {
    /// All types, in the order their codes are documented.
    pub const ALL: [FieldType; 5] = [
        FieldType::Quantitative,
        FieldType::Nominal,
        FieldType::Ordinal,
        FieldType::Temporal,
        FieldType::Geojson,
    ];

    /// Full lower-case name as it appears in the output.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Quantitative => "quantitative",
            FieldType::Nominal => "nominal",
            FieldType::Ordinal => "ordinal",
            FieldType::Temporal => "temporal",
            FieldType::Geojson => "geojson",
        }
    }

    /// Single-letter code used in shorthand suffixes.
    pub fn code(self) -> char {
        match self {
            FieldType::Quantitative => 'Q',
            FieldType::Nominal => 'N',
            FieldType::Ordinal => 'O',
            FieldType::Temporal => 'T',
            FieldType::Geojson => 'G',
        }
    }

    /// Resolve a full name or single-letter code, ignoring ASCII case.
    pub fn from_code(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let single = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c.to_ascii_uppercase()),
            _ => None,
        };
        Self::ALL
            .into_iter()
            .find(|t| single == Some(t.code()) || s.eq_ignore_ascii_case(t.as_str()))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            format!(
                "'{s}' is not one of the encoding types: {}",
                Self::ALL.map(FieldType::as_str).join(", ")
            )
        })
    }
}

/// Structured result of parsing a shorthand string.
///
/// Every attribute is optional; only determined keys are serialized.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Referenced data field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Aggregate operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<String>,
    /// Window operation (window-op parsing only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    /// Encoding type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Time unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,
    /// Explicit sort order, filled from ordered categorical data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Value>>,
}

impl FieldDescriptor {
    /// Descriptor referencing `field` with nothing else determined.
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::default()
        }
    }

    /// Set the aggregate.
    pub fn with_aggregate(mut self, aggregate: impl Into<String>) -> Self {
        self.aggregate = Some(aggregate.into());
        self
    }

    /// Set the encoding type.
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Set the time unit.
    pub fn with_time_unit(mut self, unit: impl Into<String>) -> Self {
        self.time_unit = Some(unit.into());
        self
    }

    /// True when no attribute is determined.
    pub fn is_empty(&self) -> bool {
        self.field.is_none()
            && self.aggregate.is_none()
            && self.op.is_none()
            && self.field_type.is_none()
            && self.time_unit.is_none()
            && self.sort.is_none()
    }

    /// Copy the determined keys into a JSON object.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut m = Map::new();
        if let Some(v) = &self.field {
            m.insert("field".to_owned(), Value::String(v.clone()));
        }
        if let Some(v) = &self.aggregate {
            m.insert("aggregate".to_owned(), Value::String(v.clone()));
        }
        if let Some(v) = &self.op {
            m.insert("op".to_owned(), Value::String(v.clone()));
        }
        if let Some(v) = self.field_type {
            m.insert("type".to_owned(), Value::String(v.as_str().to_owned()));
        }
        if let Some(v) = &self.time_unit {
            m.insert("timeUnit".to_owned(), Value::String(v.clone()));
        }
        if let Some(v) = &self.sort {
            m.insert("sort".to_owned(), Value::Array(v.clone()));
        }
        m
    }

    /// Canonical shorthand that parses back to this descriptor, if one exists.
    ///
    /// Returns `None` for descriptors the grammar cannot express: a sort order, a window
    /// op, both an aggregate and a time unit, names outside the recognized vocabularies,
    /// or field names that would themselves be read as a call or a type suffix.
    pub fn to_shorthand(&self) -> Option<String> {
        if self.sort.is_some() || self.op.is_some() {
            return None;
        }
        let body = match (&self.aggregate, &self.time_unit, &self.field) {
            (Some(_), Some(_), _) => return None,
            (Some(agg), None, None) if agg == "count" => "count()".to_owned(),
            (Some(agg), None, Some(field)) if vocab::is_aggregate(agg) && !field.is_empty() => {
                format!("{agg}({field})")
            }
            (None, Some(unit), Some(field)) if vocab::is_timeunit(unit) && !field.is_empty() => {
                format!("{unit}({field})")
            }
            (None, None, Some(field)) if !field.is_empty() => field.clone(),
            _ => return None,
        };
        let shorthand = match self.field_type {
            Some(t) => format!("{body}:{}", t.code()),
            None => body,
        };
        (parse_shorthand(&shorthand) == *self).then_some(shorthand)
    }
}
