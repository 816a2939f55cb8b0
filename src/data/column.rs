use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::error::{VlError, VlResult, json_kind};

/// Storage type of a column, as reported by the data-loading side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DType {
    /// Integers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Booleans.
    Boolean,
    /// Free-form strings.
    String,
    /// Calendar dates.
    Date,
    /// Date and time.
    Datetime,
    /// Time of day.
    Time,
    /// Time spans.
    Duration,
    /// Categories, optionally with a meaningful order.
    Categorical {
        /// Whether `categories` is ordered.
        ordered: bool,
        /// Category values, in order.
        categories: Vec<Value>,
    },
    /// Mixed or unknown content.
    Object,
}

impl DType {
    /// Integer or float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Integer | DType::Float)
    }

    /// Date, datetime, time or duration.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            DType::Date | DType::Datetime | DType::Time | DType::Duration
        )
    }

    /// Derive a dtype from JSON values, ignoring nulls.
    ///
    /// Integers mixed with floats widen to [`DType::Float`]; any other mix, or a column
    /// without non-null values, is [`DType::Object`].
    pub fn of_values(values: &[Value]) -> DType {
        let mut seen: Option<DType> = None;
        for v in values.iter().filter(|v| !v.is_null()) {
            let kind = match v {
                Value::Bool(_) => DType::Boolean,
                Value::Number(n) if n.is_i64() || n.is_u64() => DType::Integer,
                Value::Number(_) => DType::Float,
                Value::String(_) => DType::String,
                _ => return DType::Object,
            };
            seen = Some(match seen {
                None => kind,
                Some(DType::Integer) if kind == DType::Float => DType::Float,
                Some(DType::Float) if kind == DType::Integer => DType::Float,
                Some(prev) if prev == kind => prev,
                Some(_) => return DType::Object,
            });
        }
        seen.unwrap_or(DType::Object)
    }
}

/// A named, materialized column of values.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    dtype: DType,
    values: Vec<Value>,
}

impl Column {
    /// Column with an explicit dtype.
    pub fn new(name: impl Into<String>, dtype: DType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Column whose dtype is derived from the values.
    pub fn from_values(name: impl Into<String>, values: Vec<Value>) -> Self {
        let dtype = DType::of_values(&values);
        Self::new(name, dtype, values)
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column dtype.
    pub fn dtype(&self) -> &DType {
        &self.dtype
    }

    /// Raw values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-null values.
    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_null()).count()
    }
}

/// Column lookup used for type inference.
pub trait Dataset {
    /// Column named `name`, if present.
    fn column(&self, name: &str) -> Option<&Column>;

    /// Whether a column named `name` exists.
    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }
}

/// In-memory table of columns, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.insert(column);
        self
    }

    /// Add or replace a column in place.
    pub fn insert(&mut self, column: Column) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(slot) => *slot = column,
            None => self.columns.push(column),
        }
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Build from row records (`[{"a": 1, "b": "x"}, ...]`).
    ///
    /// A key missing from a record reads as null in that row.
    pub fn from_records(records: &[Value]) -> VlResult<Self> {
        let mut names: Vec<&str> = Vec::new();
        for (i, record) in records.iter().enumerate() {
            let obj = record.as_object().ok_or_else(|| {
                VlError::type_error(format!(
                    "record {i}: expected an object, got {}",
                    json_kind(record)
                ))
            })?;
            for key in obj.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key);
                }
            }
        }

        let mut table = Table::new();
        for name in names {
            let values = records
                .iter()
                .map(|r| r.get(name).cloned().unwrap_or(Value::Null))
                .collect();
            table.insert(Column::from_values(name, values));
        }
        Ok(table)
    }

    /// Build from row records or from a column object (`{"a": [1, 2], "b": ["x", "y"]}`).
    pub fn from_json(value: &Value) -> VlResult<Self> {
        match value {
            Value::Array(records) => Self::from_records(records),
            Value::Object(cols) => {
                let mut table = Table::new();
                for (name, values) in cols {
                    let values = values.as_array().ok_or_else(|| {
                        VlError::type_error(format!(
                            "column '{name}': expected an array, got {}",
                            json_kind(values)
                        ))
                    })?;
                    table.insert(Column::from_values(name.as_str(), values.clone()));
                }
                Ok(table)
            }
            other => Err(VlError::type_error(format!(
                "expected records or a column object, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl Dataset for Table {
    fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/column.rs"]
mod tests;
