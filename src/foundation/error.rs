/// Convenience result type used across the crate.
pub type VlResult<T> = Result<T, VlError>;

/// Top-level error taxonomy for encoding construction.
#[derive(thiserror::Error, Debug)]
pub enum VlError {
    /// Two outcomes of a condition chain cannot coexist.
    #[error("composition error: {0}")]
    Composition(String),

    /// A required argument was missing or malformed.
    #[error("argument error: {0}")]
    Argument(String),

    /// A value of an unsupported kind was passed in statement or predicate position.
    #[error("type error: {0}")]
    Type(String),

    /// Expression source text could not be parsed.
    #[error("expression error: {0}")]
    Expression(String),

    /// Invalid channel or encoding data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VlError {
    /// Build a [`VlError::Composition`] value.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition(msg.into())
    }

    /// Build a [`VlError::Argument`] value.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::Argument(msg.into())
    }

    /// Build a [`VlError::Type`] value.
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::Type(msg.into())
    }

    /// Build a [`VlError::Expression`] value.
    pub fn expression(msg: impl Into<String>) -> Self {
        Self::Expression(msg.into())
    }

    /// Build a [`VlError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VlError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

/// Name the JSON kind of a value, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
