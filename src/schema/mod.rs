//! Validation of generated JSON.
//!
//! Full schema validation is delegated to an implementation of [`SchemaValidator`];
//! [`SubsetValidator`] covers the handful of keywords the encoding schemas in this crate
//! need. [`validate_encoding`] checks encoding-specific invariants without a schema.

use serde_json::Value;

pub mod encoding;
pub mod error;
pub mod subset;

pub use encoding::validate_encoding;
pub use error::{SchemaError, SchemaErrors, SchemaPathElem};
pub use subset::SubsetValidator;

/// Validates a JSON instance against a schema document.
pub trait SchemaValidator {
    /// Return every violation of `schema` found in `instance`.
    fn validate(&self, instance: &Value, schema: &Value) -> Result<(), SchemaErrors>;
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
