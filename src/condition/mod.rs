//! Conditional encodings and parameters.
//!
//! A chain starts with [`when`], takes outcomes with [`When::then`], may add branches
//! with [`Then::when`], and ends with [`Then::otherwise`]. Every step takes `&self` and
//! returns a new value, so partial chains can be reused. A chain holds either a single
//! field-bearing condition or a list of value conditions; mixing the two is rejected with
//! [`VlError::Composition`](crate::foundation::error::VlError::Composition).
//!
//! ```
//! use vlencode::condition::{selection_point, value, when};
//!
//! let brush = selection_point().name("brush").build().unwrap();
//! let color = when(&brush).then("Origin:N").otherwise(value("lightgray")).unwrap();
//! assert_eq!(color.condition().unwrap()["param"], "brush");
//! assert_eq!(color.get("value").unwrap(), "lightgray");
//! ```

pub mod param;
pub mod predicate;
pub mod statement;
pub mod when;

pub use param::{
    ParamBuilder, ParamKind, Parameter, SelectionType, param, selection_interval,
    selection_point,
};
pub use predicate::{ParamRef, Predicate};
pub use statement::{SHORTHAND_KEYS, Statement, ValueDef, value};
pub use when::{ChainedWhen, Then, When, WhenArgs, condition, condition_with, when, when_with};
