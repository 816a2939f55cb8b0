//! Vega-Lite encoding core.
//!
//! Parses field shorthands such as `"sum(profit):Q"`, infers encoding types from data,
//! builds expression trees for the Vega expression language, composes conditional
//! encodings with `when`/`then`/`otherwise`, and assembles validated `encoding` objects.
//!
//! ```
//! use vlencode::{EncodingBuilder, datum, value, when};
//!
//! let color = when(datum("profit").lt(0))
//!     .then(value("firebrick"))
//!     .otherwise(value("steelblue"))
//!     .unwrap();
//! let enc = EncodingBuilder::new()
//!     .mark("bar")
//!     .channel("x", "sum(profit):Q").unwrap()
//!     .channel("y", "region:N").unwrap()
//!     .channel("color", color).unwrap()
//!     .build()
//!     .unwrap();
//! assert_eq!(enc.get("x").unwrap()["aggregate"], "sum");
//! ```
#![forbid(unsafe_code)]

pub mod channel;
pub mod condition;
pub mod data;
pub mod expression;
pub mod foundation;
pub mod schema;
pub mod shorthand;

pub use channel::{ChannelDef, ChannelSpec, Encoding, EncodingBuilder};
pub use condition::{
    ParamBuilder, Parameter, Predicate, Statement, ValueDef, WhenArgs, condition, param,
    selection_interval, selection_point, value, when, when_with,
};
pub use data::{Column, DType, Dataset, Table, infer_type};
pub use expression::{Expr, datum, function, parse_expr};
pub use foundation::error::{VlError, VlResult};
pub use foundation::naming::NameCounter;
pub use schema::{SchemaErrors, SchemaValidator, SubsetValidator, validate_encoding};
pub use shorthand::{
    FieldDescriptor, FieldType, ShorthandOpts, parse_shorthand, parse_shorthand_with_data,
};
