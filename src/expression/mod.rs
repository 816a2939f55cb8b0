//! Expression trees for the Vega expression language.
//!
//! Trees are assembled from [`datum`], [`Expr`] constructors, the operator overloads in
//! [`ops`], and the [`catalog`] of named functions and constants. Rendering (via
//! `Display`) is fully parenthesized and depends only on the tree, so equal trees render
//! identically. [`parse_expr`] reads source text back into a tree.
//!
//! ```
//! use vlencode::expression::{datum, function};
//!
//! let e = (datum("x") + 1) * 2;
//! assert_eq!(e.to_string(), "((datum.x + 1) * 2)");
//!
//! let sqrt = function("sqrt").unwrap();
//! assert_eq!(sqrt.call([datum("area")]).to_string(), "sqrt(datum.area)");
//! ```

pub mod ast;
pub mod catalog;
pub mod error;
mod lexer;
pub mod ops;
pub mod parser;
mod render;

pub use ast::{BinaryOp, Expr, Literal, UnaryOp, datum};
pub use catalog::{CONSTANTS, Category, FunctionSpec, constant, function, functions};
pub use error::ExprError;
pub use parser::parse_expr;
