//! In-memory columns and encoding-type inference.

pub mod column;
pub mod infer;

pub use column::{Column, DType, Dataset, Table};
pub use infer::{TypeInference, infer_type, infer_type_of_values};
