//! Shorthand grammar: `field`, `field:T`, `agg(field):T`, `unit(field):T`, `count()`.

pub mod descriptor;
pub mod parser;
pub mod vocab;

pub use descriptor::{FieldDescriptor, FieldType};
pub use parser::{ShorthandOpts, ShorthandParser, parse_shorthand, parse_shorthand_with_data};
