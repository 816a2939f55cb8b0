//! Crate-wide building blocks: the error taxonomy and the anonymous-name counter.

pub mod error;
pub mod naming;
