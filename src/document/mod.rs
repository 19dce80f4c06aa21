//! Tree model for documents that paths and specs are evaluated against.
//!
//! - [`node`] defines the `Value` tree node
//! - [`parser`] converts JSON and YAML into `Value` trees

pub mod node;
pub mod parser;

pub use node::{Number, Value};
