//! File I/O for documents.
//!
//! JSON and YAML files, optionally gzip-compressed, are loaded into `Value`
//! trees ready for path lookup and matching.

pub mod loader;

pub use loader::{load_file, load_from_reader, load_from_stdin, Format};
