//! Dotted-key parsing and resolution.
//!
//! A dotted key addresses a value inside nested objects and arrays:
//!
//! - `name` - a key of the top-level object
//! - `2.b.ii` - nested object keys
//! - `3.0` - an array index (negative indices count from the end)
//! - `4.1.shapes.1` - any mix of the above
//!
//! The separator is always `.` and cannot be escaped.
//!
//! # Examples
//!
//! ```
//! use deepquill::path::{resolve, PathError, Segment};
//! use deepquill::document::node::Value;
//! use serde_json::json;
//!
//! let tree = Value::from(json!({"a": [10, 20]}));
//! assert_eq!(resolve(&tree, "a.1").unwrap(), &Value::from(20));
//! assert_eq!(
//!     resolve(&tree, "a.5").unwrap_err(),
//!     PathError::IndexOutOfRange(Segment::new("5", "a"))
//! );
//! ```

pub mod error;
pub mod key;
pub mod resolver;

pub use error::PathError;
pub use key::{KeyPath, Segment, Segments, SEPARATOR};
pub use resolver::{resolve, resolve_node, Node};

/// Parses a dotted key, prepending `origin` when it is not empty.
pub fn parse(key: &str, origin: &str) -> KeyPath {
    KeyPath::parse(key, origin)
}
