//! deepquill - dotted-path access and structural matching for nested data.
//!
//! Trees loaded from JSON or YAML are addressed with dotted keys such as
//! `users.0.name`, and compared against spec trees that may contain
//! wildcards, regexes, and typed scalars (datetimes, UUIDs, decimals).
//!
//! # Example
//!
//! ```
//! use deepquill::{DeepAccess, DeepMap, Spec, Value};
//! use serde_json::json;
//!
//! let tree = Value::from(json!({
//!     "users": [{"name": "alice", "id": "2D2C131C-E2A2-4DEA-887A-A7A6678B71AA"}],
//!     "count": 1,
//! }));
//! let data = DeepMap::from_value(&tree).unwrap();
//!
//! assert_eq!(data.lookup("users.0.name").unwrap(), Value::from("alice"));
//!
//! let spec = Spec::open_object([(
//!     "users",
//!     Spec::array([
//!         Spec::Any,
//!         Spec::object([
//!             ("name", Spec::regex("^al").unwrap()),
//!             ("id", Spec::uuid("2d2c131c-e2a2-4dea-887a-a7a6678b71aa").unwrap()),
//!         ]),
//!     ]),
//! )]);
//! assert!(data.matches(&spec).is_ok());
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod matcher;
pub mod merger;
pub mod path;
pub mod view;

pub use config::Config;
pub use document::{Number, Value};
pub use error::ErrorKind;
pub use matcher::{matches, matches_with, MatchError, Spec};
pub use merger::DeepMerger;
pub use path::{resolve, KeyPath, PathError, Segment};
pub use view::{Deep, DeepAccess, DeepList, DeepMap};
