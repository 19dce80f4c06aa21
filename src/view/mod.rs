//! Read-only views with dotted-path access and spec matching.
//!
//! [`DeepMap`] wraps an object and [`DeepList`] wraps an array. Both implement
//! [`DeepAccess`]: lookups take dotted keys and return a [`Deep`], which wraps
//! nested containers back into views so chained access composes.
//!
//! # Example
//!
//! ```
//! use deepquill::view::{Deep, DeepAccess, DeepMap};
//! use deepquill::document::node::Value;
//! use deepquill::matcher::Spec;
//! use serde_json::json;
//!
//! let tree = Value::from(json!({"2": {"a": "A", "b": {"ii": "II"}}, "3": ["x", "y"]}));
//! let data = DeepMap::from_value(&tree).unwrap();
//!
//! assert_eq!(data.lookup("2.b.ii").unwrap(), Value::from("II"));
//! assert!(matches!(data.lookup("3").unwrap(), Deep::List(_)));
//! assert!(data.contains_path("3.1"));
//! assert!(!data.contains_path("3.2"));
//!
//! let nested = data.lookup("2").unwrap();
//! assert_eq!(nested.lookup("b.ii").unwrap(), Value::from("II"));
//!
//! assert!(data.matches(&Spec::open_object([("3", Spec::array([Spec::from("y"), Spec::Any]))])).is_ok());
//! ```

pub mod list;
pub mod map;

pub use list::DeepList;
pub use map::DeepMap;

use crate::config::Config;
use crate::document::node::Value;
use crate::matcher::{validate, MatchError, Spec};
use crate::path::{resolve_node, Node, PathError};
use log::debug;

/// Dotted lookup and structural matching, shared by both views.
pub trait DeepAccess<'a> {
    /// The wrapped node.
    fn node(&self) -> Node<'a>;

    /// Matches the wrapped node against `spec` with explicit coercion settings.
    fn matches_with(&self, spec: &Spec, config: &Config) -> Result<(), MatchError>;

    /// Resolves a dotted key, wrapping containers into views.
    fn lookup(&self, key: &str) -> Result<Deep<'a>, PathError> {
        resolve_node(self.node(), key).map(Deep::from)
    }

    /// Like [`lookup`](Self::lookup), but any path failure becomes `None`.
    fn get(&self, key: &str) -> Option<Deep<'a>> {
        self.lookup(key).ok()
    }

    /// Like [`lookup`](Self::lookup), but any path failure becomes `default`.
    fn get_or(&self, key: &str, default: Deep<'a>) -> Deep<'a> {
        self.lookup(key).unwrap_or(default)
    }

    /// True when `key` resolves.
    fn contains_path(&self, key: &str) -> bool {
        self.lookup(key).is_ok()
    }

    /// Matches the wrapped node against `spec` with the default configuration.
    fn matches(&self, spec: &Spec) -> Result<(), MatchError> {
        self.matches_with(spec, &Config::default())
    }
}

/// The result of a lookup: a nested view or a bare scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deep<'a> {
    Map(DeepMap<'a>),
    List(DeepList<'a>),
    Scalar(&'a Value),
}

impl<'a> Deep<'a> {
    /// Wraps any value: objects and arrays become views, scalars stay bare.
    pub fn wrap(value: &'a Value) -> Self {
        Deep::from(Node::of(value))
    }

    pub fn as_map(&self) -> Option<DeepMap<'a>> {
        match self {
            Deep::Map(map) => Some(*map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<DeepList<'a>> {
        match self {
            Deep::List(list) => Some(*list),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&'a Value> {
        match self {
            Deep::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Copies the viewed data out into an owned `Value`.
    pub fn to_value(&self) -> Value {
        match self {
            Deep::Map(map) => Value::Object(map.entries().clone()),
            Deep::List(list) => Value::Array(list.items().to_vec()),
            Deep::Scalar(value) => (*value).clone(),
        }
    }
}

impl<'a> From<Node<'a>> for Deep<'a> {
    fn from(node: Node<'a>) -> Self {
        match node {
            Node::Object(entries) => Deep::Map(DeepMap::new(entries)),
            Node::Array(items) => Deep::List(DeepList::new(items)),
            Node::Scalar(value) => Deep::Scalar(value),
        }
    }
}

impl<'a> DeepAccess<'a> for Deep<'a> {
    fn node(&self) -> Node<'a> {
        match self {
            Deep::Map(map) => map.node(),
            Deep::List(list) => list.node(),
            Deep::Scalar(value) => Node::Scalar(*value),
        }
    }

    fn matches_with(&self, spec: &Spec, config: &Config) -> Result<(), MatchError> {
        match self {
            Deep::Map(map) => map.matches_with(spec, config),
            Deep::List(list) => list.matches_with(spec, config),
            Deep::Scalar(value) => log_failure(validate(Some(*value), spec, "", config)),
        }
    }
}

impl PartialEq<Value> for Deep<'_> {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Deep::Map(map), Value::Object(entries)) => map.entries() == entries,
            (Deep::List(list), Value::Array(items)) => list.items() == items.as_slice(),
            (Deep::Scalar(value), other) => *value == other,
            _ => false,
        }
    }
}

/// Structural equality against a spec.
///
/// # Panics
///
/// Panics with the rendered [`MatchError`] when the spec does not match, so
/// that `assert!(view == spec)` reports where and why.
impl PartialEq<Spec> for Deep<'_> {
    fn eq(&self, spec: &Spec) -> bool {
        assert_match(self.matches(spec))
    }
}

pub(crate) fn log_failure(result: Result<(), MatchError>) -> Result<(), MatchError> {
    if let Err(err) = &result {
        debug!("match failed: {}", err);
    }
    result
}

pub(crate) fn assert_match(result: Result<(), MatchError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => panic!("{}", err),
    }
}
