use super::{assert_match, log_failure, Deep, DeepAccess};
use crate::config::Config;
use crate::document::node::Value;
use crate::matcher::{MatchError, ObjectMatcher, Spec};
use crate::path::Node;
use indexmap::IndexMap;

/// A read-only view over an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepMap<'a> {
    entries: &'a IndexMap<String, Value>,
}

impl<'a> DeepMap<'a> {
    pub fn new(entries: &'a IndexMap<String, Value>) -> Self {
        Self { entries }
    }

    /// Views `value` as a map, or `None` if it is not an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Object(entries) => Some(Self::new(entries)),
            _ => None,
        }
    }

    pub fn entries(&self) -> &'a IndexMap<String, Value> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries, with containers wrapped.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Deep<'a>)> + 'a {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), Deep::wrap(value)))
    }

    /// Top-level values, with containers wrapped.
    pub fn values(&self) -> impl Iterator<Item = Deep<'a>> + 'a {
        self.entries.values().map(Deep::wrap)
    }
}

impl<'a> DeepAccess<'a> for DeepMap<'a> {
    fn node(&self) -> Node<'a> {
        Node::Object(self.entries)
    }

    fn matches_with(&self, spec: &Spec, config: &Config) -> Result<(), MatchError> {
        log_failure(ObjectMatcher::new(self.entries, config).matches(spec, ""))
    }
}

/// # Panics
///
/// Panics with the rendered [`MatchError`] when the spec does not match.
impl PartialEq<Spec> for DeepMap<'_> {
    fn eq(&self, spec: &Spec) -> bool {
        assert_match(self.matches(spec))
    }
}

impl PartialEq<Value> for DeepMap<'_> {
    fn eq(&self, other: &Value) -> bool {
        matches!(other, Value::Object(entries) if entries == self.entries)
    }
}
