use super::{assert_match, log_failure, DeepAccess};
use crate::config::Config;
use crate::document::node::Value;
use crate::matcher::{ArrayMatcher, MatchError, Spec};
use crate::path::resolver::normalize_index;
use crate::path::Node;

/// A read-only view over an array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeepList<'a> {
    items: &'a [Value],
}

impl<'a> DeepList<'a> {
    pub fn new(items: &'a [Value]) -> Self {
        Self { items }
    }

    /// Views `value` as a list, or `None` if it is not an array.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::new(items)),
            _ => None,
        }
    }

    pub fn items(&self) -> &'a [Value] {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The raw element at `index`; negative indices count from the end.
    pub fn at(&self, index: isize) -> Option<&'a Value> {
        normalize_index(self.items.len(), index).map(|i| &self.items[i])
    }

    /// Raw elements in order.
    pub fn iter(&self) -> std::slice::Iter<'a, Value> {
        self.items.iter()
    }

    /// True when some element matches `item`, with the same coercions as
    /// the matcher.
    pub fn contains(&self, item: &Spec) -> bool {
        let spec = Spec::array([item.clone(), Spec::Any]);
        ArrayMatcher::new(self.items, &Config::default())
            .matches(&spec, "")
            .is_ok()
    }
}

impl<'a> IntoIterator for DeepList<'a> {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> DeepAccess<'a> for DeepList<'a> {
    fn node(&self) -> Node<'a> {
        Node::Array(self.items)
    }

    fn matches_with(&self, spec: &Spec, config: &Config) -> Result<(), MatchError> {
        log_failure(ArrayMatcher::new(self.items, config).matches(spec, ""))
    }
}

/// # Panics
///
/// Panics with the rendered [`MatchError`] when the spec does not match.
impl PartialEq<Spec> for DeepList<'_> {
    fn eq(&self, spec: &Spec) -> bool {
        assert_match(self.matches(spec))
    }
}

impl PartialEq<Value> for DeepList<'_> {
    fn eq(&self, other: &Value) -> bool {
        matches!(other, Value::Array(items) if items.as_slice() == self.items)
    }
}
