//! Strategies deciding how two values under the same key are combined.

use super::DeepMerger;
use crate::document::node::Value;
use indexmap::IndexMap;

type Object = IndexMap<String, Value>;

/// One way of combining a pair of values.
///
/// The merger asks each strategy in turn whether it [`applies`](Self::applies)
/// and uses the first that does.
pub trait Strategy: Send + Sync {
    /// Whether this strategy handles the pair. `a` is `Value::Null` when the
    /// key is absent from the left-hand tree.
    fn applies(&self, a: &Value, b: &Value) -> bool;

    /// Combines the pair. `merger` is the calling merger, for recursion.
    fn apply(&self, a: &Value, b: &Value, merger: &DeepMerger) -> Value;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Recursively merges two objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeObjects;

impl Strategy for MergeObjects {
    fn applies(&self, a: &Value, b: &Value) -> bool {
        a.is_object() && b.is_object()
    }

    fn apply(&self, a: &Value, b: &Value, merger: &DeepMerger) -> Value {
        match (a, b) {
            (Value::Object(a), Value::Object(b)) => Value::Object(merger.merge(a, b)),
            _ => b.clone(),
        }
    }
}

/// Concatenates two arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombineArrays;

impl Strategy for CombineArrays {
    fn applies(&self, a: &Value, b: &Value) -> bool {
        a.is_array() && b.is_array()
    }

    fn apply(&self, a: &Value, b: &Value, _merger: &DeepMerger) -> Value {
        match (a, b) {
            (Value::Array(a), Value::Array(b)) => {
                Value::Array(a.iter().chain(b.iter()).cloned().collect())
            }
            _ => b.clone(),
        }
    }
}

/// Merges two arrays of objects element by element. The shorter side is
/// padded with empty objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeArraysOfObjectsByPosition;

impl Strategy for MergeArraysOfObjectsByPosition {
    fn applies(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Array(a), Value::Array(b)) => a.iter().chain(b).all(Value::is_object),
            _ => false,
        }
    }

    fn apply(&self, a: &Value, b: &Value, merger: &DeepMerger) -> Value {
        let (Value::Array(a), Value::Array(b)) = (a, b) else {
            return b.clone();
        };

        let empty = Object::new();
        let len = a.len().max(b.len());
        let merged = (0..len)
            .map(|i| {
                let left = as_object(a.get(i)).unwrap_or(&empty);
                let right = as_object(b.get(i)).unwrap_or(&empty);
                Value::Object(merger.merge(left, right))
            })
            .collect();
        Value::Array(merged)
    }
}

type KeyFn = dyn Fn(usize, &Object) -> Value + Send + Sync;
type ConditionFn = dyn Fn(&Object) -> bool + Send + Sync;

/// Merges two arrays of objects by an identity key.
///
/// Objects from `b` whose key matches an object from `a` are merged into it;
/// the rest are appended. The order is that of first appearance.
///
/// # Example
///
/// ```
/// use deepquill::merger::{DeepMerger, MergeArraysOfObjectsByKey};
/// use deepquill::document::node::Value;
///
/// let by_id = MergeArraysOfObjectsByKey::new(|_, obj| obj["id"].clone())
///     .with_condition(|obj| obj.contains_key("id"));
/// let merger = DeepMerger::new(vec![Box::new(by_id)]);
/// # let _ = merger;
/// ```
pub struct MergeArraysOfObjectsByKey {
    key: Box<KeyFn>,
    condition: Box<ConditionFn>,
}

impl MergeArraysOfObjectsByKey {
    /// `key` receives each object's position in its own array and the object.
    pub fn new<F>(key: F) -> Self
    where
        F: Fn(usize, &Object) -> Value + Send + Sync + 'static,
    {
        Self {
            key: Box::new(key),
            condition: Box::new(|_| true),
        }
    }

    /// Restricts the strategy to arrays whose objects all satisfy `condition`.
    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&Object) -> bool + Send + Sync + 'static,
    {
        self.condition = Box::new(condition);
        self
    }
}

impl Strategy for MergeArraysOfObjectsByKey {
    fn applies(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Array(a), Value::Array(b)) => a
                .iter()
                .chain(b)
                .all(|item| matches!(item, Value::Object(obj) if (self.condition)(obj))),
            _ => false,
        }
    }

    fn apply(&self, a: &Value, b: &Value, merger: &DeepMerger) -> Value {
        let (Value::Array(a), Value::Array(b)) = (a, b) else {
            return b.clone();
        };

        // Keys are not hashable in general (floats), so lookups are linear.
        let mut keyed: Vec<(Value, Object)> = Vec::with_capacity(a.len() + b.len());
        for (idx, item) in a.iter().enumerate() {
            if let Value::Object(obj) = item {
                let key = (self.key)(idx, obj);
                match keyed.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = obj.clone(),
                    None => keyed.push((key, obj.clone())),
                }
            }
        }

        for (idx, item) in b.iter().enumerate() {
            if let Value::Object(obj) = item {
                let key = (self.key)(idx, obj);
                match keyed.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = merger.merge(&slot.1, obj),
                    None => keyed.push((key, obj.clone())),
                }
            }
        }

        Value::Array(keyed.into_iter().map(|(_, obj)| Value::Object(obj)).collect())
    }
}

fn as_object(value: Option<&Value>) -> Option<&Object> {
    match value {
        Some(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}
