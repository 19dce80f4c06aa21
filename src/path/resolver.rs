//! Walks a `Value` tree one segment at a time.

use super::error::PathError;
use super::key::{KeyPath, Segment};
use crate::document::node::Value;
use indexmap::IndexMap;
use log::trace;

/// A borrowed position in a tree, split by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Object(&'a IndexMap<String, Value>),
    Array(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> Node<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(entries) => Node::Object(entries),
            Value::Array(items) => Node::Array(items),
            other => Node::Scalar(other),
        }
    }
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        Node::of(value)
    }
}

/// Resolves a dotted key against a tree.
///
/// # Example
///
/// ```
/// use deepquill::path::resolve;
/// use deepquill::document::node::Value;
/// use serde_json::json;
///
/// let tree = Value::from(json!({"a": {"b": {"c": 1}}}));
/// assert_eq!(resolve(&tree, "a.b.c").unwrap(), &Value::from(1));
/// ```
///
/// # Errors
///
/// Returns the `PathError` for the first segment that cannot be followed.
pub fn resolve<'a>(tree: &'a Value, key: &str) -> Result<&'a Value, PathError> {
    let path = KeyPath::new(key);
    let mut current = tree;
    for segment in &path {
        current = step(Node::of(current), segment)?;
    }
    Ok(current)
}

/// Resolves a dotted key starting from an already-split node.
///
/// This is what the views use, since they hold a map or a slice rather than
/// a whole `Value`.
pub fn resolve_node<'a>(start: Node<'a>, key: &str) -> Result<Node<'a>, PathError> {
    let path = KeyPath::new(key);
    let mut current = start;
    for segment in &path {
        current = Node::of(step(current, segment)?);
    }
    Ok(current)
}

fn step<'a>(node: Node<'a>, segment: Segment) -> Result<&'a Value, PathError> {
    trace!("resolving segment '{}'", segment.qualified());
    match node {
        Node::Object(entries) => match entries.get(segment.part()) {
            Some(value) => Ok(value),
            None => Err(PathError::KeyNotFound(segment)),
        },
        Node::Array(items) => match index_into(items, segment.part()) {
            Some(value) => Ok(value),
            None => Err(PathError::IndexOutOfRange(segment)),
        },
        Node::Scalar(_) => Err(PathError::CannotDescend(segment)),
    }
}

/// Parses `part` as a signed index; negative values count from the end.
pub(crate) fn index_into<'a>(items: &'a [Value], part: &str) -> Option<&'a Value> {
    let idx: isize = part.parse().ok()?;
    normalize_index(items.len(), idx).map(|i| &items[i])
}

pub(crate) fn normalize_index(len: usize, idx: isize) -> Option<usize> {
    let len = len as isize;
    let normalized = if idx < 0 { len + idx } else { idx };
    if normalized >= 0 && normalized < len {
        Some(normalized as usize)
    } else {
        None
    }
}
