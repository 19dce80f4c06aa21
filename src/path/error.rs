//! Error types for dotted-key resolution.

use super::key::Segment;
use crate::error::ErrorKind;
use thiserror::Error;

/// Why a dotted key could not be resolved.
///
/// Every variant carries the segment at which traversal stopped, not the
/// whole key, so messages point at the failing hop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The current node is an object without this key.
    #[error("key not found: '{}'", .0.qualified())]
    KeyNotFound(Segment),
    /// The current node is an array and the segment is not a valid index into it.
    #[error("index out of range: '{}'", .0.qualified())]
    IndexOutOfRange(Segment),
    /// The current node is a scalar, so there is nothing to descend into.
    #[error("cannot descend into scalar at '{}'", .0.qualified())]
    CannotDescend(Segment),
}

impl PathError {
    /// The segment at which resolution stopped.
    pub fn segment(&self) -> &Segment {
        match self {
            PathError::KeyNotFound(segment)
            | PathError::IndexOutOfRange(segment)
            | PathError::CannotDescend(segment) => segment,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::KeyNotFound(_) => ErrorKind::KeyNotFound,
            PathError::IndexOutOfRange(_) => ErrorKind::IndexOutOfRange,
            PathError::CannotDescend(_) => ErrorKind::CannotDescend,
        }
    }
}
