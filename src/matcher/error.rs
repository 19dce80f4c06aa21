//! Error types for structural matching.

use super::spec::Spec;
use crate::document::node::Value;
use crate::error::ErrorKind;
use thiserror::Error;

/// The first position at which a tree failed to match a spec.
///
/// `location` is the dotted path of that position, empty for the root.
/// `actual` is `None` when the key was absent from the tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("keys do not match at {}: found {actual_keys:?}, expected {expected_keys:?}", at(.location))]
    KeysDoNotMatch {
        location: String,
        actual_keys: Vec<String>,
        expected_keys: Vec<String>,
    },

    #[error("missing required key {}", at(.location))]
    MissingRequiredKey { location: String },

    #[error("regex mismatch at {}: {} does not match {expected}", at(.location), shown(.actual))]
    RegexMismatch {
        location: String,
        expected: Spec,
        actual: Option<Value>,
    },

    #[error("datetime mismatch at {}: expected {expected}, found {}", at(.location), shown(.actual))]
    DatetimeMismatch {
        location: String,
        expected: Spec,
        actual: Option<Value>,
    },

    #[error("value mismatch at {}: expected {expected}, found {}", at(.location), shown(.actual))]
    ValueMismatch {
        location: String,
        expected: Spec,
        actual: Option<Value>,
    },

    #[error("type mismatch at {}: expected {expected}, found {}", at(.location), shown(.actual))]
    TypeMismatch {
        location: String,
        expected: Spec,
        actual: Option<Value>,
    },

    #[error("array too short at {}: expected {} elements, found {}", at(.location), .expected.len(), .actual.len())]
    LengthTooShort {
        location: String,
        expected: Vec<Spec>,
        actual: Vec<Value>,
    },

    #[error("array too long at {}: expected {} elements, found {}", at(.location), .expected.len(), .actual.len())]
    LengthTooLong {
        location: String,
        expected: Vec<Spec>,
        actual: Vec<Value>,
    },

    #[error("no match found at {} for {expected} among {}", at(.location), Value::Array(.remaining.clone()))]
    NoMatchFound {
        location: String,
        expected: Spec,
        remaining: Vec<Value>,
    },
}

fn at(location: &str) -> String {
    if location.is_empty() {
        "<root>".to_string()
    } else {
        format!("'{}'", location)
    }
}

fn shown(actual: &Option<Value>) -> String {
    match actual {
        Some(value) => value.to_string(),
        None => "<absent>".to_string(),
    }
}

impl MatchError {
    pub fn location(&self) -> &str {
        match self {
            MatchError::KeysDoNotMatch { location, .. }
            | MatchError::MissingRequiredKey { location }
            | MatchError::RegexMismatch { location, .. }
            | MatchError::DatetimeMismatch { location, .. }
            | MatchError::ValueMismatch { location, .. }
            | MatchError::TypeMismatch { location, .. }
            | MatchError::LengthTooShort { location, .. }
            | MatchError::LengthTooLong { location, .. }
            | MatchError::NoMatchFound { location, .. } => location,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::KeysDoNotMatch { .. } => ErrorKind::KeysDoNotMatch,
            MatchError::MissingRequiredKey { .. } => ErrorKind::MissingRequiredKey,
            MatchError::RegexMismatch { .. } => ErrorKind::RegexMismatch,
            MatchError::DatetimeMismatch { .. } => ErrorKind::DatetimeMismatch,
            MatchError::ValueMismatch { .. } => ErrorKind::ValueMismatch,
            MatchError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            MatchError::LengthTooShort { .. } => ErrorKind::LengthTooShort,
            MatchError::LengthTooLong { .. } => ErrorKind::LengthTooLong,
            MatchError::NoMatchFound { .. } => ErrorKind::NoMatchFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root_location() {
        let err = MatchError::KeysDoNotMatch {
            location: String::new(),
            actual_keys: vec!["a".to_string()],
            expected_keys: vec!["b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            r#"keys do not match at <root>: found ["a"], expected ["b"]"#
        );
    }

    #[test]
    fn test_display_absent_value() {
        let err = MatchError::ValueMismatch {
            location: "a.b".to_string(),
            expected: Spec::from("x"),
            actual: None,
        };
        assert_eq!(
            err.to_string(),
            r#"value mismatch at 'a.b': expected "x", found <absent>"#
        );
        assert_eq!(err.kind(), ErrorKind::ValueMismatch);
        assert_eq!(err.location(), "a.b");
    }
}
