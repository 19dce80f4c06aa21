//! The fixed set of failure kinds reported by path resolution and matching.
//!
//! Both `PathError` and `MatchError` map onto `ErrorKind` via `kind()`, so
//! callers can branch on the classification without matching payloads.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    KeyNotFound,
    IndexOutOfRange,
    CannotDescend,
    KeysDoNotMatch,
    MissingRequiredKey,
    RegexMismatch,
    DatetimeMismatch,
    ValueMismatch,
    TypeMismatch,
    LengthTooShort,
    LengthTooLong,
    NoMatchFound,
}

impl ErrorKind {
    /// True for the kinds produced while resolving a dotted key.
    pub fn is_path_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::KeyNotFound | ErrorKind::IndexOutOfRange | ErrorKind::CannotDescend
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::KeyNotFound => "key not found",
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::CannotDescend => "cannot descend",
            ErrorKind::KeysDoNotMatch => "keys do not match",
            ErrorKind::MissingRequiredKey => "missing required key",
            ErrorKind::RegexMismatch => "regex mismatch",
            ErrorKind::DatetimeMismatch => "datetime mismatch",
            ErrorKind::ValueMismatch => "value mismatch",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::LengthTooShort => "length too short",
            ErrorKind::LengthTooLong => "length too long",
            ErrorKind::NoMatchFound => "no match found",
        };
        f.write_str(name)
    }
}
