//! Spec trees: the patterns values are matched against.
//!
//! A `Spec` mirrors the shape of a `Value`, but any position may instead hold
//! a wildcard, a regular expression or a typed scalar that the tree value is
//! normalized to before comparison.
//!
//! # Example
//!
//! ```
//! use deepquill::matcher::Spec;
//!
//! // {"x": /^h.*o$/, "tags": [..., "admin"], ...}
//! let spec = Spec::object([
//!     ("x", Spec::regex("^h.*o$").unwrap()),
//!     ("tags", Spec::array([Spec::Any, Spec::from("admin")])),
//! ])
//! .open();
//! assert!(spec.is_open_object());
//! ```

use crate::document::node::{Number, Value};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A node of a spec tree.
#[derive(Debug, Clone)]
pub enum Spec {
    /// Matches any value. As an array element it switches the array to
    /// unordered matching and absorbs unmatched elements.
    Any,
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    /// Expected object entries. `open` plays the role of the wildcard key:
    /// when set, keys not listed in `entries` are permitted.
    Object {
        entries: IndexMap<String, Spec>,
        open: bool,
    },
    Array(Vec<Spec>),
    /// Must match the textual form of the value, anchored at its start.
    Regex(Regex),
    /// Compared as an instant, whatever the offset.
    DateTime(DateTime<FixedOffset>),
    /// Compared case-insensitively against the value's text.
    Uuid(Uuid),
    /// Compared numerically after parsing the value as a decimal.
    Decimal(Decimal),
}

impl Spec {
    /// An object spec that requires exactly the given keys.
    pub fn object<K, I>(entries: I) -> Spec
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Spec)>,
    {
        Spec::Object {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            open: false,
        }
    }

    /// An object spec that requires the given keys and permits any others.
    pub fn open_object<K, I>(entries: I) -> Spec
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Spec)>,
    {
        Spec::object(entries).open()
    }

    /// An object spec that every object matches.
    pub fn any_object() -> Spec {
        Spec::Object {
            entries: IndexMap::new(),
            open: true,
        }
    }

    /// Marks an object spec as open. Other specs are returned unchanged.
    pub fn open(self) -> Spec {
        match self {
            Spec::Object { entries, .. } => Spec::Object {
                entries,
                open: true,
            },
            other => other,
        }
    }

    pub fn array<I: IntoIterator<Item = Spec>>(items: I) -> Spec {
        Spec::Array(items.into_iter().collect())
    }

    pub fn regex(pattern: &str) -> Result<Spec, regex::Error> {
        Regex::new(pattern).map(Spec::Regex)
    }

    pub fn decimal(text: &str) -> Result<Spec, rust_decimal::Error> {
        Decimal::from_str(text).map(Spec::Decimal)
    }

    pub fn uuid(text: &str) -> Result<Spec, uuid::Error> {
        Uuid::parse_str(text).map(Spec::Uuid)
    }

    /// Parses an RFC 3339 timestamp.
    pub fn datetime(text: &str) -> Result<Spec, chrono::ParseError> {
        DateTime::parse_from_rfc3339(text).map(Spec::DateTime)
    }

    /// A datetime spec from a naive timestamp, interpreted as UTC.
    pub fn naive_datetime(naive: NaiveDateTime) -> Spec {
        Spec::DateTime(naive.and_utc().fixed_offset())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Spec::Any)
    }

    pub fn is_open_object(&self) -> bool {
        matches!(self, Spec::Object { open: true, .. })
    }

    /// True for an array spec with a wildcard anywhere among its elements.
    pub fn is_unordered_array(&self) -> bool {
        match self {
            Spec::Array(items) => items.iter().any(Spec::is_any),
            _ => false,
        }
    }
}

impl PartialEq for Spec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Spec::Any, Spec::Any) | (Spec::Null, Spec::Null) => true,
            (Spec::Boolean(a), Spec::Boolean(b)) => a == b,
            (Spec::Number(a), Spec::Number(b)) => a == b,
            (Spec::String(a), Spec::String(b)) => a == b,
            (
                Spec::Object {
                    entries: a,
                    open: open_a,
                },
                Spec::Object {
                    entries: b,
                    open: open_b,
                },
            ) => open_a == open_b && a == b,
            (Spec::Array(a), Spec::Array(b)) => a == b,
            (Spec::Regex(a), Spec::Regex(b)) => a.as_str() == b.as_str(),
            (Spec::DateTime(a), Spec::DateTime(b)) => a == b,
            (Spec::Uuid(a), Spec::Uuid(b)) => a == b,
            (Spec::Decimal(a), Spec::Decimal(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spec::Any => write!(f, "..."),
            Spec::Null => write!(f, "null"),
            Spec::Boolean(b) => write!(f, "{}", b),
            Spec::Number(n) => write!(f, "{}", n),
            Spec::String(s) => write!(f, "{:?}", s),
            Spec::Object { entries, open } => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                if *open {
                    if !entries.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "...")?;
                }
                write!(f, "}}")
            }
            Spec::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Spec::Regex(re) => write!(f, "regex({:?})", re.as_str()),
            Spec::DateTime(dt) => write!(f, "datetime({})", dt.to_rfc3339()),
            Spec::Uuid(u) => write!(f, "uuid({})", u),
            Spec::Decimal(d) => write!(f, "decimal({})", d),
        }
    }
}

impl From<&str> for Spec {
    fn from(s: &str) -> Self {
        Spec::String(s.to_string())
    }
}

impl From<String> for Spec {
    fn from(s: String) -> Self {
        Spec::String(s)
    }
}

impl From<i32> for Spec {
    fn from(i: i32) -> Self {
        Spec::Number(Number::Integer(i64::from(i)))
    }
}

impl From<i64> for Spec {
    fn from(i: i64) -> Self {
        Spec::Number(Number::Integer(i))
    }
}

impl From<f64> for Spec {
    fn from(f: f64) -> Self {
        Spec::Number(Number::Float(f))
    }
}

impl From<bool> for Spec {
    fn from(b: bool) -> Self {
        Spec::Boolean(b)
    }
}

impl From<Regex> for Spec {
    fn from(re: Regex) -> Self {
        Spec::Regex(re)
    }
}

impl From<Uuid> for Spec {
    fn from(u: Uuid) -> Self {
        Spec::Uuid(u)
    }
}

impl From<Decimal> for Spec {
    fn from(d: Decimal) -> Self {
        Spec::Decimal(d)
    }
}

impl From<DateTime<FixedOffset>> for Spec {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Spec::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for Spec {
    fn from(dt: DateTime<Utc>) -> Self {
        Spec::DateTime(dt.fixed_offset())
    }
}

impl From<Vec<Spec>> for Spec {
    fn from(items: Vec<Spec>) -> Self {
        Spec::Array(items)
    }
}

/// The exact spec for a value: closed objects, ordered arrays, literal scalars.
impl From<&Value> for Spec {
    fn from(value: &Value) -> Self {
        match value {
            Value::Object(entries) => Spec::Object {
                entries: entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Spec::from(v)))
                    .collect(),
                open: false,
            },
            Value::Array(items) => Spec::Array(items.iter().map(Spec::from).collect()),
            Value::String(s) => Spec::String(s.clone()),
            Value::Number(n) => Spec::Number(*n),
            Value::Boolean(b) => Spec::Boolean(*b),
            Value::Null => Spec::Null,
            Value::DateTime(dt) => Spec::DateTime(*dt),
            Value::Uuid(u) => Spec::Uuid(*u),
            Value::Decimal(d) => Spec::Decimal(*d),
        }
    }
}

impl From<Value> for Spec {
    fn from(value: Value) -> Self {
        Spec::from(&value)
    }
}

impl From<serde_json::Value> for Spec {
    fn from(value: serde_json::Value) -> Self {
        Spec::from(&Value::from(value))
    }
}
