//! Tree node representation.
//!
//! This module provides the `Value` type that every other part of deepquill
//! operates on: a closed tagged variant covering mappings, sequences, plain
//! scalars and a few typed scalars (datetimes, UUIDs, decimals). Mappings keep
//! insertion order so enumeration is stable, but order never matters when
//! matching.
//!
//! # Example
//!
//! ```
//! use deepquill::document::node::{Number, Value};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), Value::String("deepquill".to_string()));
//! map.insert("version".to_string(), Value::Number(Number::Integer(1)));
//! let object = Value::Object(map);
//!
//! assert!(object.is_object());
//! assert!(object.is_container());
//! ```

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

/// Represents numbers (integer or float)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Exact numeric equality across the integer/float split, so `1 == 1.0`
    /// but `2^53 + 1 != 2^53 as f64`.
    pub fn numerically_equals(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Integer(i), Number::Float(f)) | (Number::Float(f), Number::Integer(i)) => {
                integer_equals_float(*i, *f)
            }
        }
    }
}

/// 2^63, the first float past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn integer_equals_float(i: i64, f: f64) -> bool {
    f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) && f as i64 == i
}

/// A node in a caller-owned tree.
///
/// Objects and arrays contain further `Value`s; everything else is a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Key-value pairs, keys unique, insertion order preserved
    Object(IndexMap<String, Value>),
    /// Ordered values
    Array(Vec<Value>),
    String(String),
    Number(Number),
    Boolean(bool),
    Null,
    /// A timezone-aware instant
    DateTime(DateTime<FixedOffset>),
    Uuid(Uuid),
    Decimal(Decimal),
}

impl Value {
    /// Returns true if this value is an object.
    ///
    /// # Example
    ///
    /// ```
    /// use deepquill::document::node::{Number, Value};
    /// use indexmap::IndexMap;
    ///
    /// assert!(Value::Object(IndexMap::new()).is_object());
    /// assert!(!Value::Number(Number::Integer(42)).is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this value has children (object or array).
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::DateTime(_) => "datetime",
            Value::Uuid(_) => "uuid",
            Value::Decimal(_) => "decimal",
        }
    }

    /// The textual form of a scalar, as seen by regular expressions.
    ///
    /// Strings are returned as-is; numbers, booleans and typed scalars use
    /// their display form. Null and containers have no textual form.
    ///
    /// ```
    /// use deepquill::document::node::{Number, Value};
    ///
    /// assert_eq!(Value::String("abc".into()).as_text().as_deref(), Some("abc"));
    /// assert_eq!(Value::Number(Number::Integer(7)).as_text().as_deref(), Some("7"));
    /// assert!(Value::Null.as_text().is_none());
    /// ```
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Boolean(b) => Some(Cow::Owned(b.to_string())),
            Value::DateTime(dt) => Some(Cow::Owned(dt.to_rfc3339())),
            Value::Uuid(u) => Some(Cow::Owned(u.to_string())),
            Value::Decimal(d) => Some(Cow::Owned(d.to_string())),
            Value::Null | Value::Object(_) | Value::Array(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::String(s) => write!(f, "{:?}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::DateTime(dt) => write!(f, "datetime({})", dt.to_rfc3339()),
            Value::Uuid(u) => write!(f, "uuid({})", u),
            Value::Decimal(d) => write!(f, "decimal({})", d),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Object(entries)
    }
}
