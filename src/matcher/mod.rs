//! Structural matching of value trees against spec trees.
//!
//! A tree matches a spec when every position agrees under these rules,
//! tried in order at each position:
//!
//! 1. `Spec::Any` matches anything, including an absent key
//! 2. `Spec::Null` matches only null
//! 3. object vs object spec: recurse with [`ObjectMatcher`]
//! 4. array vs array spec: recurse with [`ArrayMatcher`]
//! 5. `Spec::Regex` must match the value's text from its start
//! 6. `Spec::DateTime` compares instants after parsing the value
//! 7. `Spec::Uuid` compares lowercase text
//! 8. `Spec::Decimal` parses the value as a decimal
//! 9. anything else is compared literally
//!
//! Object specs list the keys they require; open object specs permit extra
//! keys. Array specs are compared element by element, unless one of their
//! elements is `Spec::Any`, in which case every other element must claim a
//! distinct tree element in any order.
//!
//! Matching stops at the first failure and reports it as a [`MatchError`].
//!
//! # Example
//!
//! ```
//! use deepquill::matcher::{matches, MatchError, Spec};
//! use deepquill::document::node::Value;
//! use serde_json::json;
//!
//! let tree = Value::from(json!({"items": [{"id": 1}, {"id": 2}], "total": 2}));
//!
//! let spec = Spec::open_object([(
//!     "items",
//!     Spec::array([Spec::Any, Spec::open_object([("id", Spec::from(2))])]),
//! )]);
//! assert!(matches(&tree, &spec).is_ok());
//!
//! let spec = Spec::open_object([("total", Spec::from(3))]);
//! assert!(matches!(
//!     matches(&tree, &spec),
//!     Err(MatchError::ValueMismatch { .. })
//! ));
//! ```

pub mod coerce;
pub mod error;
pub mod spec;

pub use error::MatchError;
pub use spec::Spec;

use crate::config::Config;
use crate::document::node::{Number, Value};
use indexmap::IndexMap;
use log::trace;
use rust_decimal::Decimal;
use std::collections::HashSet;

/// Matches a whole tree against a spec with the default configuration.
pub fn matches(value: &Value, spec: &Spec) -> Result<(), MatchError> {
    matches_with(value, spec, &Config::default())
}

/// Matches a whole tree against a spec.
pub fn matches_with(value: &Value, spec: &Spec, config: &Config) -> Result<(), MatchError> {
    validate(Some(value), spec, "", config)
}

/// Compares one position of the tree with one position of the spec.
///
/// `value` is `None` when the position is an absent object key.
pub fn validate(
    value: Option<&Value>,
    spec: &Spec,
    location: &str,
    config: &Config,
) -> Result<(), MatchError> {
    match (value, spec) {
        (_, Spec::Any) => return Ok(()),
        (Some(Value::Null), Spec::Null) => return Ok(()),
        (_, Spec::Null) => return Err(type_mismatch(location, spec, value)),
        (Some(Value::Object(entries)), Spec::Object { .. }) => {
            return ObjectMatcher::new(entries, config).matches(spec, location);
        }
        (Some(Value::Array(items)), Spec::Array(_)) => {
            return ArrayMatcher::new(items, config).matches(spec, location);
        }
        _ => {}
    }

    match spec {
        Spec::Regex(re) => {
            if regex_accepts(value, re) {
                Ok(())
            } else {
                Err(MatchError::RegexMismatch {
                    location: location.to_string(),
                    expected: spec.clone(),
                    actual: value.cloned(),
                })
            }
        }
        Spec::DateTime(expected) => {
            let parsed = value.and_then(|v| coerce::to_datetime(v, config));
            match parsed {
                None => Err(type_mismatch(location, spec, value)),
                Some(actual) if actual == *expected => Ok(()),
                Some(_) => Err(MatchError::DatetimeMismatch {
                    location: location.to_string(),
                    expected: spec.clone(),
                    actual: value.cloned(),
                }),
            }
        }
        Spec::Uuid(expected) => {
            let text = value.and_then(coerce::to_uuid_text);
            if text.as_deref() == Some(expected.to_string().as_str()) {
                Ok(())
            } else {
                Err(MatchError::ValueMismatch {
                    location: location.to_string(),
                    expected: spec.clone(),
                    actual: text.map(Value::String).or_else(|| value.cloned()),
                })
            }
        }
        Spec::Decimal(expected) => match value.and_then(|v| coerce::to_decimal(v, config)) {
            None => Err(type_mismatch(location, spec, value)),
            Some(actual) if actual == *expected => Ok(()),
            Some(actual) => Err(MatchError::ValueMismatch {
                location: location.to_string(),
                expected: spec.clone(),
                actual: Some(Value::Decimal(actual)),
            }),
        },
        _ => {
            if value.map_or(false, |v| literal_equals(v, spec)) {
                Ok(())
            } else {
                Err(MatchError::ValueMismatch {
                    location: location.to_string(),
                    expected: spec.clone(),
                    actual: value.cloned(),
                })
            }
        }
    }
}

/// Same verdict as [`validate`], without building an error on failure.
fn accepts(value: Option<&Value>, spec: &Spec, config: &Config) -> bool {
    match (value, spec) {
        (_, Spec::Any) => true,
        (Some(Value::Null), Spec::Null) => true,
        (_, Spec::Null) => false,
        (Some(Value::Object(entries)), Spec::Object { entries: spec_entries, open }) => {
            ObjectMatcher::new(entries, config).accepts_entries(spec_entries, *open)
        }
        (Some(Value::Array(items)), Spec::Array(spec_items)) => {
            ArrayMatcher::new(items, config).accepts_items(spec, spec_items)
        }
        (_, Spec::Regex(re)) => regex_accepts(value, re),
        (_, Spec::DateTime(expected)) => {
            value.and_then(|v| coerce::to_datetime(v, config)) == Some(*expected)
        }
        (_, Spec::Uuid(expected)) => {
            value.and_then(coerce::to_uuid_text).as_deref() == Some(expected.to_string().as_str())
        }
        (_, Spec::Decimal(expected)) => {
            value.and_then(|v| coerce::to_decimal(v, config)) == Some(*expected)
        }
        _ => value.map_or(false, |v| literal_equals(v, spec)),
    }
}

/// Anchored at the start only; leftmost-first search finds a match at 0
/// whenever one exists.
fn regex_accepts(value: Option<&Value>, re: &regex::Regex) -> bool {
    value
        .and_then(Value::as_text)
        .as_deref()
        .and_then(|text| re.find(text))
        .map_or(false, |m| m.start() == 0)
}

fn type_mismatch(location: &str, spec: &Spec, value: Option<&Value>) -> MatchError {
    MatchError::TypeMismatch {
        location: location.to_string(),
        expected: spec.clone(),
        actual: value.cloned(),
    }
}

/// Plain equality between a scalar value and a literal spec.
fn literal_equals(value: &Value, spec: &Spec) -> bool {
    match (value, spec) {
        (Value::Boolean(a), Spec::Boolean(b)) => a == b,
        (Value::Number(a), Spec::Number(b)) => a.numerically_equals(b),
        (Value::String(a), Spec::String(b)) => a == b,
        (Value::Decimal(a), Spec::Number(Number::Integer(b))) => *a == Decimal::from(*b),
        (Value::Decimal(a), Spec::Number(Number::Float(b))) => {
            Decimal::from_f64_retain(*b).map_or(false, |b| *a == b)
        }
        _ => false,
    }
}

/// Joins a parent location and a child key or index.
fn child_location(location: &str, key: impl std::fmt::Display) -> String {
    if location.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", location, key)
    }
}

/// Matches an object against object specs.
#[derive(Debug, Clone, Copy)]
pub struct ObjectMatcher<'a> {
    entries: &'a IndexMap<String, Value>,
    config: &'a Config,
}

impl<'a> ObjectMatcher<'a> {
    pub fn new(entries: &'a IndexMap<String, Value>, config: &'a Config) -> Self {
        Self { entries, config }
    }

    /// Matches the wrapped object against `spec`, reporting failures relative
    /// to `location`.
    ///
    /// Non-object specs fall back to the leaf rules, so `Spec::Any` matches
    /// and literals fail with a value mismatch.
    pub fn matches(&self, spec: &Spec, location: &str) -> Result<(), MatchError> {
        match spec {
            Spec::Object { entries, open } => self.matches_entries(entries, *open, location),
            other => {
                let value = Value::Object(self.entries.clone());
                validate(Some(&value), other, location, self.config)
            }
        }
    }

    fn matches_entries(
        &self,
        spec_entries: &IndexMap<String, Spec>,
        open: bool,
        location: &str,
    ) -> Result<(), MatchError> {
        if !open {
            let actual: HashSet<&str> = self.entries.keys().map(String::as_str).collect();
            let expected: HashSet<&str> = spec_entries.keys().map(String::as_str).collect();
            if actual != expected {
                return Err(MatchError::KeysDoNotMatch {
                    location: location.to_string(),
                    actual_keys: self.entries.keys().cloned().collect(),
                    expected_keys: spec_entries.keys().cloned().collect(),
                });
            }
        }

        for (key, subspec) in spec_entries {
            let key_location = child_location(location, key);
            let value = self.entries.get(key);
            if value.is_none() && subspec.is_any() {
                return Err(MatchError::MissingRequiredKey {
                    location: key_location,
                });
            }
            validate(value, subspec, &key_location, self.config)?;
        }

        Ok(())
    }

    fn accepts_entries(&self, spec_entries: &IndexMap<String, Spec>, open: bool) -> bool {
        // Keys are unique on both sides, so equal sets means equal sizes
        // plus containment.
        if !open
            && (self.entries.len() != spec_entries.len()
                || !spec_entries.keys().all(|key| self.entries.contains_key(key)))
        {
            return false;
        }

        spec_entries.iter().all(|(key, subspec)| match self.entries.get(key) {
            None if subspec.is_any() => false,
            value => accepts(value, subspec, self.config),
        })
    }
}

/// Matches an array against array specs, ordered or unordered.
#[derive(Debug, Clone, Copy)]
pub struct ArrayMatcher<'a> {
    items: &'a [Value],
    config: &'a Config,
}

impl<'a> ArrayMatcher<'a> {
    pub fn new(items: &'a [Value], config: &'a Config) -> Self {
        Self { items, config }
    }

    /// Matches the wrapped array against `spec`, reporting failures relative
    /// to `location`.
    pub fn matches(&self, spec: &Spec, location: &str) -> Result<(), MatchError> {
        match spec {
            Spec::Array(items) if spec.is_unordered_array() => {
                self.matches_unordered(items, location)
            }
            Spec::Array(items) => self.matches_ordered(items, location),
            other => {
                let value = Value::Array(self.items.to_vec());
                validate(Some(&value), other, location, self.config)
            }
        }
    }

    fn matches_ordered(&self, spec_items: &[Spec], location: &str) -> Result<(), MatchError> {
        if self.items.len() < spec_items.len() {
            return Err(MatchError::LengthTooShort {
                location: location.to_string(),
                expected: spec_items.to_vec(),
                actual: self.items.to_vec(),
            });
        }
        if self.items.len() > spec_items.len() {
            return Err(MatchError::LengthTooLong {
                location: location.to_string(),
                expected: spec_items.to_vec(),
                actual: self.items.to_vec(),
            });
        }

        for (index, (value, subspec)) in self.items.iter().zip(spec_items).enumerate() {
            let key_location = child_location(location, index);
            validate(Some(value), subspec, &key_location, self.config)?;
        }

        Ok(())
    }

    /// Greedy assignment in spec order: each non-wildcard spec element claims
    /// the first unclaimed tree element it matches. There is no backtracking.
    fn matches_unordered(&self, spec_items: &[Spec], location: &str) -> Result<(), MatchError> {
        let mut claimed = vec![false; self.items.len()];

        for subspec in spec_items.iter().filter(|s| !s.is_any()) {
            match self.claim(subspec, &claimed) {
                Some(index) => {
                    trace!("{} claimed element {} at '{}'", subspec, index, location);
                    claimed[index] = true;
                }
                None => {
                    let remaining = self
                        .items
                        .iter()
                        .zip(&claimed)
                        .filter(|(_, taken)| !**taken)
                        .map(|(value, _)| value.clone())
                        .collect();
                    return Err(MatchError::NoMatchFound {
                        location: location.to_string(),
                        expected: subspec.clone(),
                        remaining,
                    });
                }
            }
        }

        Ok(())
    }

    /// The first unclaimed element accepted by `subspec`.
    fn claim(&self, subspec: &Spec, claimed: &[bool]) -> Option<usize> {
        self.items
            .iter()
            .zip(claimed)
            .position(|(value, taken)| !*taken && accepts(Some(value), subspec, self.config))
    }

    fn accepts_items(&self, spec: &Spec, spec_items: &[Spec]) -> bool {
        if spec.is_unordered_array() {
            let mut claimed = vec![false; self.items.len()];
            spec_items.iter().filter(|s| !s.is_any()).all(|subspec| {
                match self.claim(subspec, &claimed) {
                    Some(index) => {
                        claimed[index] = true;
                        true
                    }
                    None => false,
                }
            })
        } else {
            self.items.len() == spec_items.len()
                && self
                    .items
                    .iter()
                    .zip(spec_items)
                    .all(|(value, subspec)| accepts(Some(value), subspec, self.config))
        }
    }
}
