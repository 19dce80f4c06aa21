//! Conversion of JSON and YAML documents into `Value` trees.
//!
//! Both `serde_json` and `serde_yaml` values are converted into the same
//! `Value` representation so that paths and specs work identically no matter
//! where the data came from.
//!
//! # Example
//!
//! ```
//! use deepquill::document::parser::parse_json;
//! use deepquill::document::node::Value;
//!
//! let tree = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
//! assert!(matches!(tree, Value::Object(_)));
//! ```

use super::node::{Number, Value};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses a JSON string into a `Value` tree.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON.
pub fn parse_json(json_str: &str) -> Result<Value> {
    let value: JsonValue = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    Ok(from_json_value(&value))
}

/// Parses a YAML string into a `Value` tree.
///
/// Only the first document of a multi-document stream is considered;
/// `serde_yaml` rejects streams with more than one document.
///
/// # Errors
///
/// Returns an error if the input is not valid YAML.
pub fn parse_yaml(yaml_str: &str) -> Result<Value> {
    let value: YamlValue = serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
    Ok(from_yaml_value(&value))
}

/// Converts a `serde_json::Value` into a `Value`.
///
/// Integers that fit in `i64` stay integers; everything else numeric becomes a float.
pub fn from_json_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), from_json_value(v)))
                .collect(),
        ),
        JsonValue::Array(arr) => Value::Array(arr.iter().map(from_json_value).collect()),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(Number::Integer(i)),
            None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Null => Value::Null,
    }
}

/// Converts a `serde_yaml::Value` into a `Value`.
///
/// Mapping keys that are not strings are rendered to their scalar text, and
/// tags are dropped in favour of the tagged value.
pub fn from_yaml_value(value: &YamlValue) -> Value {
    match value {
        YamlValue::Mapping(mapping) => {
            let mut entries = IndexMap::with_capacity(mapping.len());
            for (k, v) in mapping.iter() {
                entries.insert(yaml_key_text(k), from_yaml_value(v));
            }
            Value::Object(entries)
        }
        YamlValue::Sequence(items) => Value::Array(items.iter().map(from_yaml_value).collect()),
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(Number::Integer(i)),
            None => Value::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
        },
        YamlValue::Bool(b) => Value::Boolean(*b),
        YamlValue::Null => Value::Null,
        YamlValue::Tagged(tagged) => from_yaml_value(&tagged.value),
    }
}

fn yaml_key_text(key: &YamlValue) -> String {
    match key {
        YamlValue::String(s) => s.clone(),
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_string(),
        YamlValue::Tagged(tagged) => yaml_key_text(&tagged.value),
        // Complex keys have no dotted-path spelling; fall back to their YAML text.
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        from_json_value(&value)
    }
}

impl From<&JsonValue> for Value {
    fn from(value: &JsonValue) -> Self {
        from_json_value(value)
    }
}
