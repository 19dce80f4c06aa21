//! Normalization of tree values into the typed scalars used by specs.

use crate::config::Config;
use crate::document::node::{Number, Value};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Naive formats tried after RFC 3339; parsed values are taken as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Offset-carrying formats that RFC 3339 parsing rejects.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Interprets a tree value as a datetime, if it can be one.
pub fn to_datetime(value: &Value, config: &Config) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::String(s) => parse_datetime(s.trim(), &config.datetime_formats),
        Value::Number(n) if config.numeric_timestamps => from_timestamp(*n),
        _ => None,
    }
}

/// Parses a datetime string: RFC 3339 first, then the built-in forms, then
/// the extra `formats`.
pub fn parse_datetime(text: &str, formats: &[String]) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }

    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    let naive_formats = NAIVE_DATETIME_FORMATS
        .iter()
        .copied()
        .chain(formats.iter().map(String::as_str));
    for format in naive_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn from_timestamp(number: Number) -> Option<DateTime<FixedOffset>> {
    let utc = match number {
        Number::Integer(secs) => DateTime::from_timestamp(secs, 0),
        Number::Float(f) if f.is_finite() => {
            let secs = f.floor();
            let nanos = ((f - secs) * 1_000_000_000.0).round() as u32;
            DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
        }
        Number::Float(_) => None,
    };
    utc.map(|dt| dt.fixed_offset())
}

/// Interprets a tree value as a decimal, if it can be one.
pub fn to_decimal(value: &Value, config: &Config) -> Option<Decimal> {
    match value {
        Value::Decimal(d) => Some(*d),
        Value::String(s) => parse_decimal(s.trim()),
        Value::Number(Number::Integer(i)) if config.decimal_from_numbers => Some(Decimal::from(*i)),
        Value::Number(Number::Float(f)) if config.decimal_from_numbers => {
            Decimal::try_from(*f).ok()
        }
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Lowercased text of a value, for case-insensitive UUID comparison.
pub fn to_uuid_text(value: &Value) -> Option<String> {
    value.as_text().map(|text| text.to_lowercase())
}
