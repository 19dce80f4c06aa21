//! Integration tests for structural matching.

use deepquill::config::Config;
use deepquill::document::node::Value;
use deepquill::error::ErrorKind;
use deepquill::matcher::{matches, matches_with, MatchError, Spec};
use deepquill::view::{DeepAccess, DeepMap};
use rust_decimal::Decimal;
use serde_json::json;

fn raw_data() -> Value {
    Value::from(json!({
        "1": "one",
        "2": {"a": "A", "b": {"i": "I", "ii": "II"}},
        "3": ["index0", "index1", "index2"],
        "4": [{"id": 1, "name": "foo"}, {"id": 2, "name": "bar"}, {"id": 3, "name": "baz"}],
    }))
}

fn strings(items: &[&str]) -> Vec<Value> {
    items.iter().map(|s| Value::from(*s)).collect()
}

fn specs(items: &[&str]) -> Vec<Spec> {
    items.iter().map(|s| Spec::from(*s)).collect()
}

#[test]
fn test_matches_exact() {
    let raw = raw_data();
    assert!(matches(&raw, &Spec::from(&raw)).is_ok());
}

#[test]
fn test_matches_partial() {
    let raw = raw_data();
    assert!(matches(&raw, &Spec::open_object([("1", Spec::from("one"))])).is_ok());

    let spec = Spec::open_object([
        ("1", Spec::Any),
        ("2", Spec::open_object([("a", Spec::from("A"))])),
    ]);
    assert!(matches(&raw, &spec).is_ok());
}

#[test]
fn test_wildcard_key_alone_matches_any_object() {
    for tree in [json!({}), json!({"a": 1}), json!({"x": {"y": [1, 2]}})] {
        assert!(matches(&Value::from(tree), &Spec::any_object()).is_ok());
    }
}

#[test]
fn test_matches_regex() {
    let raw = raw_data();
    let spec = Spec::open_object([("1", Spec::regex("^.n.$").unwrap())]);
    assert!(matches(&raw, &spec).is_ok());

    let tree = Value::from(json!({"x": "hello"}));
    let spec = Spec::open_object([("x", Spec::regex("^h.*o$").unwrap())]);
    assert!(matches(&tree, &spec).is_ok());
}

#[test]
fn test_matches_uuid_case_insensitively() {
    let tree = Value::from(json!({"id": "2D2C131C-E2A2-4DEA-887A-A7A6678B71AA"}));
    let spec = Spec::object([(
        "id",
        Spec::uuid("2D2C131C-E2A2-4DEA-887A-A7A6678B71AA").unwrap(),
    )]);
    assert!(matches(&tree, &spec).is_ok());
}

#[test]
fn test_uuid_mismatch() {
    let expected = Spec::uuid("2d2c131c-e2a2-4dea-887a-a7a6678b71aa").unwrap();
    let spec = Spec::object([("user", Spec::object([("id", expected.clone())]))]);

    let tree = Value::from(json!({"user": {"id": "2D2C131C-E2A2-4DEA-887A-A7A6678B71AB"}}));
    let err = matches(&tree, &spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueMismatch);
    assert_eq!(
        err,
        MatchError::ValueMismatch {
            location: "user.id".to_string(),
            expected: expected.clone(),
            actual: Some(Value::from("2d2c131c-e2a2-4dea-887a-a7a6678b71ab")),
        }
    );

    let tree = Value::from(json!({"user": {"id": null}}));
    assert_eq!(
        matches(&tree, &spec).unwrap_err(),
        MatchError::ValueMismatch {
            location: "user.id".to_string(),
            expected,
            actual: Some(Value::Null),
        }
    );
}

#[test]
fn test_matches_list_ordered() {
    let raw = raw_data();
    let spec = Spec::open_object([("3", Spec::Array(specs(&["index0", "index1", "index2"])))]);
    assert!(matches(&raw, &spec).is_ok());

    let spec = Spec::open_object([(
        "4",
        Spec::array([
            Spec::open_object([("id", Spec::from(1))]),
            Spec::open_object([("id", Spec::from(2))]),
            Spec::open_object([("id", Spec::from(3))]),
        ]),
    )]);
    assert!(matches(&raw, &spec).is_ok());
}

#[test]
fn test_matches_list_unordered() {
    let raw = raw_data();
    let spec = Spec::open_object([("3", Spec::array([Spec::Any, Spec::from("index2")]))]);
    assert!(matches(&raw, &spec).is_ok());

    let spec = Spec::open_object([(
        "3",
        Spec::array([
            Spec::Any,
            Spec::from("index2"),
            Spec::from("index1"),
            Spec::from("index0"),
        ]),
    )]);
    assert!(matches(&raw, &spec).is_ok());

    let spec = Spec::open_object([(
        "4",
        Spec::array([Spec::Any, Spec::open_object([("name", Spec::from("baz"))])]),
    )]);
    assert!(matches(&raw, &spec).is_ok());
}

#[test]
fn test_wildcard_absorbs_unmatched_elements() {
    let tree = Value::from(json!({"items": [{"id": 1}, {"id": 2}]}));
    let spec = Spec::open_object([(
        "items",
        Spec::array([Spec::Any, Spec::object([("id", Spec::from(2))])]),
    )]);
    assert!(matches(&tree, &spec).is_ok());
}

#[test]
fn test_keys_do_not_match() {
    let raw = raw_data();
    let spec = Spec::object([
        ("1", Spec::Any),
        ("2", Spec::Any),
        ("3", Spec::Any),
        ("5", Spec::Any),
    ]);
    assert_eq!(
        matches(&raw, &spec).unwrap_err(),
        MatchError::KeysDoNotMatch {
            location: String::new(),
            actual_keys: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            expected_keys: vec!["1".into(), "2".into(), "3".into(), "5".into()],
        }
    );

    let spec = Spec::open_object([(
        "2",
        Spec::object([("a", Spec::Any), ("b", Spec::Any), ("c", Spec::Any)]),
    )]);
    assert_eq!(
        matches(&raw, &spec).unwrap_err(),
        MatchError::KeysDoNotMatch {
            location: "2".to_string(),
            actual_keys: vec!["a".into(), "b".into()],
            expected_keys: vec!["a".into(), "b".into(), "c".into()],
        }
    );
}

#[test]
fn test_key_sets_compared_regardless_of_order() {
    let tree = Value::from(json!({"a": 1, "b": 2}));
    let spec = Spec::object([("b", Spec::from(2)), ("a", Spec::from(1))]);
    assert!(matches(&tree, &spec).is_ok());
}

#[test]
fn test_missing_required_key() {
    let raw = raw_data();
    let err = matches(&raw, &Spec::open_object([("foo", Spec::Any)])).unwrap_err();
    assert_eq!(
        err,
        MatchError::MissingRequiredKey {
            location: "foo".to_string()
        }
    );

    let spec = Spec::open_object([("2", Spec::open_object([("foo", Spec::Any)]))]);
    let err = matches(&raw, &spec).unwrap_err();
    assert_eq!(
        err,
        MatchError::MissingRequiredKey {
            location: "2.foo".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::MissingRequiredKey);
}

#[test]
fn test_absent_key_with_literal_spec() {
    let raw = raw_data();
    let err = matches(&raw, &Spec::open_object([("foo", Spec::from("bar"))])).unwrap_err();
    assert_eq!(
        err,
        MatchError::ValueMismatch {
            location: "foo".to_string(),
            expected: Spec::from("bar"),
            actual: None,
        }
    );
}

#[test]
fn test_regex_mismatch() {
    let raw = raw_data();
    let pattern = Spec::regex("xyz").unwrap();
    let err = matches(&raw, &Spec::open_object([("1", pattern.clone())])).unwrap_err();
    assert_eq!(
        err,
        MatchError::RegexMismatch {
            location: "1".to_string(),
            expected: pattern,
            actual: Some(Value::from("one")),
        }
    );
}

#[test]
fn test_value_mismatch() {
    let raw = raw_data();
    let err = matches(&raw, &Spec::open_object([("1", Spec::from("ONE"))])).unwrap_err();
    assert_eq!(
        err,
        MatchError::ValueMismatch {
            location: "1".to_string(),
            expected: Spec::from("ONE"),
            actual: Some(Value::from("one")),
        }
    );

    let spec = Spec::open_object([("2", Spec::open_object([("a", Spec::from("ayy!"))]))]);
    let err = matches(&raw, &spec).unwrap_err();
    assert_eq!(err.location(), "2.a");

    let spec = Spec::open_object([("3", Spec::Array(specs(&["index0", "index1", "ayy!"])))]);
    let err = matches(&raw, &spec).unwrap_err();
    assert_eq!(
        err,
        MatchError::ValueMismatch {
            location: "3.2".to_string(),
            expected: Spec::from("ayy!"),
            actual: Some(Value::from("index2")),
        }
    );
}

#[test]
fn test_tree_longer_than_spec() {
    let raw = raw_data();
    let spec = Spec::open_object([("3", Spec::Array(specs(&["a", "b"])))]);
    assert_eq!(
        matches(&raw, &spec).unwrap_err(),
        MatchError::LengthTooLong {
            location: "3".to_string(),
            expected: specs(&["a", "b"]),
            actual: strings(&["index0", "index1", "index2"]),
        }
    );
}

#[test]
fn test_tree_shorter_than_spec() {
    let raw = raw_data();
    let spec = Spec::open_object([("3", Spec::Array(specs(&["a", "b", "c", "d"])))]);
    assert_eq!(
        matches(&raw, &spec).unwrap_err(),
        MatchError::LengthTooShort {
            location: "3".to_string(),
            expected: specs(&["a", "b", "c", "d"]),
            actual: strings(&["index0", "index1", "index2"]),
        }
    );
}

#[test]
fn test_ordered_length_is_checked_before_elements() {
    let tree = Value::from(json!(["x"]));
    let err = matches(&tree, &Spec::Array(specs(&["y", "z"]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthTooShort);
}

#[test]
fn test_no_match_found() {
    let raw = raw_data();
    let spec = Spec::open_object([("3", Spec::array([Spec::from("index4"), Spec::Any]))]);
    assert_eq!(
        matches(&raw, &spec).unwrap_err(),
        MatchError::NoMatchFound {
            location: "3".to_string(),
            expected: Spec::from("index4"),
            remaining: strings(&["index0", "index1", "index2"]),
        }
    );

    let spec = Spec::open_object([(
        "3",
        Spec::array([Spec::from("index2"), Spec::from("index4"), Spec::Any]),
    )]);
    assert_eq!(
        matches(&raw, &spec).unwrap_err(),
        MatchError::NoMatchFound {
            location: "3".to_string(),
            expected: Spec::from("index4"),
            remaining: strings(&["index0", "index1"]),
        }
    );
}

#[test]
fn test_no_match_found_reports_unclaimed() {
    let tree = Value::from(json!({"items": ["x", "y"]}));
    let spec = Spec::open_object([(
        "items",
        Spec::array([Spec::from("x"), Spec::from("z"), Spec::Any]),
    )]);
    assert_eq!(
        matches(&tree, &spec).unwrap_err(),
        MatchError::NoMatchFound {
            location: "items".to_string(),
            expected: Spec::from("z"),
            remaining: strings(&["y"]),
        }
    );
}

#[test]
fn test_greedy_assignment_does_not_backtrack() {
    // Regex to "ax" and literal to "ab" would work, but the regex comes
    // first and claims "ab".
    let tree = Value::from(json!(["ab", "ax"]));
    let spec = Spec::array([Spec::regex("^a").unwrap(), Spec::from("ab"), Spec::Any]);
    assert_eq!(
        matches(&tree, &spec).unwrap_err(),
        MatchError::NoMatchFound {
            location: String::new(),
            expected: Spec::from("ab"),
            remaining: strings(&["ax"]),
        }
    );

    let reordered = Spec::array([Spec::from("ab"), Spec::regex("^a").unwrap(), Spec::Any]);
    assert!(matches(&tree, &reordered).is_ok());
}

#[test]
fn test_null_handling() {
    let tree = Value::from(json!({"abc": null}));
    assert!(matches(&tree, &Spec::object([("abc", Spec::Null)])).is_ok());

    let tree = Value::from(json!({"abc": "not None"}));
    assert_eq!(
        matches(&tree, &Spec::object([("abc", Spec::Null)])).unwrap_err(),
        MatchError::TypeMismatch {
            location: "abc".to_string(),
            expected: Spec::Null,
            actual: Some(Value::from("not None")),
        }
    );
}

#[test]
fn test_datetime_match() {
    let tree = Value::from(json!({"created": "2024-01-11T11:11:11-08:00"}));
    let spec = Spec::object([("created", Spec::datetime("2024-01-11T13:11:11-06:00").unwrap())]);
    assert!(matches(&tree, &spec).is_ok());

    let tree = Value::from(json!({"created": "2024-01-11T11:11:11Z"}));
    let naive = chrono::NaiveDate::from_ymd_opt(2024, 1, 11)
        .and_then(|d| d.and_hms_opt(11, 11, 11))
        .unwrap();
    let spec = Spec::object([("created", Spec::naive_datetime(naive))]);
    assert!(matches(&tree, &spec).is_ok());
}

#[test]
fn test_datetime_mismatch() {
    let tree = Value::from(json!({"created": "2024-01-11T11:11:11-08:00"}));
    let expected = Spec::datetime("2025-01-13T13:13:13Z").unwrap();
    assert_eq!(
        matches(&tree, &Spec::object([("created", expected.clone())])).unwrap_err(),
        MatchError::DatetimeMismatch {
            location: "created".to_string(),
            expected,
            actual: Some(Value::from("2024-01-11T11:11:11-08:00")),
        }
    );

    let tree = Value::from(json!({"created": "yesterday"}));
    let expected = Spec::datetime("2024-01-11T13:11:11-06:00").unwrap();
    assert_eq!(
        matches(&tree, &Spec::object([("created", expected.clone())])).unwrap_err(),
        MatchError::TypeMismatch {
            location: "created".to_string(),
            expected,
            actual: Some(Value::from("yesterday")),
        }
    );
}

#[test]
fn test_numeric_timestamps_follow_config() {
    let tree = Value::from(json!({"at": 0}));
    let spec = Spec::object([("at", Spec::datetime("1970-01-01T00:00:00Z").unwrap())]);
    assert!(matches(&tree, &spec).is_ok());

    let config = Config {
        numeric_timestamps: false,
        ..Config::default()
    };
    let err = matches_with(&tree, &spec, &config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_decimal_match() {
    let tree = Value::from(json!({"amount": "0"}));
    assert!(matches(&tree, &Spec::object([("amount", Spec::decimal("0.00").unwrap())])).is_ok());

    let tree = Value::from(json!({"amount": "0.00"}));
    assert!(matches(&tree, &Spec::object([("amount", Spec::decimal("0").unwrap())])).is_ok());

    let tree = Value::from(json!({"n": "10.00"}));
    assert!(matches(&tree, &Spec::open_object([("n", Spec::decimal("10").unwrap())])).is_ok());
}

#[test]
fn test_decimal_mismatch() {
    let expected = Spec::decimal("234.56").unwrap();

    let tree = Value::from(json!({"amount": "123.45"}));
    assert_eq!(
        matches(&tree, &Spec::object([("amount", expected.clone())])).unwrap_err(),
        MatchError::ValueMismatch {
            location: "amount".to_string(),
            expected: expected.clone(),
            actual: Some(Value::Decimal(Decimal::new(12345, 2))),
        }
    );

    let tree = Value::from(json!({"amount": "not a number"}));
    assert_eq!(
        matches(&tree, &Spec::object([("amount", expected.clone())])).unwrap_err(),
        MatchError::TypeMismatch {
            location: "amount".to_string(),
            expected: expected.clone(),
            actual: Some(Value::from("not a number")),
        }
    );

    let tree = Value::from(json!({"amount": null}));
    assert_eq!(
        matches(&tree, &Spec::object([("amount", expected.clone())])).unwrap_err(),
        MatchError::TypeMismatch {
            location: "amount".to_string(),
            expected,
            actual: Some(Value::Null),
        }
    );
}

#[test]
fn test_first_failure_only() {
    let tree = Value::from(json!({"a": 1, "b": 2}));
    let spec = Spec::object([("a", Spec::from(10)), ("b", Spec::from(20))]);
    let err = matches(&tree, &spec).unwrap_err();
    assert_eq!(err.location(), "a");
}

#[test]
fn test_view_matches_combined_example() {
    let raw = raw_data();
    let data = DeepMap::from_value(&raw).unwrap();
    let spec = Spec::open_object([
        ("1", Spec::Any),
        ("3", Spec::array([Spec::from("index1"), Spec::Any])),
        (
            "4",
            Spec::array([
                Spec::open_object([("name", Spec::regex("ba.").unwrap())]),
                Spec::Any,
            ]),
        ),
    ]);
    assert!(data.matches(&spec).is_ok());
    assert!(data == spec);
}

#[test]
fn test_match_errors_render_location() {
    let raw = raw_data();
    let spec = Spec::open_object([("2", Spec::open_object([("a", Spec::from("B"))]))]);
    let err = matches(&raw, &spec).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"value mismatch at '2.a': expected "B", found "A""#
    );
}
