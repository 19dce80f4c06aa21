use deepquill::config::Config;
use deepquill::document::node::Value;
use deepquill::matcher::{matches_with, Spec};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert!(config.datetime_formats.is_empty());
    assert!(config.numeric_timestamps);
    assert!(config.decimal_from_numbers);
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/deepquill/config.toml"));
    }
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        datetime_formats: vec!["%d/%m/%Y".to_string(), "%Y%m%dT%H%M%S".to_string()],
        numeric_timestamps: false,
        decimal_from_numbers: true,
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "numeric_timestamps = false\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.numeric_timestamps);
    assert!(config.decimal_from_numbers);
    assert!(config.datetime_formats.is_empty());
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "numeric_timestamps = \"maybe\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(Config::load_from(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_loaded_formats_drive_matching() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "datetime_formats = [\"%d/%m/%Y %H:%M\"]\n").unwrap();
    let config = Config::load_from(&path).unwrap();

    let tree = Value::from(json!({"at": "11/01/2024 13:05"}));
    let spec = Spec::object([("at", Spec::datetime("2024-01-11T13:05:00Z").unwrap())]);
    assert!(matches_with(&tree, &spec, &config).is_ok());
    assert!(matches_with(&tree, &spec, &Config::default()).is_err());
}

#[test]
fn test_decimal_from_numbers_toggle() {
    let tree = Value::from(json!({"amount": 3}));
    let spec = Spec::object([("amount", Spec::decimal("3.00").unwrap())]);
    assert!(matches_with(&tree, &spec, &Config::default()).is_ok());

    let config = Config {
        decimal_from_numbers: false,
        ..Config::default()
    };
    assert!(matches_with(&tree, &spec, &config).is_err());
}
