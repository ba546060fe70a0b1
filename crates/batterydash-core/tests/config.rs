use batterydash_core::config::DashboardConfig;
use batterydash_core::error::ConfigError;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = DashboardConfig {
        endpoint: "http://pack-01.local:8080/api/battery-data".to_string(),
        poll_interval_ms: 500,
        demo_mode: false,
        log_file: Some(PathBuf::from("/tmp/dash.log")),
    };
    config.save(&path).unwrap();

    let loaded = DashboardConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_explicit_missing_path_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = DashboardConfig::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(p) if p == path));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ endpoint: nope").unwrap();

    let err = DashboardConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
