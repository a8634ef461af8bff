//! Configuration Loader Tests

use std::{env, fs};

use scherzo_domain::constants::APP_GROUP;
use scherzo_infrastructure::config::ConfigLoader;
use serde_json::json;
use tempfile::TempDir;

/// Helper to set env var safely
fn set_env(key: &str, value: &str) {
    // SAFETY: each test uses its own prefix and env access goes through std
    unsafe {
        env::set_var(key, value);
    }
}

/// Helper to remove env var safely
fn remove_env(key: &str) {
    // SAFETY: each test uses its own prefix and env access goes through std
    unsafe {
        env::remove_var(key);
    }
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scherzo.toml");
    fs::write(
        &path,
        r#"
[app]
debug = true
name = "from-file"

[services]
greeter = "app.greeter"
"#,
    )
    .unwrap();

    let layer = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("SCHERZO_TEST_FILE_ONLY")
        .load()
        .unwrap();

    assert_eq!(
        layer.group(APP_GROUP),
        Some(&json!({ "debug": true, "name": "from-file" }))
    );
    assert_eq!(
        layer.group("services"),
        Some(&json!({ "greeter": "app.greeter" }))
    );
}

#[test]
fn test_missing_explicit_file_yields_empty_layer() {
    let dir = TempDir::new().unwrap();

    let loader = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .with_env_prefix("SCHERZO_TEST_ABSENT");
    let layer = loader.load().unwrap();

    assert!(layer.is_empty());
    assert!(loader.config_path().is_some());
}

#[test]
fn test_invalid_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[app\ndebug = ").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("SCHERZO_TEST_BROKEN")
        .load();

    assert!(matches!(
        result,
        Err(scherzo_domain::Error::Configuration { .. })
    ));
}

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scherzo.toml");
    fs::write(&path, "[app]\nname = \"from-file\"\n").unwrap();

    set_env("SCHERZO_TEST_ENV__APP__NAME", "from-env");
    let layer = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("SCHERZO_TEST_ENV")
        .load();
    remove_env("SCHERZO_TEST_ENV__APP__NAME");

    let layer = layer.unwrap();
    assert_eq!(layer.group(APP_GROUP), Some(&json!({ "name": "from-env" })));
}

#[test]
fn test_environment_matches_file_keys_ignoring_case() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scherzo.toml");
    fs::write(
        &path,
        "[staticResponder]\ncontentType = \"text/plain\"\nstatus = 200\n",
    )
    .unwrap();

    set_env("SCHERZO_TEST_CASE__STATICRESPONDER__CONTENTTYPE", "application/json");
    set_env("SCHERZO_TEST_CASE__STATICRESPONDER__EXTRAHEADER", "added");
    let layer = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("SCHERZO_TEST_CASE")
        .load();
    remove_env("SCHERZO_TEST_CASE__STATICRESPONDER__CONTENTTYPE");
    remove_env("SCHERZO_TEST_CASE__STATICRESPONDER__EXTRAHEADER");

    let layer = layer.unwrap();
    assert_eq!(
        layer.group("staticResponder"),
        Some(&json!({
            "contentType": "application/json",
            "status": 200,
            "extraheader": "added"
        }))
    );
    assert_eq!(layer.group("staticresponder"), None);
}
