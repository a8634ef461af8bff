//! Settings Extension Tests

use std::collections::BTreeMap;

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Recipe, Settings, SettingsExt};
use serde::Deserialize;
use serde_json::{Map, Value, json};

struct MapSettings(Map<String, Value>);

impl Settings for MapSettings {
    fn get(
        &self,
        group: &str,
        key: Option<&str>,
        default: Option<Value>,
        throw_on_missing: bool,
    ) -> Result<Option<Value>> {
        let found = match (self.0.get(group), key) {
            (Some(values), Some(key)) => values.get(key).cloned(),
            (values, None) => values.cloned(),
            (None, Some(_)) => None,
        };
        match (found, key) {
            (Some(value), _) => Ok(Some(value)),
            (None, Some(key)) if throw_on_missing => Err(Error::setting_not_found(group, key)),
            (None, None) if throw_on_missing => Err(Error::group_not_found(group)),
            (None, _) => Ok(default),
        }
    }

    fn groups(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    fn services(&self) -> BTreeMap<String, Recipe> {
        BTreeMap::new()
    }
}

fn settings() -> MapSettings {
    let Value::Object(groups) = json!({
        "app": { "debug": true, "name": "demo" },
        "limits": { "retries": 3 },
    }) else {
        unreachable!()
    };
    MapSettings(groups)
}

#[test]
fn test_group_and_value() {
    let settings = settings();

    assert_eq!(settings.value("app", "name"), Some(json!("demo")));
    assert!(settings.group("limits").is_some());
    assert!(settings.group("missing").is_none());
    assert!(settings.value("app", "missing").is_none());
}

#[test]
fn test_value_or_default() {
    let settings = settings();

    assert_eq!(settings.value_or("app", "missing", json!(7)), json!(7));
    assert_eq!(settings.value_or("app", "debug", json!(false)), json!(true));
}

#[test]
fn test_require_reports_missing() {
    let settings = settings();

    assert!(matches!(
        settings.require("app", Some("missing")),
        Err(Error::SettingNotFound { key: Some(_), .. })
    ));
    assert!(matches!(
        settings.require("missing", None),
        Err(Error::SettingNotFound { key: None, .. })
    ));
    assert_eq!(settings.require("limits", Some("retries")).unwrap(), json!(3));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Limits {
    retries: u32,
}

#[test]
fn test_extract_typed_group() {
    let settings = settings();

    let limits: Option<Limits> = settings.extract("limits", None).unwrap();
    assert_eq!(limits, Some(Limits { retries: 3 }));

    let missing: Option<Limits> = settings.extract("missing", None).unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_extract_invalid_value() {
    let settings = settings();

    let result = settings.extract::<Limits>("app", None);
    match result {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("app")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}
