//! Implementation Table Tests

use std::sync::Arc;

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Registry, Settings, SettingsExt};
use scherzo_domain::value_objects::Layer;
use scherzo_infrastructure::bootstrap::Implementations;
use scherzo_infrastructure::config::Config;
use scherzo_infrastructure::di::Container;
use serde_json::json;

fn frozen_settings(_layers: &[Layer]) -> Result<Arc<dyn Settings>> {
    Config::shared(&[Layer::new().with_group("app", json!({ "name": "frozen" }))])
}

fn seeded_container() -> Box<dyn Registry> {
    let container = Container::new();
    container.set("seed", Arc::new(1_u8));
    Box::new(container)
}

#[test]
fn test_builtin_kinds() {
    let implementations = Implementations::new();

    let registry = implementations.registry("container").unwrap();
    assert!(registry.ids().is_empty());

    let layers = [Layer::new().with_group("app", json!({ "name": "demo" }))];
    let settings = implementations.settings("config", &layers).unwrap();
    assert_eq!(settings.value("app", "name"), Some(json!("demo")));
}

#[test]
fn test_custom_kinds() {
    let mut implementations = Implementations::default();
    implementations
        .register_registry("seeded", seeded_container)
        .register_settings("frozen", frozen_settings);

    let registry = implementations.registry("seeded").unwrap();
    assert!(registry.has("seed"));

    let settings = implementations.settings("frozen", &[]).unwrap();
    assert_eq!(settings.value("app", "name"), Some(json!("frozen")));
}

#[test]
fn test_unknown_kinds() {
    let implementations = Implementations::new();

    assert!(matches!(
        implementations.registry("nope"),
        Err(Error::Configuration { .. })
    ));
    assert!(matches!(
        implementations.settings("nope", &[]),
        Err(Error::Configuration { .. })
    ));
}
