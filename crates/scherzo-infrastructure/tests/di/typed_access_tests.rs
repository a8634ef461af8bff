//! Typed Access Tests

use std::sync::Arc;

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{
    Handler, Middleware, Next, Recipe, Registry, RegistryExt, Service, SettingsExt,
};
use scherzo_domain::value_objects::{Layer, Response, ResponseSlot};
use scherzo_infrastructure::config::Config;
use scherzo_infrastructure::di::Container;
use serde_json::json;

struct Greeter {
    id: String,
    greeting: String,
}

impl Service for Greeter {
    fn create(registry: &dyn Registry, id: &str) -> Result<Self> {
        let greeting = registry
            .settings()?
            .value(id, "greeting")
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_else(|| "Hello".to_string());
        Ok(Self {
            id: id.to_string(),
            greeting,
        })
    }
}

impl Middleware for Greeter {
    fn handle(&self, selector: &str, _next: Next<'_, '_>) -> Result<Response> {
        match selector {
            "greet" => Ok(Response::text(self.greeting.clone())),
            other => Err(Error::unknown_selector(self.id.clone(), other)),
        }
    }
}

fn container_with_settings() -> Container {
    let container = Container::new();
    let settings =
        Config::shared(&[Layer::new().with_group("welcome", json!({ "greeting": "Howdy" }))])
            .unwrap();
    container.set("config", Arc::new(settings));
    container
}

#[test]
fn test_type_recipe_receives_identifier() {
    let container = container_with_settings();
    container.define_type::<Greeter>("welcome");

    let greeter = container.get_as::<Greeter>("welcome").unwrap();

    assert_eq!(greeter.id, "welcome");
    assert_eq!(greeter.greeting, "Howdy");
}

#[test]
fn test_middleware_recipe() {
    let container = container_with_settings();
    container.define("welcome", Recipe::middleware::<Greeter>());

    let middleware = container.middleware("welcome").unwrap();
    let handlers: Vec<Handler<'_>> = Vec::new();
    let response = middleware.handle("greet", Next::new(&handlers, None)).unwrap();

    assert_eq!(response.body, "Howdy");
}

#[test]
fn test_type_mismatch() {
    let container = Container::new();
    container.set_value("answer", 42_u32);

    assert!(matches!(
        container.get_as::<String>("answer"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        container.middleware("answer"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_response_slot_accessor() {
    let container = Container::new();
    container.set("response", Arc::new(ResponseSlot::new()));

    container
        .response()
        .unwrap()
        .set(Response::text("shared"));

    assert_eq!(
        container.response().unwrap().current().map(|r| r.body),
        Some("shared".to_string())
    );
}

#[test]
fn test_settings_accessor_requires_config() {
    let container = Container::new();

    assert!(matches!(container.settings(), Err(Error::NotFound { .. })));
}
