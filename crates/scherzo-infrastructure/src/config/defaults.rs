//! Built-in defaults layer

use scherzo_domain::constants::{
    APP_GROUP, LOGGING_GROUP, MIDDLEWARE_GROUP, ROUTE_MIDDLEWARE_GROUP, ROUTES_GROUP,
    SERVICES_GROUP,
};
use scherzo_domain::value_objects::Layer;
use serde_json::{Value, json};

use super::types::{AppSettings, LoggingConfig};

/// Default `app` group
pub fn app_defaults() -> Value {
    serde_json::to_value(AppSettings::default()).unwrap_or_else(|_| json!({}))
}

/// Lowest-precedence layer merged under every run's settings
pub fn default_layer() -> Layer {
    Layer::new()
        .with_group(APP_GROUP, app_defaults())
        .with_group(SERVICES_GROUP, json!({}))
        .with_group(ROUTES_GROUP, json!({}))
        .with_group(MIDDLEWARE_GROUP, json!([]))
        .with_group(ROUTE_MIDDLEWARE_GROUP, json!({}))
        .with_group(
            LOGGING_GROUP,
            serde_json::to_value(LoggingConfig::default()).unwrap_or_else(|_| json!({})),
        )
}
