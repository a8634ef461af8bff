//! Configuration
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`store`] | Layered, immutable settings store |
//! | [`loader`] | TOML file + environment layer loading |
//! | [`types`] | Typed views of the `app` and `logging` groups |
//! | [`defaults`] | Built-in lowest-precedence layer |

pub mod defaults;
pub mod loader;
pub mod store;
pub mod types;

use figment::Figment;
use figment::providers::Serialized;
use scherzo_domain::constants::APP_GROUP;
use scherzo_domain::error::Result;
use scherzo_domain::value_objects::Layer;
use serde_json::Value;

use crate::error_ext::ErrorContext;

pub use defaults::default_layer;
pub use loader::ConfigLoader;
pub use store::Config;
pub use types::{AppSettings, LoggingConfig};

/// Merge the `app` group of every layer over the built-in app defaults
///
/// Used before the registry exists, to pick the registry and settings
/// implementations.
pub fn app_settings(layers: &[Layer]) -> Result<AppSettings> {
    layers
        .iter()
        .filter_map(|layer| layer.group(APP_GROUP))
        .fold(
            Figment::from(Serialized::defaults(AppSettings::default())),
            |figment, app: &Value| figment.admerge(Serialized::defaults(app.clone())),
        )
        .extract()
        .config_context("Invalid 'app' settings")
}
