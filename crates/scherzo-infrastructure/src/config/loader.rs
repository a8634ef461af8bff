//! Configuration loader
//!
//! Builds a settings [`Layer`] from a TOML file and environment variables.
//! Sources are merged in this order (later sources override earlier):
//!
//! 1. TOML configuration file (explicit path, or the first default location found)
//! 2. Environment variables with prefix (e.g. `SCHERZO__APP__DEBUG=true`)
//!
//! Built-in defaults are not part of the loaded layer; the front controller
//! always merges them underneath.
//!
//! Environment variable names carry no case, so an override takes the
//! spelling of the file key it matches case-insensitively
//! (`SCHERZO__ROUTEMIDDLEWARE` overrides `routeMiddleware`). Keys the file
//! does not define are added in lowercase.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use scherzo_domain::error::Result;
use scherzo_domain::value_objects::Layer;
use serde_json::{Map, Value};

use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load one layer from the file and the environment
    pub fn load(&self) -> Result<Layer> {
        let mut figment = Figment::new();

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => log_config_loaded(config_path, false),
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        let mut groups: Map<String, Value> = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        // Double underscore separates nesting so single underscores survive in keys
        let overrides: Map<String, Value> =
            Figment::from(Env::prefixed(&format!("{}__", self.env_prefix)).split("__"))
                .extract()
                .config_context("Failed to extract environment overrides")?;
        merge_overrides(&mut groups, overrides);

        Layer::from_value(Value::Object(groups))
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge `overrides` into `base`, matching keys case-insensitively
///
/// Tables merge recursively; any other value replaces the existing one.
fn merge_overrides(base: &mut Map<String, Value>, overrides: Map<String, Value>) {
    for (key, value) in overrides {
        let key = base
            .keys()
            .find(|existing| existing.eq_ignore_ascii_case(&key))
            .cloned()
            .unwrap_or(key);
        match (base.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_overrides(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
