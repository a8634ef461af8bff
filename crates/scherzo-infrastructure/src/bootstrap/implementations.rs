//! Registry and settings implementations
//!
//! The `app.container` and `app.config` settings pick, by name, which
//! registry and settings store a run uses.

use std::collections::BTreeMap;
use std::sync::Arc;

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Registry, Settings};
use scherzo_domain::value_objects::Layer;

use crate::config::Config;
use crate::constants::{DEFAULT_CONFIG_KIND, DEFAULT_CONTAINER_KIND};
use crate::di::Container;

/// Builds an empty registry
pub type RegistryFactory = fn() -> Box<dyn Registry>;

/// Builds a settings store from ordered layers
pub type SettingsFactory = fn(&[Layer]) -> Result<Arc<dyn Settings>>;

/// Named registry and settings store implementations
#[derive(Clone)]
pub struct Implementations {
    registries: BTreeMap<String, RegistryFactory>,
    settings: BTreeMap<String, SettingsFactory>,
}

impl Implementations {
    /// Table holding only the built-in `container` and `config` kinds
    pub fn new() -> Self {
        let mut implementations = Self {
            registries: BTreeMap::new(),
            settings: BTreeMap::new(),
        };
        implementations
            .register_registry(DEFAULT_CONTAINER_KIND, Container::boxed)
            .register_settings(DEFAULT_CONFIG_KIND, Config::shared);
        implementations
    }

    /// Register a registry implementation under `kind`
    pub fn register_registry(&mut self, kind: &str, factory: RegistryFactory) -> &mut Self {
        self.registries.insert(kind.to_string(), factory);
        self
    }

    /// Register a settings store implementation under `kind`
    pub fn register_settings(&mut self, kind: &str, factory: SettingsFactory) -> &mut Self {
        self.settings.insert(kind.to_string(), factory);
        self
    }

    /// Build the registry registered as `kind`
    pub fn registry(&self, kind: &str) -> Result<Box<dyn Registry>> {
        let factory = self.registries.get(kind).ok_or_else(|| {
            Error::configuration(format!(
                "Unknown container implementation '{kind}'. Available: {:?}",
                self.registries.keys().collect::<Vec<_>>()
            ))
        })?;
        Ok(factory())
    }

    /// Build the settings store registered as `kind` from `layers`
    pub fn settings(&self, kind: &str, layers: &[Layer]) -> Result<Arc<dyn Settings>> {
        let factory = self.settings.get(kind).ok_or_else(|| {
            Error::configuration(format!(
                "Unknown config implementation '{kind}'. Available: {:?}",
                self.settings.keys().collect::<Vec<_>>()
            ))
        })?;
        factory(layers)
    }
}

impl Default for Implementations {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Implementations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Implementations")
            .field("registries", &self.registries.keys().collect::<Vec<_>>())
            .field("settings", &self.settings.keys().collect::<Vec<_>>())
            .finish()
    }
}
