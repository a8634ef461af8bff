//! Layered settings store
//!
//! Default [`Settings`] implementation. Layers are folded with Figment's
//! `admerge` strategy: maps merge recursively, arrays are concatenated and
//! any other value is replaced by the later layer.
//!
//! ```text
//! defaults ─┐
//! file     ─┼─ admerge ─► groups (read-only)
//! host     ─┘
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use figment::Figment;
use figment::providers::Serialized;
use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Recipe, Settings};
use scherzo_domain::value_objects::Layer;
use serde_json::{Map, Value};

use crate::error_ext::ErrorContext;

/// Immutable settings built from ordered layers
#[derive(Debug, Clone, Default)]
pub struct Config {
    groups: Map<String, Value>,
    services: BTreeMap<String, Recipe>,
}

impl Config {
    /// Merge `layers` in order; later layers win or extend
    pub fn from_layers(layers: &[Layer]) -> Result<Self> {
        let figment = layers.iter().fold(Figment::new(), |figment, layer| {
            figment.admerge(Serialized::defaults(layer.groups().clone()))
        });
        let groups: Map<String, Value> = figment
            .extract()
            .config_context("Failed to merge settings layers")?;

        let services = layers
            .iter()
            .flat_map(|layer| layer.services().iter())
            .map(|(id, recipe)| (id.clone(), recipe.clone()))
            .collect();

        Ok(Self { groups, services })
    }

    /// Merge `layers` into a store behind a trait object
    pub fn shared(layers: &[Layer]) -> Result<Arc<dyn Settings>> {
        Ok(Arc::new(Self::from_layers(layers)?))
    }

    /// All groups as one JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.groups
    }

    /// Render the merged groups as a TOML document
    ///
    /// Fails when a value has no TOML form, such as `null`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.groups).config_context("Settings cannot be rendered as TOML")
    }
}

impl Settings for Config {
    fn get(
        &self,
        group: &str,
        key: Option<&str>,
        default: Option<Value>,
        throw_on_missing: bool,
    ) -> Result<Option<Value>> {
        let Some(values) = self.groups.get(group) else {
            if throw_on_missing {
                return Err(Error::group_not_found(group));
            }
            return Ok(default);
        };
        let Some(key) = key else {
            return Ok(Some(values.clone()));
        };
        match values.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None if throw_on_missing => Err(Error::setting_not_found(group, key)),
            None => Ok(default),
        }
    }

    fn groups(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    fn services(&self) -> BTreeMap<String, Recipe> {
        self.services.clone()
    }
}
