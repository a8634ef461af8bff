//! Settings layers
//!
//! A layer is one source of settings: built-in defaults, a configuration
//! file, environment variables or values supplied by the host program.
//! Layers are merged in order by the settings store.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::ports::registry::Recipe;

/// One layer of settings groups plus inline service recipes
#[derive(Debug, Clone, Default)]
pub struct Layer {
    groups: Map<String, Value>,
    services: BTreeMap<String, Recipe>,
}

impl Layer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from a JSON object whose keys are group names
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(groups) => Ok(Self {
                groups,
                services: BTreeMap::new(),
            }),
            other => Err(Error::configuration(format!(
                "A settings layer must be an object of groups, got {other}"
            ))),
        }
    }

    /// Set a whole group, replacing any previous value in this layer
    #[must_use]
    pub fn with_group<S: Into<String>>(mut self, name: S, value: Value) -> Self {
        self.groups.insert(name.into(), value);
        self
    }

    /// Add an inline service recipe
    #[must_use]
    pub fn with_service<S: Into<String>>(mut self, id: S, recipe: Recipe) -> Self {
        self.services.insert(id.into(), recipe);
        self
    }

    /// Groups in this layer
    pub fn groups(&self) -> &Map<String, Value> {
        &self.groups
    }

    /// A single group in this layer
    pub fn group(&self, name: &str) -> Option<&Value> {
        self.groups.get(name)
    }

    /// Inline service recipes in this layer
    pub fn services(&self) -> &BTreeMap<String, Recipe> {
        &self.services
    }

    /// True if the layer carries neither groups nor services
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.services.is_empty()
    }
}
