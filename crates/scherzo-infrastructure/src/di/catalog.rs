//! Named service types
//!
//! Settings files cannot carry code, so the `services` group may name a
//! service type instead of holding a recipe:
//!
//! ```toml
//! [services]
//! greeter = "app.greeter"
//! ```
//!
//! The name is looked up in a [`ServiceCatalog`] populated by the host
//! program before the run.

use std::collections::BTreeMap;

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Middleware, Recipe, Service};

/// Catalog entry for a named service type
#[derive(Debug, Clone)]
pub struct ServiceEntry {
    /// Human-readable description
    pub description: String,
    /// Recipe used when a settings file names this type
    pub recipe: Recipe,
}

/// Named recipes available to the `services` settings group
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    entries: BTreeMap<String, ServiceEntry>,
}

impl ServiceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recipe under `name`, replacing any previous one
    pub fn register<N, D>(&mut self, name: N, description: D, recipe: Recipe) -> &mut Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        self.entries.insert(
            name.into(),
            ServiceEntry {
                description: description.into(),
                recipe,
            },
        );
        self
    }

    /// Register a constructible service type under `name`
    pub fn register_type<T: Service>(&mut self, name: &str, description: &str) -> &mut Self {
        self.register(name, description, Recipe::of::<T>())
    }

    /// Register a chain step target type under `name`
    pub fn register_middleware<T: Service + Middleware>(
        &mut self,
        name: &str,
        description: &str,
    ) -> &mut Self {
        self.register(name, description, Recipe::middleware::<T>())
    }

    /// Recipe registered under `name`
    ///
    /// The error lists the available names to help fix settings files.
    pub fn resolve(&self, name: &str) -> Result<Recipe> {
        self.entries
            .get(name)
            .map(|entry| entry.recipe.clone())
            .ok_or_else(|| {
                let available: Vec<&str> = self.entries.keys().map(String::as_str).collect();
                Error::configuration(format!(
                    "Unknown service type '{name}'. Available types: {available:?}"
                ))
            })
    }

    /// True if `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// `(name, description)` of every registered type
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.description.as_str()))
            .collect()
    }
}
