//! Settings Store Port
//!
//! Settings are organised in named groups (`app`, `services`, `middleware`,
//! ...). A store is built once from ordered layers and never changes.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::ports::registry::Recipe;

/// Immutable, layered settings lookup
pub trait Settings: Send + Sync {
    /// Look up a group, or a key within a group
    ///
    /// With `key` omitted the whole group is returned. A missing group or
    /// key yields `default`, or [`Error::SettingNotFound`] when
    /// `throw_on_missing` is set.
    fn get(
        &self,
        group: &str,
        key: Option<&str>,
        default: Option<Value>,
        throw_on_missing: bool,
    ) -> Result<Option<Value>>;

    /// Names of every group
    fn groups(&self) -> Vec<String>;

    /// Inline service recipes merged from the layers
    fn services(&self) -> BTreeMap<String, Recipe>;
}

/// Convenience accessors over any [`Settings`]
pub trait SettingsExt {
    /// A whole group, if present
    fn group(&self, group: &str) -> Option<Value>;

    /// A key within a group, if present
    fn value(&self, group: &str, key: &str) -> Option<Value>;

    /// A key within a group, or `default`
    fn value_or(&self, group: &str, key: &str, default: Value) -> Value;

    /// A group (`key` omitted) or key that must be present
    fn require(&self, group: &str, key: Option<&str>) -> Result<Value>;

    /// A group or key deserialized into `T`, `None` when absent
    fn extract<T: DeserializeOwned>(&self, group: &str, key: Option<&str>) -> Result<Option<T>>;
}

impl<S: Settings + ?Sized> SettingsExt for S {
    fn group(&self, group: &str) -> Option<Value> {
        self.get(group, None, None, false).ok().flatten()
    }

    fn value(&self, group: &str, key: &str) -> Option<Value> {
        self.get(group, Some(key), None, false).ok().flatten()
    }

    fn value_or(&self, group: &str, key: &str, default: Value) -> Value {
        self.value(group, key).unwrap_or(default)
    }

    fn require(&self, group: &str, key: Option<&str>) -> Result<Value> {
        self.get(group, key, None, true)?.ok_or_else(|| match key {
            Some(key) => Error::setting_not_found(group, key),
            None => Error::group_not_found(group),
        })
    }

    fn extract<T: DeserializeOwned>(&self, group: &str, key: Option<&str>) -> Result<Option<T>> {
        let Some(value) = self.get(group, key, None, false)? else {
            return Ok(None);
        };
        let location = match key {
            Some(key) => format!("{group}.{key}"),
            None => group.to_string(),
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::configuration_with_source(format!("Invalid setting '{location}'"), e))
    }
}
