//! Typed views of settings groups

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONFIG_KIND, DEFAULT_CONTAINER_KIND, DEFAULT_LOG_LEVEL};

/// The `app` group
///
/// Read before the registry exists, so it only names implementations and
/// flags that the front controller itself needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    /// Registry implementation name
    pub container: String,
    /// Settings store implementation name
    pub config: String,
    /// Include error details in error responses
    pub debug: bool,
    /// Application name, used in logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER_KIND.to_string(),
            config: DEFAULT_CONFIG_KIND.to_string(),
            debug: false,
            name: None,
        }
    }
}

/// The `logging` group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json_format: bool,
    /// Also write to a daily rolling file at this path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
