//! Infrastructure constants

/// Environment variable prefix for configuration (`SCHERZO__GROUP__KEY`)
pub const CONFIG_ENV_PREFIX: &str = "SCHERZO";

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "SCHERZO_LOG";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "scherzo.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "scherzo";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Name of the default registry implementation
pub const DEFAULT_CONTAINER_KIND: &str = "container";

/// Name of the default settings store implementation
pub const DEFAULT_CONFIG_KIND: &str = "config";

/// Selector of the front controller's fallback step
pub const FALLBACK_SELECTOR: &str = "fallback";

/// Label of the appended fallback step
pub const FALLBACK_LABEL: &str = "Fallback response";

/// Message used for error responses when debug output is off
pub const GENERIC_ERROR_MESSAGE: &str = "Internal Server Error";
