//! Structured logging with tracing
//!
//! Configures the global subscriber for the `scherzo` binary. Library code
//! only emits events; installing a subscriber is the host program's call.

use std::path::Path;

use scherzo_domain::error::{Error, Result};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::LOG_ENV_VAR;

pub use crate::config::LoggingConfig;

/// Initialize logging with the provided configuration
///
/// `SCHERZO_LOG` overrides the configured level with a full filter
/// directive. Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("scherzo.log")),
        )
    });

    // The json and plain layers have different types, hence the branches
    let registry = Registry::default().with(filter);
    let result = if config.json_format {
        let stdout = fmt::layer().json().with_target(true).with_writer(std::io::stderr);
        match file_appender {
            Some(appender) => registry
                .with(stdout)
                .with(fmt::layer().json().with_writer(appender).with_ansi(false))
                .try_init(),
            None => registry.with(stdout).try_init(),
        }
    } else {
        let stdout = fmt::layer().with_target(true).with_writer(std::io::stderr);
        match file_appender {
            Some(appender) => registry
                .with(stdout)
                .with(fmt::layer().with_writer(appender).with_ansi(false))
                .try_init(),
            None => registry.with(stdout).try_init(),
        }
    };
    result.map_err(|e| Error::configuration_with_source("Failed to initialize logging", e))?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
