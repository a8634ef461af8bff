//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used as the cause of wrapping variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Stage of a front controller run
///
/// Carried by [`Error::Bootstrap`] so the error reporter can tell where the
/// run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Nothing has happened yet
    Idle,
    /// Merging app settings and building the registry and settings store
    Configuring,
    /// Service definitions are registered
    ServicesRegistered,
    /// The handler chain is assembled
    ChainBuilt,
    /// The handler chain is running
    Invoking,
    /// A response was produced and emitted
    Completed,
    /// The run failed and is waiting for the error reporter
    Failed,
    /// The error reporter is producing a response
    ErrorReporting,
    /// The error reporter itself failed
    FatalAbort,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Configuring => "configuring",
            Self::ServicesRegistered => "services-registered",
            Self::ChainBuilt => "chain-built",
            Self::Invoking => "invoking",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::ErrorReporting => "error-reporting",
            Self::FatalAbort => "fatal-abort",
        };
        f.write_str(name)
    }
}

/// Main error type for the Scherzo core
#[derive(Error, Debug)]
pub enum Error {
    /// The registry has neither an entry nor a definition for the identifier
    #[error("Entry '{id}' does not exist in this container")]
    NotFound {
        /// The identifier that was requested
        id: String,
    },

    /// A definition exists but invoking or constructing it failed
    #[error("Could not retrieve entry '{id}': {source}")]
    Resolution {
        /// The identifier being resolved
        id: String,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// A definition requested itself while being resolved
    #[error("Circular dependency while resolving '{id}': {}", .path.join(" -> "))]
    CircularDependency {
        /// The identifier requested a second time
        id: String,
        /// Resolution path, ending with the repeated identifier
        path: Vec<String>,
    },

    /// The entry exists but holds a value of another type
    #[error("Entry '{id}' is not a {expected}")]
    TypeMismatch {
        /// The identifier that was requested
        id: String,
        /// The type the caller asked for
        expected: &'static str,
    },

    /// A required settings group or key is absent
    #[error("{}", setting_not_found_message(.group, .key.as_deref()))]
    SettingNotFound {
        /// The settings group
        group: String,
        /// The key within the group, `None` when the group itself is missing
        key: Option<String>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A chain step asked a middleware for a selector it does not provide
    #[error("'{target}' has no middleware named '{selector}'")]
    UnknownSelector {
        /// The step target
        target: String,
        /// The selector that was requested
        selector: String,
    },

    /// The last handler in the chain delegated to a remainder that is empty
    #[error("Handler chain finished without producing a response")]
    ChainExhausted,

    /// A panic caught while running the front controller
    #[error("Panic: {message}")]
    Panic {
        /// The panic payload rendered as text
        message: String,
    },

    /// Failure raised by a service or handler implementation
    #[error("Service error: {message}")]
    Service {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Uncaught failure of a front controller run
    #[error("Bootstrap failed while {stage}: {source}")]
    Bootstrap {
        /// The stage that was active when the failure happened
        stage: RunState,
        /// The failure
        #[source]
        source: Box<Error>,
    },

    /// The error reporter failed while handling a bootstrap failure
    #[error("Error ({secondary}) handling previous error ({original})")]
    Fatal {
        /// The failure the reporter was handling
        #[source]
        original: Box<Error>,
        /// The failure raised by the reporter
        secondary: Box<Error>,
    },
}

fn setting_not_found_message(group: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("Configuration key '{key}' does not exist in group '{group}'"),
        None => format!("Configuration group '{group}' does not exist"),
    }
}

// Registry error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Wrap a failure raised while resolving `id`
    pub fn resolution<S: Into<String>>(id: S, source: Error) -> Self {
        Self::Resolution {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<S: Into<String>>(id: S, expected: &'static str) -> Self {
        Self::TypeMismatch {
            id: id.into(),
            expected,
        }
    }

    /// True if this is a [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Settings error creation methods
impl Error {
    /// Create a missing settings group error
    pub fn group_not_found<S: Into<String>>(group: S) -> Self {
        Self::SettingNotFound {
            group: group.into(),
            key: None,
        }
    }

    /// Create a missing settings key error
    pub fn setting_not_found<G: Into<String>, K: Into<String>>(group: G, key: K) -> Self {
        Self::SettingNotFound {
            group: group.into(),
            key: Some(key.into()),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Service and I/O error creation methods
impl Error {
    /// Create a service error
    pub fn service<S: Into<String>>(message: S) -> Self {
        Self::Service {
            message: message.into(),
            source: None,
        }
    }

    /// Create a service error with source
    pub fn service_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Service {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unknown selector error
    pub fn unknown_selector<T: Into<String>, S: Into<String>>(target: T, selector: S) -> Self {
        Self::UnknownSelector {
            target: target.into(),
            selector: selector.into(),
        }
    }
}

// Bootstrap error creation methods
impl Error {
    /// Wrap an uncaught run failure with the stage it happened in
    pub fn bootstrap(stage: RunState, source: Error) -> Self {
        Self::Bootstrap {
            stage,
            source: Box::new(source),
        }
    }

    /// Combine a bootstrap failure with the reporter failure it caused
    pub fn fatal(original: Error, secondary: Error) -> Self {
        Self::Fatal {
            original: Box::new(original),
            secondary: Box::new(secondary),
        }
    }

    /// Messages of this error and every error in its `source()` chain
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = std::error::Error::source(self);
        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }
        messages
    }
}
