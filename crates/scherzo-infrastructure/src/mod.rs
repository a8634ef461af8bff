//! # Infrastructure Layer
//!
//! Implementations of the domain ports plus the bootstrap that wires them
//! together for a single run.
//!
//! ## Module Categories
//!
//! ### Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Lazy service container and named service catalog |
//! | [`pipeline`] | Short-circuitable handler chain |
//! | [`bootstrap`] | Front controller, error reporting, emitters |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered settings store and TOML/env loader |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod pipeline;

// Re-export commonly used types
pub use bootstrap::{ErrorController, FrontController, NullEmitter, WriterEmitter};
pub use config::{Config, ConfigLoader};
pub use di::{Container, ServiceCatalog};
pub use error_ext::ErrorContext;
pub use pipeline::{HandlerStack, StepSpec};
