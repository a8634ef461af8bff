//! Domain Port Interfaces
//!
//! Contracts between the bootstrap and its collaborators:
//!
//! - **registry** - lazy service definitions and realized entries
//! - **settings** - immutable, layered settings groups
//! - **pipeline** - handler chain steps and the remainder of the chain

/// Handler chain contracts
pub mod pipeline;
/// Service registry contracts
pub mod registry;
/// Settings store contracts
pub mod settings;

pub use pipeline::{Handler, Middleware, Next, Payload};
pub use registry::{Entry, Recipe, Registry, RegistryExt, Service, TypeRef};
pub use settings::{Settings, SettingsExt};
