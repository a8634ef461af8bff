//! # Scherzo Domain
//!
//! Core types of the Scherzo framework composition root.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error kinds of the registry, settings and bootstrap |
//! | [`ports`] | Registry, settings and middleware contracts |
//! | [`value_objects`] | Responses, response slot and settings layers |
//! | [`constants`] | Well-known identifiers and group names |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result, RunState};
pub use ports::{
    Entry, Handler, Middleware, Next, Payload, Recipe, Registry, RegistryExt, Service, Settings,
    SettingsExt, TypeRef,
};
pub use value_objects::{Layer, Response, ResponseSlot};
