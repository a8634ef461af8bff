//! Bootstrap
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`front_controller`] | Runs one request from layers to emitted response |
//! | [`implementations`] | Named registry and settings store implementations |
//! | [`error_controller`] | Default report for uncaught failures |
//! | [`emitter`] | Response delivery |
//! | [`panic_scope`] | Scoped panic hook and panic conversion |

pub mod emitter;
pub mod error_controller;
pub mod front_controller;
pub mod implementations;
pub mod panic_scope;

pub use emitter::{Emitter, NullEmitter, WriterEmitter};
pub use error_controller::{ErrorController, UncaughtHandler};
pub use front_controller::{FrontController, InlineFn};
pub use implementations::{Implementations, RegistryFactory, SettingsFactory};
pub use panic_scope::PanicScope;
