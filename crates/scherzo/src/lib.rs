//! # Scherzo
//!
//! Composition root for small request-handling programs: a lazy service
//! container, layered settings and a short-circuitable handler chain, run
//! once by a front controller that always answers.
//!
//! ## Example
//!
//! ```ignore
//! use scherzo::domain::{Layer, Recipe, Response};
//! use scherzo::infrastructure::FrontController;
//!
//! struct Greeter;
//!
//! let response = FrontController::new()
//!     .with_handler("Greet", |registry, _next| {
//!         registry.get("greeter")?;
//!         Ok(Response::text("Hello"))
//!     })
//!     .run(vec![Layer::new().with_service("greeter", Recipe::factory(|_| Ok(Greeter)))])?;
//! assert_eq!(response.body, "Hello");
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error kinds, value objects and port traits
//! - `infrastructure` - Container, settings store, handler chain, bootstrap
//! - `services` - Service types available to settings files by name

pub mod services;

/// Domain layer - error kinds, value objects and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use scherzo_domain::*;
}

/// Infrastructure layer - container, settings, chain and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use scherzo_infrastructure::*;
}

pub use scherzo_domain::{Error, Layer, Response, Result};
pub use scherzo_infrastructure::FrontController;

use scherzo_infrastructure::ServiceCatalog;

/// Catalog holding the service types shipped with Scherzo
pub fn builtin_catalog() -> ServiceCatalog {
    let mut catalog = ServiceCatalog::new();
    catalog.register_middleware::<services::StaticResponder>(
        services::STATIC_RESPONDER_TYPE,
        "Answers with a body and status read from its settings group",
    );
    catalog
}

/// Front controller using [`builtin_catalog`]
pub fn front_controller() -> FrontController {
    FrontController::new().with_catalog(builtin_catalog())
}
