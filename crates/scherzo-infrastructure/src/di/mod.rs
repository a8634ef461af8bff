//! Dependency Injection
//!
//! The run-scoped service container and the catalog of named service types.
//!
//! ```text
//! settings [services]          ServiceCatalog
//!   greeter = "app.greeter" ──►  "app.greeter" → Recipe
//!                                      │
//! Layer::with_service(id, Recipe) ─────┤
//!                                      ▼
//!                            Container::define_all
//!                                      │ get(id)
//!                                      ▼
//!                                cached Entry
//! ```

pub mod catalog;
pub mod container;

pub use catalog::{ServiceCatalog, ServiceEntry};
pub use container::Container;
