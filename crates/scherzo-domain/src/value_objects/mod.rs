//! Value Objects
//!
//! Immutable values passed between the registry, the handler chain and the
//! front controller.

/// Settings layers
pub mod layer;
/// Response value object
pub mod response;
/// Per-run response cell
pub mod response_slot;

pub use layer::Layer;
pub use response::Response;
pub use response_slot::ResponseSlot;
