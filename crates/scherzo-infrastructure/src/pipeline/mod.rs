//! Handler chain
//!
//! [`HandlerStack`] assembles handlers and declarative [`StepSpec`]s into
//! one chain and runs it once.

pub mod stack;
pub mod step;

pub use stack::HandlerStack;
pub use step::{StepSpec, Target};
