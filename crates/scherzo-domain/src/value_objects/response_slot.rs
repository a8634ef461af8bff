//! Per-run response cell
//!
//! Services that produce a response during a run (controllers, error pages)
//! share one `ResponseSlot`. It lives in the registry under
//! [`RESPONSE_SERVICE_ID`](crate::constants::RESPONSE_SERVICE_ID), so every
//! holder sees the same cell and the latest write wins.

use std::sync::{PoisonError, RwLock};

use super::Response;

/// Shared, rebindable "current response" cell
#[derive(Debug, Default)]
pub struct ResponseSlot {
    current: RwLock<Option<Response>>,
}

impl ResponseSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current response, returning the previous one
    pub fn set(&self, response: Response) -> Option<Response> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(response)
    }

    /// Copy of the current response
    pub fn current(&self) -> Option<Response> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the current response
    pub fn take(&self) -> Option<Response> {
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// True once any holder has written a response
    pub fn is_set(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
