//! Handler Chain Port
//!
//! A chain is an ordered list of handlers. Each handler receives [`Next`]:
//! the request in flight plus the remainder of the chain. Calling
//! [`Next::run`] continues, returning without calling it short-circuits.
//!
//! ```text
//! invoke() ──► handler 1 ──next.run()──► handler 2 ──next.run()──► handler 3
//!                 ▲                          │
//!                 └──────── Response ◄───────┘ (returned without next)
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::Response;

/// Opaque request value passed down the chain
pub type Payload = Arc<dyn Any + Send + Sync>;

/// A handler in the chain
pub type Handler<'a> = Box<dyn Fn(Next<'_, 'a>) -> Result<Response> + 'a>;

/// The remainder of the chain, as seen by the running handler
pub struct Next<'n, 'a> {
    rest: &'n [Handler<'a>],
    request: Option<Payload>,
}

impl<'n, 'a> Next<'n, 'a> {
    /// Start of a chain made of `handlers`
    pub fn new(handlers: &'n [Handler<'a>], request: Option<Payload>) -> Self {
        Self {
            rest: handlers,
            request,
        }
    }

    /// The request in flight, if any
    pub fn request(&self) -> Option<&Payload> {
        self.request.as_ref()
    }

    /// The request in flight, downcast to `T`
    pub fn request_as<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.request.as_deref().and_then(|request| request.downcast_ref::<T>())
    }

    /// Number of handlers left in the remainder
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Continue with the current request
    pub fn run(self) -> Result<Response> {
        match self.rest.split_first() {
            Some((handler, rest)) => handler(Next {
                rest,
                request: self.request,
            }),
            None => Err(Error::ChainExhausted),
        }
    }

    /// Continue with a replacement request
    pub fn run_with(self, request: Payload) -> Result<Response> {
        Next {
            rest: self.rest,
            request: Some(request),
        }
        .run()
    }
}

/// A service usable as a chain step target
///
/// A step names the target service and a *selector*; the target decides
/// which of its behaviours the selector maps to.
pub trait Middleware: Send + Sync {
    /// Run the behaviour named `selector`
    ///
    /// Implementations return [`Error::UnknownSelector`] for selectors they
    /// do not provide.
    fn handle(&self, selector: &str, next: Next<'_, '_>) -> Result<Response>;

    /// Selectors this target provides, for diagnostics
    fn selectors(&self) -> Vec<&'static str> {
        Vec::new()
    }
}
