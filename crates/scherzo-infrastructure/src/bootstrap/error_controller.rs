//! Uncaught error reporting
//!
//! Turns a failed run into a `500` response. With debug output off the body
//! only says "Internal Server Error"; with it on, the body carries the
//! failed stage and every message in the error's source chain:
//!
//! ```json
//! {
//!   "error": "Bootstrap failed while invoking: Service error: boom",
//!   "errors": {
//!     "stage": "invoking",
//!     "causes": ["Service error: boom"]
//!   }
//! }
//! ```

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::Payload;
use scherzo_domain::value_objects::Response;
use serde_json::{Value, json};
use tracing::error;

use crate::constants::GENERIC_ERROR_MESSAGE;

/// Status used for uncaught failures
pub const UNCAUGHT_STATUS: u16 = 500;

/// Produces the response for a failed run
pub trait UncaughtHandler: Send + Sync {
    /// Build the response reporting `error`
    fn handle_uncaught(&self, error: &Error) -> Result<Response>;
}

/// Default [`UncaughtHandler`]
///
/// Built directly by the front controller, without the registry, because
/// the registry may be what failed.
#[derive(Clone, Default)]
pub struct ErrorController {
    debug: bool,
    request: Option<Payload>,
}

impl ErrorController {
    /// Create a reporter; `debug` exposes error details in responses
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            request: None,
        }
    }

    /// Attach the request that was in flight
    #[must_use]
    pub fn with_request(mut self, request: Payload) -> Self {
        self.request = Some(request);
        self
    }

    /// True if responses carry error details
    pub fn debug(&self) -> bool {
        self.debug
    }

    fn body(&self, error: &Error) -> Value {
        if !self.debug {
            return json!({ "message": GENERIC_ERROR_MESSAGE });
        }
        let causes: Vec<String> = error.chain().into_iter().skip(1).collect();
        let mut body = json!({ "message": error.to_string(), "causes": causes });
        if let Error::Bootstrap { stage, .. } = error {
            body["stage"] = Value::String(stage.to_string());
        }
        if let Some(path) = self
            .request
            .as_deref()
            .and_then(|request| request.downcast_ref::<String>())
        {
            body["path"] = Value::String(path.clone());
        }
        body
    }
}

impl UncaughtHandler for ErrorController {
    fn handle_uncaught(&self, error: &Error) -> Result<Response> {
        error!(error = %error, debug = self.debug, "Uncaught error");
        Response::error(self.body(error), UNCAUGHT_STATUS)
    }
}

impl std::fmt::Debug for ErrorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorController")
            .field("debug", &self.debug)
            .field("has_request", &self.request.is_some())
            .finish()
    }
}
