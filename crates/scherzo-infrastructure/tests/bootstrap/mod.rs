//! Bootstrap integration tests


use std::io;
use std::sync::{Arc, Mutex};

use scherzo_domain::error::{Error, Result, RunState};
use scherzo_domain::ports::{Middleware, Next, Registry, RegistryExt, Service, SettingsExt};
use scherzo_domain::value_objects::Response;
use scherzo_infrastructure::bootstrap::{Emitter, UncaughtHandler};

/// Emitter keeping every response
#[derive(Default)]
pub struct RecordingEmitter {
    responses: Mutex<Vec<Response>>,
}

impl RecordingEmitter {
    pub fn responses(&self) -> Vec<Response> {
        self.responses.lock().unwrap().clone()
    }
}

impl Emitter for RecordingEmitter {
    fn emit(&self, response: &Response) -> Result<()> {
        self.responses.lock().unwrap().push(response.clone());
        Ok(())
    }
}

/// Emitter that always fails
pub struct ClosedEmitter;

impl Emitter for ClosedEmitter {
    fn emit(&self, _response: &Response) -> Result<()> {
        Err(Error::io_with_source(
            "Output closed",
            io::Error::new(io::ErrorKind::BrokenPipe, "closed"),
        ))
    }
}

/// Error handler recording what it was asked to report
#[derive(Default)]
pub struct CapturingHandler {
    reports: Mutex<Vec<(Option<RunState>, String)>>,
}

impl CapturingHandler {
    pub fn reports(&self) -> Vec<(Option<RunState>, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl UncaughtHandler for CapturingHandler {
    fn handle_uncaught(&self, error: &Error) -> Result<Response> {
        let stage = match error {
            Error::Bootstrap { stage, .. } => Some(*stage),
            _ => None,
        };
        self.reports.lock().unwrap().push((stage, error.to_string()));
        Ok(Response::new("captured", 500))
    }
}

/// Step target configured from the settings group named after its id
///
/// `answer` responds with the `body` setting, `tag` delegates and marks
/// the response with an `X-Step` header.
pub struct Echo {
    id: String,
    body: String,
}

impl Service for Echo {
    fn create(registry: &dyn Registry, id: &str) -> Result<Self> {
        let body = registry
            .settings()?
            .value(id, "body")
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        Ok(Self {
            id: id.to_string(),
            body,
        })
    }
}

impl Middleware for Echo {
    fn handle(&self, selector: &str, next: Next<'_, '_>) -> Result<Response> {
        match selector {
            "answer" => Ok(Response::text(self.body.clone())),
            "tag" => Ok(next.run()?.with_header("X-Step", self.id.clone())),
            "pass" => next.run(),
            other => Err(Error::unknown_selector(self.id.clone(), other)),
        }
    }

    fn selectors(&self) -> Vec<&'static str> {
        vec!["answer", "tag", "pass"]
    }
}

pub fn recording() -> Arc<RecordingEmitter> {
    Arc::new(RecordingEmitter::default())
}
