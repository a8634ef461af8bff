//! Response emitters
//!
//! Deliver the final response of a run to the outside world.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use scherzo_domain::error::Result;
use scherzo_domain::value_objects::Response;

use crate::error_ext::ErrorContext;

/// Sends a response to the outside world
pub trait Emitter: Send + Sync {
    /// Deliver `response`
    fn emit(&self, response: &Response) -> Result<()>;
}

/// Writes response bodies to an [`io::Write`]
pub struct WriterEmitter<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterEmitter<W> {
    /// Emit into `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterEmitter<io::Stdout> {
    /// Emit to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Emitter for WriterEmitter<W> {
    fn emit(&self, response: &Response) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer
            .write_all(response.body.as_bytes())
            .io_context("Failed to write response body")?;
        writer.flush().io_context("Failed to flush response")
    }
}

/// Discards every response
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEmitter;

impl Emitter for NullEmitter {
    fn emit(&self, _response: &Response) -> Result<()> {
        Ok(())
    }
}
