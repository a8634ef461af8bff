//! Emitter Tests

use std::io::{self, Write};

use scherzo_domain::error::Error;
use scherzo_domain::value_objects::Response;
use scherzo_infrastructure::bootstrap::{Emitter, NullEmitter, WriterEmitter};

#[test]
fn test_writer_emitter_writes_body() {
    let emitter = WriterEmitter::new(Vec::new());
    emitter.emit(&Response::text("Hello")).unwrap();
    emitter.emit(&Response::text(", world")).unwrap();

    assert_eq!(emitter.into_inner(), b"Hello, world");
}

#[test]
fn test_null_emitter_accepts_everything() {
    assert!(NullEmitter.emit(&Response::not_found(None)).is_ok());
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_is_io_error() {
    let emitter = WriterEmitter::new(BrokenPipe);

    let result = emitter.emit(&Response::text("lost"));

    assert!(matches!(result, Err(Error::Io { .. })));
}
