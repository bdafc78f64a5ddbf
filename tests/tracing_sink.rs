// SPDX-License-Identifier: MIT OR Apache-2.0
#![cfg(feature = "tracing")]

//! Records forwarded into `tracing` reach a subscriber at the record's level.

use branchlog::context::Context;
use branchlog::{Level, Logger, TracingSink, WriterSink};
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Debug)]
struct Refusing;

impl Write for Refusing {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::other("disk full"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn records_become_tracing_events() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let logger = Logger::new(
            Context::root().branch([("user", "alice")]),
            Arc::new(TracingSink::new()),
        );
        logger.warn().msg("signed in").unwrap();
        logger.debug().msg("details").unwrap();
    });

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {output}");
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("branchlog"));
    assert!(lines[0].contains("signed in"));
    assert!(lines[0].contains("alice"));
    assert!(lines[1].contains("DEBUG"));
}

#[test_executors::async_test]
async fn sink_failures_are_traced_on_both_paths() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let logger = Logger::new(Context::root(), Arc::new(WriterSink::new(Refusing)));
    assert!(logger.emit(Level::Info, &[], "sync").is_err());
    assert!(logger.emit_async(Level::Info, &[], "async").await.is_err());

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    let failures = output
        .lines()
        .filter(|line| line.contains("record was not written") && line.contains("disk full"))
        .count();
    assert_eq!(failures, 2, "unexpected output: {output}");
}
