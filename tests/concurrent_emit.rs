// SPDX-License-Identifier: MIT OR Apache-2.0

//! Many threads branching and emitting through one sink.

use branchlog::context::Context;
use branchlog::{InMemorySink, LoggerFactory, WriterSink, decode_line};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::thread;

const THREADS: usize = 8;
const RECORDS: usize = 200;

#[test]
fn concurrent_branches_never_leak() {
    let sink = Arc::new(InMemorySink::new());
    let factory = LoggerFactory::new(sink.clone());
    let parent = Context::root().branch([("parent", true)]);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let factory = factory.clone();
            let parent = parent.clone();
            thread::spawn(move || {
                let logger = factory.logger(&parent.branch([("thread", t)]));
                for i in 0..RECORDS {
                    logger.info().uint("seq", i as u64).msg("tick").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("emitter thread panicked");
    }

    let lines = sink.drain_lines();
    assert_eq!(lines.len(), THREADS * RECORDS);
    let mut per_thread = [0usize; THREADS];
    for line in &lines {
        let record = decode_line(line.as_bytes()).unwrap();
        assert_eq!(record.names(), ["parent", "thread", "seq"]);
        let Some(branchlog::Value::Int(t)) = record.get("thread") else {
            panic!("thread field missing in {line}");
        };
        per_thread[*t as usize] += 1;
    }
    assert!(per_thread.iter().all(|&n| n == RECORDS));
}

/// A writer that hands every `write` call straight to a shared buffer, so a record
/// split across calls would be visible as interleaving.
#[derive(Clone, Default)]
struct Shared(Arc<Mutex<Vec<u8>>>);

impl Write for Shared {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // short writes force write_all to loop
        let n = buf.len().min(7);
        self.0.lock().unwrap().extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn writer_sink_keeps_records_whole() {
    let shared = Shared::default();
    let sink = Arc::new(WriterSink::new(shared.clone()));
    let factory = LoggerFactory::new(sink);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = factory.logger(&Context::root().branch([("thread", t)]));
            thread::spawn(move || {
                for _ in 0..50 {
                    logger
                        .info()
                        .str("payload", "x".repeat(64))
                        .msg("record")
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("emitter thread panicked");
    }

    let bytes = shared.0.lock().unwrap().clone();
    let text = String::from_utf8(bytes).unwrap();
    let mut count = 0;
    for line in text.lines() {
        decode_line(line.as_bytes()).unwrap();
        count += 1;
    }
    assert_eq!(count, THREADS * 50);
}
