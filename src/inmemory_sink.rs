// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! This module provides an in-memory sink for testing and inspection.  The
//! `InMemorySink` keeps every record it receives rather than writing it anywhere,
//! making it ideal for:
//!
//! - Unit testing code that logs through branchlog
//! - Checking exactly which fields ended up in which record
//! - Capturing records where stderr is redirected or unavailable
//!
//! ## Architecture
//!
//! Records are stored as separate byte buffers behind a `Mutex`.  Each record is
//! pushed in one locked operation, so concurrent writers never interleave inside a
//! record, and the number of stored records is always known.

use crate::error::SinkWriteError;
use crate::sink::Sink;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A sink that stores records in memory.
///
/// # Thread Safety
///
/// The `InMemorySink` is thread-safe and can be shared across threads with `Arc`.
/// All operations on the internal buffer are protected by a mutex.
///
/// # Example
///
/// ```rust
/// use branchlog::{InMemorySink, Logger, context::Context};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let logger = Logger::new(Context::root().branch([("job", 23)]), sink.clone());
///
/// logger.info().bool("ok", true).msg("done").unwrap();
///
/// assert_eq!(sink.len(), 1);
/// assert_eq!(
///     sink.drain_lines(),
///     [r#"{"level":"info","job":23,"ok":true,"message":"done"}"#]
/// );
/// assert!(sink.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    records: Mutex<Vec<Vec<u8>>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for InMemorySink trait implementations:
//
// - Debug: Derived for diagnostic purposes and required by Sink trait
// - Default: Derived with obvious zero-value (empty buffer)
// - Clone: NOT implemented - two handles should share a buffer via Arc, not copy it
// - PartialEq/Eq: NOT implemented - mutex state comparison is problematic
// - Hash: NOT implemented - requires Eq
// - Display: NOT implemented - contents() covers it
// - Send/Sync: Automatically implemented due to Mutex usage (required for Sink trait)

impl InMemorySink {
    /// Creates a new `InMemorySink` with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    // Records are whole byte buffers, so a panic elsewhere can't leave one half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<Vec<u8>>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Every stored record concatenated, without clearing the buffer.
    pub fn contents(&self) -> String {
        let records = self.lock();
        let bytes: Vec<u8> = records.iter().flatten().copied().collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Every stored record concatenated, clearing the buffer.
    pub fn drain(&self) -> String {
        let records = std::mem::take(&mut *self.lock());
        let bytes: Vec<u8> = records.into_iter().flatten().collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// One string per stored record, without its line terminator, clearing the buffer.
    ///
    /// ```rust
    /// use branchlog::{InMemorySink, Sink};
    ///
    /// let sink = InMemorySink::new();
    /// sink.write_record(b"{\"a\":1}\n").unwrap();
    /// sink.write_record(b"{\"b\":2}\n").unwrap();
    /// assert_eq!(sink.drain_lines(), ["{\"a\":1}", "{\"b\":2}"]);
    /// assert_eq!(sink.drain(), "");
    /// ```
    pub fn drain_lines(&self) -> Vec<String> {
        let records = std::mem::take(&mut *self.lock());
        records
            .into_iter()
            .map(|record| {
                let line = String::from_utf8_lossy(&record);
                line.trim_end_matches(['\n', '\r']).to_string()
            })
            .collect()
    }

    /// Replays every stored record into `other`, clearing this buffer.
    ///
    /// Records that `other` rejects are lost along with the rest of the batch; the
    /// first error is returned.
    pub fn drain_into(&self, other: &dyn Sink) -> Result<(), SinkWriteError> {
        let records = std::mem::take(&mut *self.lock());
        for record in &records {
            other.write_record(record)?;
        }
        other.flush()
    }
}

impl Sink for InMemorySink {
    fn write_record(&self, record: &[u8]) -> Result<(), SinkWriteError> {
        self.lock().push(record.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn contents_does_not_clear() {
        let sink = InMemorySink::new();
        sink.write_record(b"one\n").unwrap();
        assert_eq!(sink.contents(), "one\n");
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.drain(), "one\n");
        assert!(sink.is_empty());
    }

    #[test]
    fn drain_into_moves_records() {
        let from = InMemorySink::new();
        let to = InMemorySink::new();
        from.write_record(b"a\n").unwrap();
        from.write_record(b"b\n").unwrap();
        from.drain_into(&to).unwrap();
        assert!(from.is_empty());
        assert_eq!(to.drain_lines(), ["a", "b"]);
    }

    #[test]
    fn concurrent_writes_stay_whole() {
        let sink = Arc::new(InMemorySink::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sink = sink.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        let record = format!("{t}-{i}\n");
                        sink.write_record(record.as_bytes()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }
        let lines = sink.drain_lines();
        assert_eq!(lines.len(), 800);
        assert!(lines.iter().all(|l| l.split('-').count() == 2));
    }
}
