// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkWriteError;
use crate::sink::Sink;
use std::io::Write;

/**
A reference sink that writes to stderr.
 */
#[derive(Debug, Clone)]
pub struct StderrSink {}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for StderrSink trait implementations:
//
// - Debug/Clone: Already derived - appropriate for zero-sized struct
// - Copy: Implemented - safe for zero-sized struct with no heap allocation
// - PartialEq/Eq: Implemented - all instances are equivalent (zero-sized)
// - Hash: Implemented - consistent with Eq
// - Default: Implemented - provides convenient zero-argument constructor
// - Display: NOT implemented - no meaningful string representation
// - Send/Sync: Automatically implemented - zero-sized struct is always thread-safe

impl Copy for StderrSink {}

impl PartialEq for StderrSink {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for StderrSink {}

impl std::hash::Hash for StderrSink {
    fn hash<H: std::hash::Hasher>(&self, _state: &mut H) {}
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StderrSink {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Sink for StderrSink {
    fn write_record(&self, record: &[u8]) -> Result<(), SinkWriteError> {
        // the lock keeps other threads' records out of the middle of ours
        let mut lock = std::io::stderr().lock();
        lock.write_all(record)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkWriteError> {
        std::io::stderr().lock().flush()?;
        Ok(())
    }
}
