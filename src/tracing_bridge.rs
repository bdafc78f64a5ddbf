// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bridge from branchlog records to the `tracing` ecosystem.
//!
//! [`TracingSink`] forwards every record it receives as a `tracing` event with target
//! `branchlog`.  The event level is read back from the record's level key, and the
//! whole encoded line is attached as the `record` field, so a subscriber sees the
//! exact bytes any other sink would have written.
//!
//! Only available with the `tracing` feature.
//!
//! ```rust,ignore
//! use branchlog::{Logger, TracingSink, context::Context};
//! use std::sync::Arc;
//!
//! tracing_subscriber::fmt::init();
//! let logger = Logger::new(Context::root(), Arc::new(TracingSink::new()));
//! logger.info().str("user", "alice").msg("signed in").unwrap();
//! ```

use crate::Level;
use crate::error::SinkWriteError;
use crate::sink::Sink;

/// A sink that re-emits records as `tracing` events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSink {
    level_key: String,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingSink {
    pub fn new() -> Self {
        Self {
            level_key: "level".to_string(),
        }
    }

    /// Sets the key the level is read from; match the encoder's `level_key`.
    pub fn with_level_key(mut self, key: impl Into<String>) -> Self {
        self.level_key = key.into();
        self
    }

    /// Reads the level of an encoded record.  Unreadable levels map to `Info`.
    fn level_of(&self, line: &str) -> Level {
        serde_json::from_str::<serde_json::Value>(line)
            .ok()
            .and_then(|v| v.get(&self.level_key)?.as_str()?.parse().ok())
            .unwrap_or(Level::Info)
    }
}

impl Sink for TracingSink {
    fn write_record(&self, record: &[u8]) -> Result<(), SinkWriteError> {
        let line = String::from_utf8_lossy(record);
        let line = line.trim_end_matches(['\n', '\r']);
        match self.level_of(line) {
            Level::Trace => tracing::trace!(target: "branchlog", record = line),
            Level::Debug => tracing::debug!(target: "branchlog", record = line),
            Level::Info => tracing::info!(target: "branchlog", record = line),
            Level::Warn => tracing::warn!(target: "branchlog", record = line),
            Level::Error => tracing::error!(target: "branchlog", record = line),
        }
        Ok(())
    }
}
