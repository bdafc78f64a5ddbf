// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.
//!
//! Every error propagates synchronously to the caller.  Nothing here is retried;
//! a failed emit means the record was not recorded, and the caller decides whether
//! to retry or move on.

use thiserror::Error;

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be represented as a field value.
    #[error("field `{name}` has unsupported value kind `{kind}`")]
    UnsupportedValueKind { name: String, kind: &'static str },

    /// The encoder rejected a record.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The sink failed to accept a record.
    #[error(transparent)]
    SinkWrite(#[from] SinkWriteError),

    /// A line could not be parsed back into a record.
    #[error("failed to decode record: {0}")]
    Decode(#[from] serde_json::Error),

    /// A line parsed, but is not shaped like a record.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// The encoder could not turn a record into bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// A field nests records deeper than the configured limit.
    #[error("field `{name}` nests {depth} levels deep, the limit is {max}")]
    TooDeep {
        name: String,
        depth: usize,
        max: usize,
    },

    /// The serializer itself failed.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The sink could not accept a record.
#[derive(Debug, Error)]
#[error("sink write failed: {source}")]
pub struct SinkWriteError {
    #[from]
    source: std::io::Error,
}

impl SinkWriteError {
    pub fn new(source: std::io::Error) -> Self {
        Self { source }
    }

    pub fn kind(&self) -> std::io::ErrorKind {
        self.source.kind()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
