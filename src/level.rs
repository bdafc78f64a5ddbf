// SPDX-License-Identifier: MIT OR Apache-2.0
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Severity of a record.
///
/// Levels are ordered from least to most severe, so a minimum level can be
/// compared with `>=`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Very detailed diagnostics, usually off
    Trace,
    /// Diagnostics for developers of the calling code
    Debug,
    /// Normal operation
    #[default]
    Info,
    /// Suspicious condition
    Warn,
    /// Runtime error
    Error,
}

impl Level {
    /// The lowercase name written into records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [Level].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/*
Boilerplate notes.

Copy, Eq, Ord and Hash are all cheap and meaningful for a fieldless enum.
Default is Info since that is what an unannotated message usually means.
From/Into a string goes through FromStr/Display rather than From impls, since parsing can fail.
*/
