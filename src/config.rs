// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logger configuration.
//!
//! [`Config`] is plain data and deserializes from any serde format.  Missing keys
//! take their defaults.
//!
//! ```rust
//! use branchlog::{Config, Level};
//!
//! let config: Config = serde_json::from_str(r#"{"min_level":"warn"}"#).unwrap();
//! assert_eq!(config.min_level, Level::Warn);
//! assert_eq!(config.message_key, "message");
//! config.validate().unwrap();
//! ```

use crate::Level;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default limit on record nesting inside a single field.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings shared by every logger built from the same factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Records below this level are dropped without being encoded.
    pub min_level: Level,
    /// Key the level is written under.
    pub level_key: String,
    /// Key the message is written under.
    pub message_key: String,
    /// Maximum nesting depth of a record-valued field.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_level: Level::Trace,
            level_key: "level".to_string(),
            message_key: "message".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_level_key(mut self, key: impl Into<String>) -> Self {
        self.level_key = key.into();
        self
    }

    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Checks that the reserved keys are usable.
    pub fn validate(&self) -> Result<()> {
        if self.level_key.is_empty() {
            return Err(Error::Config("level_key is empty".to_string()));
        }
        if self.message_key.is_empty() {
            return Err(Error::Config("message_key is empty".to_string()));
        }
        if self.level_key == self.message_key {
            return Err(Error::Config(format!(
                "level_key and message_key are both `{}`",
                self.level_key
            )));
        }
        Ok(())
    }

    pub(crate) fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }
}
