// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning records into bytes, and back.
//!
//! The [`Encoder`] trait is the only thing a [`Logger`](crate::Logger) knows about
//! serialization.  [`JsonEncoder`] is the implementation used by default: one JSON
//! object per line, keys in insertion order.
//!
//! # Output layout
//!
//! ```text
//! {"level":"info", <context fields, root first>, <call fields>, "message":"..."}
//! ```
//!
//! Each name is written once.  When a name repeats, the key keeps the position of its
//! first occurrence and takes the value of its last one, so call fields override
//! inherited ones and descendants override ancestors.  The level and message always
//! come from the emit call: a user field named like either reserved key is dropped.

use crate::Level;
use crate::config::Config;
use crate::error::{EncodingError, Error, Result};
use crate::field::Field;
use crate::record::{DecodedRecord, Record};
use crate::value::Value;
use serde::Serializer;
use serde::ser::SerializeMap;
use std::fmt::Debug;

/// Serializes a record into one self-contained, newline-terminated unit.
pub trait Encoder: Debug + Send + Sync {
    fn encode(&self, record: &Record<'_>) -> Result<Vec<u8>, EncodingError>;
}

/// Line-delimited JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEncoder {
    level_key: String,
    message_key: String,
    max_depth: usize,
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the reserved key names and depth limit from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            level_key: config.level_key.clone(),
            message_key: config.message_key.clone(),
            max_depth: config.max_depth,
        }
    }

    fn is_reserved(&self, name: &str) -> bool {
        name == self.level_key || name == self.message_key
    }

    /// Parses one encoded line.
    ///
    /// Trailing whitespace (including the newline) is ignored.  The level and message
    /// keys are required; every other key becomes a field, in written order.
    ///
    /// ```rust
    /// use branchlog::{JsonEncoder, Level, Value};
    ///
    /// let record = JsonEncoder::new()
    ///     .decode_line(br#"{"level":"warn","disk":"sda","message":"almost full"}"#)
    ///     .unwrap();
    /// assert_eq!(record.level(), Level::Warn);
    /// assert_eq!(record.message(), "almost full");
    /// assert_eq!(record.get("disk"), Some(&Value::from("sda")));
    /// ```
    pub fn decode_line(&self, line: &[u8]) -> Result<DecodedRecord> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(line)?;
        let mut level = None;
        let mut message = None;
        let mut fields = Vec::with_capacity(object.len());
        for (key, value) in object {
            if key == self.level_key {
                let name = value.as_str().ok_or_else(|| {
                    Error::MalformedRecord(format!("`{key}` is not a string"))
                })?;
                let parsed = name
                    .parse::<Level>()
                    .map_err(|e| Error::MalformedRecord(e.to_string()))?;
                level = Some(parsed);
            } else if key == self.message_key {
                match value {
                    serde_json::Value::String(s) => message = Some(s),
                    _ => {
                        return Err(Error::MalformedRecord(format!("`{key}` is not a string")));
                    }
                }
            } else {
                let value = Value::from_json(&key, value)?;
                fields.push(Field::new(key, value));
            }
        }
        let level = level
            .ok_or_else(|| Error::MalformedRecord(format!("missing `{}`", self.level_key)))?;
        let message = message
            .ok_or_else(|| Error::MalformedRecord(format!("missing `{}`", self.message_key)))?;
        Ok(DecodedRecord {
            level,
            message,
            fields,
        })
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record<'_>) -> Result<Vec<u8>, EncodingError> {
        let resolved = record.resolved();
        for (name, value) in &resolved {
            let depth = value.depth();
            if depth > self.max_depth {
                return Err(EncodingError::TooDeep {
                    name: name.to_string(),
                    depth,
                    max: self.max_depth,
                });
            }
        }

        let mut out = Vec::with_capacity(64 + 32 * resolved.len() + record.message().len());
        let mut serializer = serde_json::Serializer::new(&mut out);
        let mut map = (&mut serializer).serialize_map(None)?;
        map.serialize_entry(&self.level_key, record.level().as_str())?;
        for (name, value) in resolved {
            if !self.is_reserved(name) {
                map.serialize_entry(name, value)?;
            }
        }
        map.serialize_entry(&self.message_key, record.message())?;
        map.end()?;
        out.push(b'\n');
        Ok(out)
    }
}

/// Parses one line written by a default [`JsonEncoder`].
pub fn decode_line(line: &[u8]) -> Result<DecodedRecord> {
    JsonEncoder::default().decode_line(line)
}
