// SPDX-License-Identifier: MIT OR Apache-2.0

//! Records: what a single emit call produces.
//!
//! A [`Record`] borrows everything it holds.  It lives only for the duration of an
//! emit call: the logger flattens its context, appends the call-site fields, hands
//! the record to the encoder, and drops it.  Nothing is copied out of the context
//! tree to build one.
//!
//! [`DecodedRecord`] is the owned form recovered from an encoded line, mostly
//! useful for checking what was written.

use crate::Level;
use crate::field::{Field, resolve};
use crate::value::Value;

/// One log entry on its way to the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    level: Level,
    context: Vec<&'a Field>,
    call: &'a [Field],
    message: &'a str,
}

impl<'a> Record<'a> {
    /// Builds a record from already flattened context fields.
    pub fn new(level: Level, context: Vec<&'a Field>, call: &'a [Field], message: &'a str) -> Self {
        Self {
            level,
            context,
            call,
            message,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &'a str {
        self.message
    }

    /// Inherited fields, root first.
    pub fn context_fields(&self) -> &[&'a Field] {
        &self.context
    }

    /// Fields passed at the call site.
    pub fn call_fields(&self) -> &'a [Field] {
        self.call
    }

    /// Every field in encoding order, duplicates included.
    pub fn fields(&self) -> impl Iterator<Item = &'a Field> + '_ {
        self.context.iter().copied().chain(self.call.iter())
    }

    /// Fields after the last-wins policy is applied.
    pub fn resolved(&self) -> Vec<(&'a str, &'a Value)> {
        resolve(self.fields())
    }
}

/// A record recovered from its encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub(crate) level: Level,
    pub(crate) message: String,
    pub(crate) fields: Vec<Field>,
}

impl DecodedRecord {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every non-reserved field, in the order it was written.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .map(Field::value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(Field::name).collect()
    }
}
