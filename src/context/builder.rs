// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for a single branch.

use crate::field::Field;
use crate::logger::{Logger, LoggerFactory};
use crate::macros::field_setters;

use super::context_impl::Context;

/// Accumulates fields for a new branch of `parent`.
///
/// Nothing is attached to the tree until [`finish`](ContextBuilder::finish) or
/// [`logger`](ContextBuilder::logger) is called, and each call produces a new node.
/// Cloning a builder copies its pending fields, so the two copies evolve
/// independently.
///
/// ```rust
/// use branchlog::{InMemorySink, Logger, context::Context};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let logger = Logger::new(Context::root(), sink.clone());
///
/// let parent = logger.with().str("parent", "parent");
/// let child = parent.clone().str("child", "child");
///
/// parent.logger().info().msg("parent").unwrap();
/// child.logger().info().msg("child").unwrap();
///
/// assert_eq!(
///     sink.drain_lines(),
///     [
///         r#"{"level":"info","parent":"parent","message":"parent"}"#,
///         r#"{"level":"info","parent":"parent","child":"child","message":"child"}"#,
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    parent: Context,
    fields: Vec<Field>,
    factory: Option<LoggerFactory>,
}

impl ContextBuilder {
    pub(crate) fn new(parent: Context) -> Self {
        Self {
            parent,
            fields: Vec::new(),
            factory: None,
        }
    }

    pub(crate) fn with_factory(parent: Context, factory: LoggerFactory) -> Self {
        Self {
            parent,
            fields: Vec::new(),
            factory: Some(factory),
        }
    }

    fn accepts_fields(&self) -> bool {
        true
    }

    fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// The context the finished branch will hang from.
    pub fn parent(&self) -> &Context {
        &self.parent
    }

    /// Fields added so far.
    pub fn pending_fields(&self) -> &[Field] {
        &self.fields
    }

    /// Freezes the pending fields into a new child node.
    ///
    /// The builder is left untouched, so calling this twice yields two distinct
    /// sibling nodes with the same fields.
    pub fn finish(&self) -> Context {
        self.parent.branch(self.fields.iter().cloned())
    }

    /// Freezes the pending fields and binds a logger to the new node.
    ///
    /// A builder obtained from [`Logger::with`] reuses that logger's encoder, sink and
    /// configuration.  Otherwise the default factory is used, which writes to stderr.
    pub fn logger(&self) -> Logger {
        let context = self.finish();
        match &self.factory {
            Some(factory) => factory.logger(&context),
            None => LoggerFactory::default().logger(&context),
        }
    }

    /// Freezes the pending fields and binds a logger from `factory`.
    pub fn logger_from(&self, factory: &LoggerFactory) -> Logger {
        factory.logger(&self.finish())
    }
}

field_setters!(ContextBuilder);
