// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loggers: emitters bound to one context node.
//!
//! A [`Logger`] pairs a [`Context`] with the pieces needed to write a record: an
//! [`Encoder`], a [`Sink`] and a [`Config`].  The binding is permanent.  A logger has
//! no state of its own between calls; every emit walks the bound node's ancestor
//! chain afresh, so what it writes depends only on that chain and the call.
//!
//! ```rust
//! use branchlog::{Field, InMemorySink, Level, Logger, context::Context};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! let parent = Context::root().branch([("parent", "parent")]);
//! let child = parent.branch([("child", "child")]);
//!
//! let parent_logger = Logger::new(parent, sink.clone());
//! let child_logger = Logger::new(child, sink.clone());
//!
//! parent_logger
//!     .emit(Level::Info, &[Field::new("parent_key", "parent_key")], "parent")
//!     .unwrap();
//! child_logger.emit(Level::Info, &[], "child").unwrap();
//!
//! assert_eq!(
//!     sink.drain_lines(),
//!     [
//!         r#"{"level":"info","parent":"parent","parent_key":"parent_key","message":"parent"}"#,
//!         r#"{"level":"info","parent":"parent","child":"child","message":"child"}"#,
//!     ]
//! );
//! ```

use crate::Level;
use crate::config::Config;
use crate::context::{Context, ContextBuilder};
use crate::encoder::{Encoder, JsonEncoder};
use crate::error::{Error, Result, SinkWriteError};
use crate::field::Field;
use crate::macros::field_setters;
use crate::record::Record;
use crate::sink::Sink;
use crate::stderr_sink::StderrSink;
use std::sync::Arc;

fn write_failed(error: SinkWriteError) -> Error {
    #[cfg(feature = "tracing")]
    tracing::debug!(error = %error, "branchlog record was not written");
    error.into()
}

/// Shared encoder, sink and configuration for a family of loggers.
///
/// Cloning a factory is cheap; every clone shares the same sink.
#[derive(Debug, Clone)]
pub struct LoggerFactory {
    encoder: Arc<dyn Encoder>,
    sink: Arc<dyn Sink>,
    config: Arc<Config>,
}

impl Default for LoggerFactory {
    /// JSON to stderr with the default configuration.
    fn default() -> Self {
        Self::new(Arc::new(StderrSink::new()))
    }
}

impl LoggerFactory {
    /// A factory writing JSON lines to `sink` with the default configuration.
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            encoder: Arc::new(JsonEncoder::default()),
            sink,
            config: Arc::new(Config::default()),
        }
    }

    /// Replaces the configuration, and the encoder with a [`JsonEncoder`] built from it.
    ///
    /// Call [`with_encoder`](LoggerFactory::with_encoder) afterwards to keep a custom
    /// encoder.
    pub fn with_config(mut self, config: Config) -> Result<Self> {
        config.validate()?;
        self.encoder = Arc::new(JsonEncoder::from_config(&config));
        self.config = Arc::new(config);
        Ok(self)
    }

    pub fn with_encoder(mut self, encoder: Arc<dyn Encoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Binds a logger to `context`.
    pub fn logger(&self, context: &Context) -> Logger {
        Logger {
            context: context.clone(),
            factory: self.clone(),
        }
    }

    /// Binds a logger to a fresh, empty root context.
    pub fn root(&self) -> Logger {
        self.logger(&Context::root())
    }
}

/// An emitter permanently bound to one context node.
#[derive(Debug, Clone)]
pub struct Logger {
    context: Context,
    factory: LoggerFactory,
}

impl Logger {
    /// Binds a JSON logger writing to `sink` to `context`.
    pub fn new(context: Context, sink: Arc<dyn Sink>) -> Self {
        LoggerFactory::new(sink).logger(&context)
    }

    /// The node this logger is bound to.
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn factory(&self) -> &LoggerFactory {
        &self.factory
    }

    /// Whether records at `level` pass the configured minimum.
    pub fn enabled(&self, level: Level) -> bool {
        self.factory.config.enabled(level)
    }

    /// Starts a branch of this logger's context.  The builder's
    /// [`logger`](ContextBuilder::logger) shares this logger's sink and encoder.
    pub fn with(&self) -> ContextBuilder {
        ContextBuilder::with_factory(self.context.clone(), self.factory.clone())
    }

    /// Encodes a record, or returns `None` when `level` is filtered out.
    fn encode(&self, level: Level, fields: &[Field], message: &str) -> Result<Option<Vec<u8>>> {
        if !self.enabled(level) {
            return Ok(None);
        }
        let record = Record::new(level, self.context.flatten(), fields, message);
        let bytes = self.factory.encoder.encode(&record)?;
        Ok(Some(bytes))
    }

    /// Writes one record: this logger's inherited fields, then `fields`, with `level`
    /// and `message`.
    ///
    /// Records below the configured minimum level are skipped and return `Ok(())`.
    /// An encoding or sink error means the record was not written; nothing is retried.
    pub fn emit(&self, level: Level, fields: &[Field], message: &str) -> Result<()> {
        let Some(bytes) = self.encode(level, fields, message)? else {
            return Ok(());
        };
        self.factory.sink.write_record(&bytes).map_err(write_failed)
    }

    /// Asynchronous [`emit`](Logger::emit), using the sink's async write.
    pub async fn emit_async(&self, level: Level, fields: &[Field], message: &str) -> Result<()> {
        let Some(bytes) = self.encode(level, fields, message)? else {
            return Ok(());
        };
        self.factory
            .sink
            .write_record_async(bytes)
            .await
            .map_err(write_failed)
    }

    /// Flushes the underlying sink.
    pub fn flush(&self) -> Result<()> {
        self.factory.sink.flush()?;
        Ok(())
    }

    /// Starts a record at `level`.
    pub fn event(&self, level: Level) -> Event<'_> {
        Event {
            logger: self,
            level,
            enabled: self.enabled(level),
            fields: Vec::new(),
        }
    }

    pub fn trace(&self) -> Event<'_> {
        self.event(Level::Trace)
    }

    pub fn debug(&self) -> Event<'_> {
        self.event(Level::Debug)
    }

    pub fn info(&self) -> Event<'_> {
        self.event(Level::Info)
    }

    pub fn warn(&self) -> Event<'_> {
        self.event(Level::Warn)
    }

    pub fn error(&self) -> Event<'_> {
        self.event(Level::Error)
    }
}

/// A record being assembled at a call site.
///
/// Fields added here apply to this record only.  When the level is filtered out the
/// setters do nothing and [`msg`](Event::msg) returns `Ok(())`.
///
/// ```rust
/// use branchlog::{InMemorySink, Logger, context::Context};
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// let logger = Logger::new(Context::root(), sink.clone());
/// logger
///     .error()
///     .str("path", "/tmp/x")
///     .optional("errno", Some(2))
///     .msg("open failed")
///     .unwrap();
/// assert_eq!(
///     sink.drain(),
///     "{\"level\":\"error\",\"path\":\"/tmp/x\",\"errno\":2,\"message\":\"open failed\"}\n"
/// );
/// ```
#[derive(Debug)]
#[must_use = "an event does nothing until `msg` is called"]
pub struct Event<'l> {
    logger: &'l Logger,
    level: Level,
    enabled: bool,
    fields: Vec<Field>,
}

impl<'l> Event<'l> {
    fn accepts_fields(&self) -> bool {
        self.enabled
    }

    fn push_field(&mut self, field: Field) {
        if self.enabled {
            self.fields.push(field);
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Emits the record with `message`.
    pub fn msg(self, message: &str) -> Result<()> {
        self.logger.emit(self.level, &self.fields, message)
    }

    /// Emits the record with `message` through the sink's async write.
    pub async fn msg_async(self, message: &str) -> Result<()> {
        self.logger
            .emit_async(self.level, &self.fields, message)
            .await
    }
}

field_setters!(Event<'_>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use crate::error::EncodingError;
    use crate::inmemory_sink::InMemorySink;
    use crate::writer_sink::WriterSink;
    use std::io;

    #[derive(Debug)]
    struct Refusing;

    impl io::Write for Refusing {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn filtered_levels_never_reach_the_sink() {
        let sink = Arc::new(InMemorySink::new());
        let factory = LoggerFactory::new(sink.clone())
            .with_config(Config::default().with_min_level(Level::Warn))
            .unwrap();
        let logger = factory.root();
        assert!(!logger.enabled(Level::Info));
        logger.info().str("k", "v").msg("dropped").unwrap();
        logger.debug().msg("dropped").unwrap();
        logger.warn().msg("kept").unwrap();
        assert_eq!(sink.drain_lines(), [r#"{"level":"warn","message":"kept"}"#]);
    }

    #[test]
    fn sink_failure_is_reported() {
        let logger = Logger::new(Context::root(), Arc::new(WriterSink::new(Refusing)));
        let err = logger.info().msg("lost").unwrap_err();
        assert!(matches!(err, Error::SinkWrite(_)));
    }

    #[test]
    fn encoding_failure_is_reported_and_nothing_is_written() {
        let sink = Arc::new(InMemorySink::new());
        let logger = LoggerFactory::new(sink.clone())
            .with_config(Config::default().with_max_depth(0))
            .unwrap()
            .root();
        let err = logger
            .info()
            .record("job", vec![Field::new("id", 1)])
            .msg("too deep")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Encoding(EncodingError::TooDeep { depth: 1, max: 0, .. })
        ));
        assert!(sink.is_empty());

        // scalars still go through
        logger.info().int("id", 1).msg("flat").unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn disabled_events_skip_serialization() {
        let sink = Arc::new(InMemorySink::new());
        let logger = LoggerFactory::new(sink.clone())
            .with_config(Config::default().with_min_level(Level::Warn))
            .unwrap()
            .root();
        logger
            .debug()
            .serialized("ratio", &0.5)
            .unwrap()
            .msg("dropped")
            .unwrap();
        assert!(sink.is_empty());

        let event = logger.warn().serialized("ratio", &0.5);
        assert!(matches!(
            event,
            Err(Error::UnsupportedValueKind { kind: "float", .. })
        ));
        let event = logger.warn().serialized("n", &Some(4u8)).unwrap();
        event.msg("kept").unwrap();
        let record = crate::decode_line(sink.drain().as_bytes()).unwrap();
        assert_eq!(record.get("n"), Some(&Value::Int(4)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let factory = LoggerFactory::new(Arc::new(InMemorySink::new()));
        let result = factory.with_config(Config::default().with_level_key("message"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn logger_with_shares_sink() {
        let sink = Arc::new(InMemorySink::new());
        let logger = Logger::new(Context::root(), sink.clone());
        let child = logger.with().int("n", 1).logger();
        assert!(child.context().descends_from(logger.context()));
        child.info().msg("hi").unwrap();
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn serialized_rejects_floats() {
        let sink = Arc::new(InMemorySink::new());
        let logger = Logger::new(Context::root(), sink.clone());
        let result = logger.info().serialized("ratio", &0.5);
        assert!(matches!(
            result,
            Err(Error::UnsupportedValueKind { kind: "float", .. })
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn custom_keys_flow_through_the_factory() {
        let sink = Arc::new(InMemorySink::new());
        let config = Config::default().with_level_key("severity").with_message_key("msg");
        let logger = LoggerFactory::new(sink.clone())
            .with_config(config)
            .unwrap()
            .root();
        logger.info().msg("hello").unwrap();
        assert_eq!(sink.drain_lines(), [r#"{"severity":"info","msg":"hello"}"#]);
    }
}
