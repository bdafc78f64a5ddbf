//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# branchlog

branchlog is a structured logging library built around immutable, branchable contexts.

# Development status

branchlog is experimental and the API may change.

# The problem

Most structured loggers let you attach fields to a "context" and derive child contexts
from it.  Under the hood, many of them implement the context as a growable buffer that
children append to.  If a child appends into spare capacity the parent also owns, the
parent (or a sibling) can start printing fields that were only ever added to the child:

```text
parent := logger.With().Str("parent", "parent")
child  := parent.Str("child", "child")
parent.Logger().Info().Msg("parent")   // may print "child":"child" too
```

That is exactly the kind of bug you don't notice until you are reading logs during an
incident and wondering why a request id shows up on an unrelated line.

# The model

branchlog makes the rule structural.  A [`Context`](context::Context) is a node in a
persistent tree: it owns the fields it added and holds a shared pointer to the node it
branched from.  Nothing is mutated after a node is built.  So, by construction:

* a child sees every field of every ancestor,
* a parent never sees a field added to a child, whether the child was created before or
  after the parent's logger,
* siblings never see each other's fields.

```rust
use branchlog::{InMemorySink, Logger, context::Context};
use std::sync::Arc;

let sink = Arc::new(InMemorySink::new());
let root = Logger::new(Context::root(), sink.clone());

let parent = root.with().bool("parent", true).logger();
let child_1 = parent.with().bool("child_1", true).logger();
let child_2 = parent.with().bool("child_2", true).logger();

parent.info().msg("parent").unwrap();
child_1.info().msg("child_1").unwrap();
child_2.info().msg("child_2").unwrap();

assert_eq!(
    sink.drain_lines(),
    [
        r#"{"level":"info","parent":true,"message":"parent"}"#,
        r#"{"level":"info","parent":true,"child_1":true,"message":"child_1"}"#,
        r#"{"level":"info","parent":true,"child_2":true,"message":"child_2"}"#,
    ]
);
```

# Duplicate names

Names may repeat along a chain, or between the chain and a call site.  The last
occurrence wins: the key is written once, at the position of its first occurrence,
with the value of its last.  The `level` and `message` keys always carry the emitted
level and message.

# Values

Field values are one of a small closed set: string, integer, boolean, nested record,
or absent.  `Option<T>` maps `None` to `null`.  Arbitrary `serde::Serialize` values can
be attached with [`Value::from_serialize`], which rejects kinds outside that set.

# Output

Records go through an [`Encoder`] (by default [`JsonEncoder`], one object per line)
into a [`Sink`].  Sinks write each record as a single unit, so concurrent emitters never
interleave bytes within a line.  [`InMemorySink`], [`WriterSink`] and [`StderrSink`] are
provided; with the `tracing` feature, `TracingSink` forwards records to `tracing`.

# Multithreading

Contexts, loggers and the provided sinks are `Send + Sync`.  Branching and emitting take
no locks; only the sink serializes writes.
*/

mod config;
pub mod context;
mod encoder;
mod error;
pub mod field;
mod inmemory_sink;
mod level;
mod logger;
mod macros;
mod record;
mod sink;
mod stderr_sink;
#[cfg(feature = "tracing")]
mod tracing_bridge;
mod value;
mod writer_sink;

pub use config::{Config, DEFAULT_MAX_DEPTH};
pub use context::{Context, ContextBuilder, ContextId};
pub use encoder::{Encoder, JsonEncoder, decode_line};
pub use error::{EncodingError, Error, Result, SinkWriteError};
pub use field::Field;
pub use inmemory_sink::InMemorySink;
pub use level::{Level, ParseLevelError};
pub use logger::{Event, Logger, LoggerFactory};
pub use record::{DecodedRecord, Record};
pub use sink::Sink;
pub use stderr_sink::StderrSink;
#[cfg(feature = "tracing")]
pub use tracing_bridge::TracingSink;
pub use value::Value;
pub use writer_sink::WriterSink;
