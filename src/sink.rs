//SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkWriteError;
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

pub trait Sink: Debug + Send + Sync {
    /**
    Writes one encoded record.

    The record must land as a single unit: bytes from concurrent calls may never
    interleave inside it.  Failures are returned as-is and are not retried.
    */
    fn write_record(&self, record: &[u8]) -> Result<(), SinkWriteError>;

    /**
    Writes one encoded record asynchronously.

    This allows sinks to reuse an async context that already exists.
    The default is a simple wrapper around [Self::write_record].
    */
    fn write_record_async<'s>(
        &'s self,
        record: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<(), SinkWriteError>> + Send + 's>> {
        Box::pin(async move { self.write_record(&record) })
    }

    /**
    The application may imminently exit.  Ensure all buffers are flushed.
    */
    fn flush(&self) -> Result<(), SinkWriteError> {
        Ok(())
    }
}

/*
Boilerplate notes.

# Sink

Clone on a sink would duplicate whatever it owns (a file handle, a buffer), so it's out.
Sinks are shared through Arc<dyn Sink> instead.
PartialEq/Hash are unclear: do we mean data equality or provenance?
Default depends on the sink.
Send/Sync are required since loggers move across threads.
*/
