// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::error::SinkWriteError;
use crate::sink::Sink;
use std::fmt::Debug;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

/**
A sink that writes records to any [Write] implementation: a file, a socket, a `Vec<u8>`.

Each record is written with a single `write_all` while holding the lock, so records
from concurrent emitters never interleave.  Nothing is buffered here; wrap the writer
in a `BufWriter` if that is wanted, and call [Sink::flush] before exiting.

```rust
use branchlog::{Logger, WriterSink, context::Context};
use std::sync::Arc;

let sink = Arc::new(WriterSink::new(Vec::new()));
let logger = Logger::new(Context::root(), sink.clone());
logger.warn().msg("low disk").unwrap();
drop(logger);

let sink = Arc::try_unwrap(sink).unwrap();
assert_eq!(sink.into_inner(), b"{\"level\":\"warn\",\"message\":\"low disk\"}\n");
```
*/
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> Debug for WriterSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    // A panic mid-write can leave a partial record behind; we keep writing after it
    // rather than failing every later record.
    fn lock(&self) -> MutexGuard<'_, W> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_record(&self, record: &[u8]) -> Result<(), SinkWriteError> {
        self.lock().write_all(record)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkWriteError> {
        self.lock().flush()?;
        Ok(())
    }
}

/*
Boilerplate notes for WriterSink:

- Debug: hand-written, since W need not be Debug
- Clone: NOT implemented - the writer is a unique resource
- Default: NOT implemented - there is no obvious writer
- Send/Sync: automatic, Mutex<W> is Sync when W is Send
*/

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Debug)]
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_surface() {
        let sink = WriterSink::new(BrokenPipe);
        let err = sink.write_record(b"x\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn records_are_appended() {
        let sink = WriterSink::new(Vec::new());
        sink.write_record(b"a\n").unwrap();
        sink.write_record(b"b\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.into_inner(), b"a\nb\n");
    }
}
