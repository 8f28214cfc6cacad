//! Adapter turning any `io::Write` into a sink

use crate::core::{Flusher, Sink};
use std::io::{self, Write};

/// Wraps an arbitrary writer; `io::Write::flush` backs the flush capability
///
/// ```
/// use llog::{Logger, WriterSink};
///
/// let logger = Logger::builder()
///     .output(WriterSink::new(std::io::sink()).with_name("discard"))
///     .build();
/// logger.info("nowhere", &[]);
/// ```
pub struct WriterSink<W> {
    inner: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        Some(self)
    }
}

impl<W: Write + Send> Flusher for WriterSink<W> {
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sink::{make_durable, Durability};

    #[test]
    fn test_writes_through() {
        let mut sink = WriterSink::new(Vec::new());
        Sink::write(&mut sink, b"~ WARN -- x\n").unwrap();
        assert_eq!(sink.get_ref().as_slice(), b"~ WARN -- x\n");
        assert_eq!(sink.name(), "writer");
    }

    #[test]
    fn test_flush_capability() {
        let mut sink = WriterSink::new(io::BufWriter::new(Vec::new())).with_name("buffered");
        Sink::write(&mut sink, b"pending\n").unwrap();
        assert!(sink.get_ref().get_ref().is_empty());

        let (kind, result) = make_durable(&mut sink);
        assert_eq!(kind, Durability::Flushed);
        assert!(result.is_ok());
        assert_eq!(sink.into_inner().into_inner().unwrap(), b"pending\n");
    }
}
