//! Console sink implementation

use crate::core::{Flusher, Sink};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Writes lines to the process's standard output or standard error
///
/// `ConsoleSink::stdout()` is the default fallback sink.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().lock().write_all(buf),
            Stream::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }

    fn destination(&self) -> Option<&str> {
        Some(self.name())
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        Some(self)
    }
}

impl Flusher for ConsoleSink {
    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }
}
