//! In-memory sink shared between the relay and the caller

use crate::core::Sink;
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Collects written lines in a shared buffer
///
/// Clones share the same buffer: hand one clone to the logger and keep
/// another to read back what was written.
///
/// # Example
///
/// ```
/// use llog::{Logger, MemorySink};
///
/// let captured = MemorySink::new();
/// let logger = Logger::builder().output(captured.clone()).build();
///
/// logger.info("hello", &[]);
/// logger.flush().unwrap();
/// assert_eq!(captured.lines(), vec!["~ INFO -- hello"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Written lines without their trailing newlines
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Raw bytes written so far
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Empty the buffer, returning what it held
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.buffer.lock())
    }
}

impl Sink for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
