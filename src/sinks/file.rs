//! File sink implementation

use crate::core::{Flusher, LoggerError, Result, Sink, Syncer};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends lines to a file through a buffer
///
/// Offers both capabilities: `flush` drains the buffer into the file, `sync`
/// additionally asks the OS to persist it. A FATAL entry therefore ends with
/// a full sync.
pub struct FileSink {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl FileSink {
    /// Open `path` for appending, creating it if needed
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::io_operation("opening", path.display().to_string(), e))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn name(&self) -> &str {
        "file"
    }

    fn as_syncer(&mut self) -> Option<&mut dyn Syncer> {
        Some(self)
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        Some(self)
    }
}

impl Syncer for FileSink {
    fn sync(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()
    }
}

impl Flusher for FileSink {
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
