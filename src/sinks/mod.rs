//! Sink implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;
#[cfg(feature = "network")]
pub mod network;
pub mod writer;

pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::FileSink;
pub use memory::MemorySink;
#[cfg(feature = "network")]
pub use network::TcpSink;
pub use writer::WriterSink;

pub use crate::core::{Flusher, Sink, Syncer};
