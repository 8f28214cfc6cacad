//! Core logger types and traits

pub mod error;
pub mod formatter;
pub mod kv;
pub mod level_gate;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod relay;
pub mod sink;

pub use error::{LoggerError, Result};
pub use formatter::{format_entry, quote_ascii, write_entry};
pub use kv::{FieldValue, Kv};
pub use level_gate::LevelGate;
pub use log_entry::{Completion, CompletionSignal, LogEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::RelayMetrics;
pub use relay::DEFAULT_SHUTDOWN_TIMEOUT;
pub use sink::{Durability, Flusher, Sink, Syncer};
