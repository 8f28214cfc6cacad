//! # llog
//!
//! A minimal leveled logger. Each call carries a fixed message plus any number
//! of key/value attribute sets; entries are written one per line to a single
//! sink in a deterministic text format.
//!
//! ## Features
//!
//! - **Single writer**: one relay thread owns the sink, so concurrent callers
//!   never interleave partial lines and entries keep their submission order
//! - **Deterministic lines**: attributes are sorted by key and values quoted
//!   as printable ASCII
//! - **Fallback**: a failed write is reported and replayed on stdout
//! - **Fatal**: `fatal` waits until its line is written and the sink synced,
//!   then exits with status 1
//!
//! ```text
//! ~ ERROR -- Could not open file -- err="permission denied" filename="app.toml"
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        FieldValue, Kv, LogLevel, Logger, LoggerBuilder, LoggerError, RelayMetrics, Result,
        Sink, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};

    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
}

pub use crate::core::{
    Durability, FieldValue, Flusher, Kv, LevelGate, LogEntry, LogLevel, Logger, LoggerBuilder,
    LoggerError, RelayMetrics, Result, Sink, Syncer, DEFAULT_SHUTDOWN_TIMEOUT, FATAL_EXIT_CODE,
};
pub use crate::global::{
    debug, error, fatal, flush, get_level, global, info, install, set_display_timestamp,
    set_level, set_level_from_str, set_output, warn, LogFunc,
};
pub use crate::sinks::{ConsoleSink, MemorySink, WriterSink};

#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
#[cfg(feature = "network")]
pub use crate::sinks::TcpSink;
