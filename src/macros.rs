//! Macros for building attribute sets and logging with them.
//!
//! # Examples
//!
//! ```
//! use llog::prelude::*;
//! use llog::{info, kv};
//!
//! let logger = Logger::builder().output(MemorySink::new()).build();
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With attribute sets, merged left to right
//! let request = kv!("request_id" => "abc-123");
//! info!(logger, "Request handled", request, kv!("status" => 200));
//! ```

/// Build a [`Kv`](crate::Kv) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use llog::kv;
///
/// let empty = kv!();
/// assert!(empty.is_empty());
///
/// let fields = kv!("user_id" => 42, "name" => "ann");
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        $crate::Kv::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Kv::new()$(.with($key, $value))+
    };
}

/// Log a message at the given level with zero or more attribute sets.
///
/// # Examples
///
/// ```
/// # use llog::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use llog::{kv, log};
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Request failed", kv!("code" => 500));
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $logger.log($level, $msg, &[$($kv),*])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use llog::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use llog::{debug, kv};
/// debug!(logger, "Cache lookup");
/// debug!(logger, "Cache lookup", kv!("hit" => false));
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $msg $(, $kv)*)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use llog::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use llog::{info, kv};
/// info!(logger, "Application started");
/// info!(logger, "Processing items", kv!("count" => 100));
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Info, $msg $(, $kv)*)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use llog::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use llog::{kv, warn};
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retrying", kv!("attempt" => 3, "max" => 5));
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $msg $(, $kv)*)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use llog::prelude::*;
/// # let logger = Logger::builder().output(MemorySink::new()).build();
/// use llog::{error, kv};
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Request failed", kv!("code" => 500, "reason" => "Internal error"));
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::Error, $msg $(, $kv)*)
    };
}

/// Log a fatal-level message and exit the process with status 1.
///
/// # Examples
///
/// ```no_run
/// # use llog::prelude::*;
/// # let logger = Logger::new();
/// use llog::{fatal, kv};
/// fatal!(logger, "Unable to recover", kv!("cause" => "disk full"));
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $logger.fatal($msg, &[$($kv),*])
    };
}
