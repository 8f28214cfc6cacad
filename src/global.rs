//! Process-wide logger and free logging functions
//!
//! The first use of any function here starts a default [`Logger`]: INFO
//! threshold, no timestamps, no configured sink, stdout as the fallback. A
//! custom logger can be put in its place with [`install`], which must happen
//! before anything logs.
//!
//! Configuration setters are safe to call at any time, but changes racing
//! with emits from other threads take effect at an unspecified point
//! relative to them. Configure first, then start logging.
//!
//! ```no_run
//! use llog::{kv, LogLevel};
//!
//! llog::set_level(LogLevel::Debug);
//! llog::info("Something important has occurred", &[]);
//! llog::error("Could not open file", &[kv!("filename" => "app.toml")]);
//! ```

use crate::core::{Kv, LogLevel, Logger, LoggerError, Result, Sink};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Signature shared by the non-fatal free functions, handy for wrappers
pub type LogFunc = fn(&str, &[Kv]);

/// The process-wide logger, started with defaults on first use
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

/// Make `logger` the process-wide logger
///
/// Fails if the global logger was already installed or used; the rejected
/// logger is shut down.
pub fn install(logger: Logger) -> Result<()> {
    GLOBAL
        .set(logger)
        .map_err(|_| LoggerError::GlobalAlreadyInstalled)
}

pub fn get_level() -> LogLevel {
    global().level()
}

pub fn set_level(level: LogLevel) {
    global().set_level(level);
}

/// Case-insensitive; an unknown name leaves the level unchanged
pub fn set_level_from_str(name: &str) -> Result<()> {
    global().set_level_from_str(name)
}

pub fn set_output<S: Sink + 'static>(sink: S) -> Result<()> {
    global().set_output(sink)
}

pub fn set_display_timestamp(display: bool) {
    global().set_display_timestamp(display);
}

pub fn flush() -> Result<()> {
    global().flush()
}

pub fn debug(message: &str, kvs: &[Kv]) {
    global().debug(message, kvs);
}

pub fn info(message: &str, kvs: &[Kv]) {
    global().info(message, kvs);
}

pub fn warn(message: &str, kvs: &[Kv]) {
    global().warn(message, kvs);
}

pub fn error(message: &str, kvs: &[Kv]) {
    global().error(message, kvs);
}

/// Write a FATAL entry to the global logger, then exit with status 1
pub fn fatal(message: &str, kvs: &[Kv]) -> ! {
    global().fatal(message, kvs)
}
