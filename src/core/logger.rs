//! Logger context: level gate, output configuration and the relay

use super::{
    error::Result,
    formatter,
    kv::Kv,
    level_gate::LevelGate,
    log_entry::{CompletionSignal, LogEntry},
    log_level::LogLevel,
    metrics::RelayMetrics,
    relay::{Relay, RelayMessage, RelayWorker},
    sink::Sink,
};
use crate::sinks::ConsoleSink;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Exit status used after a FATAL entry has been handled
pub const FATAL_EXIT_CODE: i32 = 1;

/// A logging context owning one relay worker
///
/// All emit methods take `&self`, so a `Logger` can be shared across threads
/// behind an `Arc` or used through the process-wide handle returned by
/// [`global()`](crate::global()).
///
/// # Example
///
/// ```
/// use llog::prelude::*;
///
/// let buffer = MemorySink::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Info)
///     .output(buffer.clone())
///     .build();
///
/// logger.debug("hidden", &[]);
/// logger.error("buz", &[Kv::new().with("a", "b")]);
/// logger.flush().unwrap();
///
/// assert_eq!(buffer.contents(), "~ ERROR -- buz -- a=\"b\"\n");
/// ```
pub struct Logger {
    gate: LevelGate,
    display_timestamp: Arc<AtomicBool>,
    metrics: Arc<RelayMetrics>,
    relay: Relay,
}

impl Logger {
    /// A logger at INFO, without timestamps, writing to stdout
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.gate.get()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.gate.set(level);
    }

    /// Set the threshold from a case-insensitive level name
    ///
    /// On an unrecognized name the threshold stays as it was.
    pub fn set_level_from_str(&self, name: &str) -> Result<()> {
        self.gate.set_from_str(name)
    }

    /// Replace the configured sink
    ///
    /// The swap is ordered with entries: everything submitted before this call
    /// goes to the previous sink, everything after to the new one.
    pub fn set_output<S: Sink + 'static>(&self, sink: S) -> Result<()> {
        self.relay.send(RelayMessage::SetOutput(Some(Box::new(sink))))
    }

    /// Drop the configured sink and write straight to the fallback
    pub fn reset_output(&self) -> Result<()> {
        self.relay.send(RelayMessage::SetOutput(None))
    }

    pub fn display_timestamp(&self) -> bool {
        self.display_timestamp.load(Ordering::Relaxed)
    }

    pub fn set_display_timestamp(&self, display: bool) {
        self.display_timestamp.store(display, Ordering::Relaxed);
    }

    /// Counters maintained by the relay worker
    pub fn metrics(&self) -> &RelayMetrics {
        &self.metrics
    }

    /// Block until every entry submitted so far is written and the sink flushed
    pub fn flush(&self) -> Result<()> {
        self.relay.flush()
    }

    /// FATAL always passes; every other level must meet the threshold
    fn permits(&self, level: LogLevel) -> bool {
        level == LogLevel::Fatal || self.gate.permits(level)
    }

    /// Merge `kvs` and submit an entry if `level` passes the gate
    ///
    /// Returns once the relay has accepted the entry. Write failures are
    /// handled by the relay and never reported here.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, kvs: &[Kv]) {
        if !self.permits(level) {
            return;
        }

        let entry = LogEntry::from_sets(level, message, kvs);
        // A stopped relay only happens during teardown; there is nowhere to report it.
        let _ = self.relay.submit(entry);
    }

    /// Like [`Logger::log`], but wait until the relay has fully handled the entry
    ///
    /// That includes fallback recovery and, for FATAL, the sync/flush attempt.
    pub fn log_blocking(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        kvs: &[Kv],
    ) -> Result<()> {
        if !self.permits(level) {
            return Ok(());
        }

        let (signal, completion) = CompletionSignal::new();
        let entry = LogEntry::from_sets(level, message, kvs).with_completion(signal);
        self.relay.submit(entry)?;
        completion.wait();
        Ok(())
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>, kvs: &[Kv]) {
        self.log(LogLevel::Debug, message, kvs);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>, kvs: &[Kv]) {
        self.log(LogLevel::Info, message, kvs);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>, kvs: &[Kv]) {
        self.log(LogLevel::Warn, message, kvs);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>, kvs: &[Kv]) {
        self.log(LogLevel::Error, message, kvs);
    }

    /// Write a FATAL entry, wait for it to be handled, then exit with status 1
    ///
    /// The entry is emitted regardless of the current threshold.
    pub fn fatal(&self, message: impl Into<String>, kvs: &[Kv]) -> ! {
        let message = message.into();
        if self.log_blocking(LogLevel::Fatal, message.clone(), kvs).is_err() {
            // The relay is gone; stderr is the last place left to say why we exit.
            let entry = LogEntry::from_sets(LogLevel::Fatal, message, kvs);
            let line = formatter::format_entry(&entry, self.display_timestamp());
            let _ = std::io::stderr().write_all(&line);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Close the relay and wait up to `timeout` for pending entries to drain
    ///
    /// Returns `true` if the worker finished in time. Entries emitted after
    /// shutdown are discarded.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        self.relay.shutdown(timeout)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use llog::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .display_timestamp(true)
///     .output(MemorySink::new())
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::Debug);
/// assert!(logger.display_timestamp());
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    display_timestamp: bool,
    output: Option<Box<dyn Sink>>,
    fallback: Option<Box<dyn Sink>>,
    queue_capacity: usize,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            display_timestamp: false,
            output: None,
            fallback: None,
            queue_capacity: 0,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Prefix each line with the wall-clock time it was written at
    #[must_use = "builder methods return a new value"]
    pub fn display_timestamp(mut self, display: bool) -> Self {
        self.display_timestamp = display;
        self
    }

    /// Set the configured sink
    ///
    /// Without one, entries go to the fallback sink.
    #[must_use = "builder methods return a new value"]
    pub fn output<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.output = Some(Box::new(sink));
        self
    }

    /// Set the fallback sink, stdout by default
    ///
    /// Failed writes to the configured sink are reported and replayed here.
    /// It cannot be changed once the logger is built.
    #[must_use = "builder methods return a new value"]
    pub fn fallback<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.fallback = Some(Box::new(sink));
        self
    }

    /// Number of entries that may wait in the relay channel
    ///
    /// The default of zero hands each entry directly to the worker.
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Build the Logger and start its relay worker
    pub fn build(self) -> Logger {
        let display_timestamp = Arc::new(AtomicBool::new(self.display_timestamp));
        let metrics = Arc::new(RelayMetrics::new());
        let fallback: Box<dyn Sink> = match self.fallback {
            Some(sink) => sink,
            None => Box::new(ConsoleSink::stdout()),
        };

        let worker = RelayWorker::new(
            self.output,
            fallback,
            Arc::clone(&display_timestamp),
            Arc::clone(&metrics),
        );

        Logger {
            gate: LevelGate::new(self.min_level),
            display_timestamp,
            metrics,
            relay: Relay::spawn(worker, self.queue_capacity),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
