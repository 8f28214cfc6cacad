//! Single-writer relay between emitting threads and the output sink
//!
//! Every entry, from any thread, goes through one ordered channel to one
//! worker thread. The worker is the only code that ever touches a sink, so
//! lines are written whole and in the order the channel accepted them.

use super::{
    error::{LoggerError, Result},
    formatter,
    kv::{FieldValue, Kv},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::RelayMetrics,
    sink::{self, Durability, Sink},
};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for relay cleanup (5 seconds)
///
/// Used when a logger is dropped without an explicit shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Message accepted by the worker, in submission order
pub(crate) enum RelayMessage {
    Entry(LogEntry),
    /// Replace the configured sink; `None` reverts to the fallback
    SetOutput(Option<Box<dyn Sink>>),
    /// Drain the active sink and report back once everything before it is written
    Flush(Sender<io::Result<()>>),
}

/// State owned by the worker thread
pub(crate) struct RelayWorker {
    output: Option<Box<dyn Sink>>,
    fallback: Box<dyn Sink>,
    display_timestamp: Arc<AtomicBool>,
    metrics: Arc<RelayMetrics>,
}

impl RelayWorker {
    pub(crate) fn new(
        output: Option<Box<dyn Sink>>,
        fallback: Box<dyn Sink>,
        display_timestamp: Arc<AtomicBool>,
        metrics: Arc<RelayMetrics>,
    ) -> Self {
        Self {
            output,
            fallback,
            display_timestamp,
            metrics,
        }
    }

    fn run(mut self, receiver: Receiver<RelayMessage>) {
        for message in receiver.iter() {
            self.handle(message);
        }
    }

    pub(crate) fn handle(&mut self, message: RelayMessage) {
        match message {
            RelayMessage::Entry(entry) => self.process(entry),
            RelayMessage::SetOutput(output) => self.output = output,
            RelayMessage::Flush(reply) => {
                let result = isolate("flushing", || sink::drain(self.active_sink()));
                let _ = reply.send(result);
            }
        }
    }

    /// Write one entry, recover on failure, make FATAL durable, then complete it
    pub(crate) fn process(&mut self, mut entry: LogEntry) {
        let display_timestamp = self.display_timestamp.load(Ordering::Relaxed);

        let written = isolate("writing", || {
            formatter::write_entry(&entry, self.active_sink(), display_timestamp)
        });
        let mut recovered = false;
        match written {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(err) => {
                self.metrics.record_write_failure();
                // Failures of the fallback itself have nowhere left to go.
                if !self.output_is_fallback() {
                    self.recover(&entry, &err, display_timestamp);
                    recovered = true;
                }
            }
        }

        if entry.level() == LogLevel::Fatal {
            self.make_durable(false);
            if recovered {
                self.make_durable(true);
            }
        }

        entry.complete();
    }

    /// Sync or flush the active sink, or the fallback when `fallback` is set
    fn make_durable(&mut self, fallback: bool) {
        let mut kind = Durability::Unsupported;
        let _ = isolate("syncing", || {
            let target: &mut dyn Sink = if fallback {
                &mut *self.fallback
            } else {
                self.active_sink()
            };
            let (used, result) = sink::make_durable(target);
            kind = used;
            result
        });
        if kind != Durability::Unsupported {
            self.metrics.record_durability_flush();
        }
    }

    /// Whether failed writes land on the fallback stream already
    ///
    /// True without a configured sink, or when it shares the fallback's destination.
    fn output_is_fallback(&self) -> bool {
        let Some(output) = self.output.as_ref() else {
            return true;
        };
        match (output.destination(), self.fallback.destination()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Report the failure on the fallback sink, then replay the entry there
    fn recover(&mut self, entry: &LogEntry, err: &io::Error, display_timestamp: bool) {
        let sink_name = self.active_sink().name().to_string();
        let notice = LogEntry::new(
            LogLevel::Error,
            "Could not write to configured sink",
            Kv::new()
                .with("err", FieldValue::display(err))
                .with("sink", sink_name),
        );

        for line in [&notice, entry] {
            let result = isolate("writing to fallback", || {
                formatter::write_entry(line, &mut *self.fallback, display_timestamp)
            });
            if result.is_ok() {
                self.metrics.record_fallback_write();
            }
        }
    }

    fn active_sink(&mut self) -> &mut dyn Sink {
        match self.output.as_mut() {
            Some(output) => &mut **output,
            None => &mut *self.fallback,
        }
    }
}

/// Run a sink operation, turning a panic into an IO error
fn isolate<F>(operation: &str, f: F) -> io::Result<()>
where
    F: FnOnce() -> io::Result<()>,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|panic_info| {
        let panic_msg = panic_message(panic_info.as_ref());
        eprintln!(
            "[LOGGER CRITICAL] Sink panicked while {}: {}. The relay continues.",
            operation, panic_msg
        );
        Err(io::Error::other(format!("sink panicked: {}", panic_msg)))
    })
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Producer side of the relay
pub(crate) struct Relay {
    sender: Option<Sender<RelayMessage>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Relay {
    /// Start the worker thread
    ///
    /// A `capacity` of zero makes every submission a rendezvous with the
    /// worker.
    pub(crate) fn spawn(worker: RelayWorker, capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        let handle = thread::spawn(move || worker.run(receiver));

        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    /// Hand a message to the worker, blocking until it is accepted
    pub(crate) fn send(&self, message: RelayMessage) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LoggerError::LoggerStopped)?;
        sender.send(message).map_err(|_| LoggerError::LoggerStopped)
    }

    pub(crate) fn submit(&self, entry: LogEntry) -> Result<()> {
        self.send(RelayMessage::Entry(entry))
    }

    /// Block until everything submitted so far is written and the sink drained
    pub(crate) fn flush(&self) -> Result<()> {
        let (reply, result) = bounded(1);
        self.send(RelayMessage::Flush(reply))?;
        let result = result.recv().map_err(|_| LoggerError::LoggerStopped)?;
        Ok(result?)
    }

    /// Close the channel and wait for the worker to drain it
    ///
    /// Returns `false` if the worker panicked or did not finish in time.
    pub(crate) fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.handle.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    eprintln!("[LOGGER ERROR] Relay worker panicked during shutdown: {:?}", e);
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                eprintln!(
                    "[LOGGER WARNING] Relay worker did not finish within {:?}. \
                     Some entries may be lost.",
                    timeout
                );
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }
}

impl Drop for Relay {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}
