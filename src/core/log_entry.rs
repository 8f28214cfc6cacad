//! Log entry structure

use super::kv::{FieldValue, Kv};
use super::log_level::LogLevel;
use crossbeam_channel::{bounded, Receiver, Sender};

/// Fired by the relay once an entry's side effects have concluded
///
/// Dropping the signal fires it as well, so a waiter is released even if the
/// worker unwinds while holding the entry.
#[derive(Debug)]
pub struct CompletionSignal {
    _tx: Sender<()>,
}

/// Waiting half of a [`CompletionSignal`]
#[derive(Debug)]
pub struct Completion {
    rx: Receiver<()>,
}

impl CompletionSignal {
    pub fn new() -> (CompletionSignal, Completion) {
        let (tx, rx) = bounded(0);
        (CompletionSignal { _tx: tx }, Completion { rx })
    }

    pub fn fire(self) {}
}

impl Completion {
    /// Block until the paired signal fires
    pub fn wait(self) {
        // Nothing is ever sent; disconnection is the signal.
        let _ = self.rx.recv();
    }
}

/// One immutable log event
///
/// Attributes are stored sorted by key so the rendered line does not depend
/// on the order they were supplied in.
#[derive(Debug)]
pub struct LogEntry {
    level: LogLevel,
    message: String,
    attributes: Vec<(String, FieldValue)>,
    completion: Option<CompletionSignal>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, kv: Kv) -> Self {
        Self {
            level,
            message: message.into(),
            attributes: kv.into_sorted(),
            completion: None,
        }
    }

    /// Merge `sets` right-biased and build an entry from the union
    pub fn from_sets<'a, I>(level: LogLevel, message: impl Into<String>, sets: I) -> Self
    where
        I: IntoIterator<Item = &'a Kv>,
    {
        Self::new(level, message, Kv::merge(sets))
    }

    #[must_use]
    pub fn with_completion(mut self, signal: CompletionSignal) -> Self {
        self.completion = Some(signal);
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attributes(&self) -> &[(String, FieldValue)] {
        &self.attributes
    }

    pub fn awaits_completion(&self) -> bool {
        self.completion.is_some()
    }

    pub(crate) fn complete(&mut self) {
        if let Some(signal) = self.completion.take() {
            signal.fire();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_attributes_sorted_regardless_of_insertion() {
        let a = LogEntry::new(
            LogLevel::Info,
            "msg",
            Kv::new().with("foo", "a").with("bar", "a"),
        );
        let b = LogEntry::new(
            LogLevel::Info,
            "msg",
            Kv::new().with("bar", "a").with("foo", "a"),
        );

        assert_eq!(a.attributes(), b.attributes());
        assert_eq!(a.attributes()[0].0, "bar");
        assert_eq!(a.attributes()[1].0, "foo");
    }

    #[test]
    fn test_from_sets_merges() {
        let entry = LogEntry::from_sets(
            LogLevel::Warn,
            "msg",
            [&Kv::new().with("k", 1), &Kv::new().with("k", 2)],
        );
        assert_eq!(entry.level(), LogLevel::Warn);
        assert_eq!(entry.message(), "msg");
        assert_eq!(entry.attributes(), &[("k".to_string(), FieldValue::Int(2))]);
    }

    #[test]
    fn test_completion_releases_waiter() {
        let (signal, completion) = CompletionSignal::new();
        let mut entry = LogEntry::new(LogLevel::Fatal, "bye", Kv::new()).with_completion(signal);
        assert!(entry.awaits_completion());

        let waiter = std::thread::spawn(move || completion.wait());
        std::thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());

        entry.complete();
        waiter.join().expect("waiter panicked");
        assert!(!entry.awaits_completion());
    }

    #[test]
    fn test_dropped_entry_releases_waiter() {
        let (signal, completion) = CompletionSignal::new();
        let entry = LogEntry::new(LogLevel::Fatal, "bye", Kv::new()).with_completion(signal);
        drop(entry);
        completion.wait();
    }
}
