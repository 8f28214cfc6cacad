//! Relay metrics
//!
//! Counters describing what the relay worker did with the entries it
//! received, mostly useful for spotting a failing sink.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the relay worker
///
/// # Example
///
/// ```
/// use llog::RelayMetrics;
///
/// let metrics = RelayMetrics::new();
/// metrics.record_written();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.entries_written(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// assert_eq!(metrics.failure_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct RelayMetrics {
    /// Entries written to their sink without error
    entries_written: AtomicU64,

    /// Entries whose write to the configured sink failed
    write_failures: AtomicU64,

    /// Lines written to the fallback sink while recovering from a failure
    fallback_writes: AtomicU64,

    /// Sync or flush calls made on behalf of FATAL entries
    durability_flushes: AtomicU64,
}

impl RelayMetrics {
    pub const fn new() -> Self {
        Self {
            entries_written: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            fallback_writes: AtomicU64::new(0),
            durability_flushes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_written(&self) -> u64 {
        self.entries_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fallback_writes(&self) -> u64 {
        self.fallback_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn durability_flushes(&self) -> u64 {
        self.durability_flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.entries_written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_fallback_write(&self) -> u64 {
        self.fallback_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_durability_flush(&self) -> u64 {
        self.durability_flushes.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage of all attempted writes (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let total = self.entries_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.entries_written.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.fallback_writes.store(0, Ordering::Relaxed);
        self.durability_flushes.store(0, Ordering::Relaxed);
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RelayMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            entries_written: AtomicU64::new(self.entries_written()),
            write_failures: AtomicU64::new(self.write_failures()),
            fallback_writes: AtomicU64::new(self.fallback_writes()),
            durability_flushes: AtomicU64::new(self.durability_flushes()),
        }
    }
}
