//! Minimum severity threshold shared by every emit call

use super::{error::Result, log_level::LogLevel};
use parking_lot::RwLock;

/// Read/write guarded threshold deciding which entries reach the relay
///
/// Each read and each write is atomic with respect to the others. No ordering
/// is promised between a configuration change and emits racing with it.
#[derive(Debug, Default)]
pub struct LevelGate {
    level: RwLock<LogLevel>,
}

impl LevelGate {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: RwLock::new(level),
        }
    }

    #[inline]
    pub fn get(&self) -> LogLevel {
        *self.level.read()
    }

    pub fn set(&self, level: LogLevel) {
        *self.level.write() = level;
    }

    /// Parse `name` case-insensitively and apply it
    ///
    /// On failure the threshold is left untouched.
    pub fn set_from_str(&self, name: &str) -> Result<()> {
        let level = name.parse()?;
        self.set(level);
        Ok(())
    }

    /// Whether an entry of `level` passes the gate
    #[inline]
    pub fn permits(&self, level: LogLevel) -> bool {
        level >= self.get()
    }
}
