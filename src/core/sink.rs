//! Sink trait for log output destinations
//!
//! A sink only has to accept bytes. Durability is optional: a sink may expose a
//! [`Syncer`] (push to durable storage) and/or a [`Flusher`] (drain its own
//! buffer). When a FATAL entry is handled the relay probes for them in that
//! order and invokes at most one.

use std::io;

/// Destination the relay writes formatted lines to
pub trait Sink: Send {
    /// Write the whole buffer or fail
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    fn name(&self) -> &str;

    /// Shared stream this sink writes to, such as `"stdout"`
    ///
    /// Two sinks reporting the same destination are treated as one: a failed
    /// write to the configured sink is not replayed on a fallback with the
    /// same destination.
    fn destination(&self) -> Option<&str> {
        None
    }

    fn as_syncer(&mut self) -> Option<&mut dyn Syncer> {
        None
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        None
    }
}

/// Capability to synchronize a sink to durable storage
pub trait Syncer {
    fn sync(&mut self) -> io::Result<()>;
}

/// Capability to flush a sink's internal buffer
pub trait Flusher {
    fn flush(&mut self) -> io::Result<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        (**self).write(buf)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn destination(&self) -> Option<&str> {
        (**self).destination()
    }

    fn as_syncer(&mut self) -> Option<&mut dyn Syncer> {
        (**self).as_syncer()
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        (**self).as_flusher()
    }
}

/// Which durability hook ran, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    Synced,
    Flushed,
    Unsupported,
}

/// Best-effort durability for a FATAL entry: sync if offered, else flush
pub fn make_durable(sink: &mut dyn Sink) -> (Durability, io::Result<()>) {
    if let Some(syncer) = sink.as_syncer() {
        return (Durability::Synced, syncer.sync());
    }
    match sink.as_flusher() {
        Some(flusher) => (Durability::Flushed, flusher.flush()),
        None => (Durability::Unsupported, Ok(())),
    }
}

/// Drain a sink's buffer for an explicit flush request: flush if offered, else sync
pub fn drain(sink: &mut dyn Sink) -> io::Result<()> {
    if let Some(flusher) = sink.as_flusher() {
        return flusher.flush();
    }
    match sink.as_syncer() {
        Some(syncer) => syncer.sync(),
        None => Ok(()),
    }
}
