//! TCP sink for remote log collection
//!
//! Sends lines to a remote collector over TCP. A line is assembled from the
//! formatter's writes and only sent once complete, so a reconnect never
//! leaves a fragment on the new connection.

use crate::core::{Flusher, Result, Sink};
use std::io::{self, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

const IO_TIMEOUT: Duration = Duration::from_secs(5);

/// TCP sink that sends each line to a remote server
///
/// # Example
///
/// ```no_run
/// use llog::{Logger, TcpSink};
///
/// let sink = TcpSink::new("127.0.0.1:5170").expect("Failed to connect to log collector");
/// let logger = Logger::builder().output(sink).build();
/// logger.info("This line will be sent to 127.0.0.1:5170", &[]);
/// ```
pub struct TcpSink {
    stream: Option<TcpStream>,
    address: String,
    reconnect_on_error: bool,
    pending: Vec<u8>,
}

impl TcpSink {
    /// Connect to `addr` (e.g. "localhost:5170")
    ///
    /// # Errors
    ///
    /// Returns error if connection fails
    pub fn new(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream = Self::connect(&address)?;

        Ok(Self {
            stream: Some(stream),
            address,
            reconnect_on_error: true,
            pending: Vec::with_capacity(128),
        })
    }

    /// Enable or disable one reconnect attempt per failed line
    ///
    /// Default: enabled
    #[must_use]
    pub fn with_reconnect(mut self, enable: bool) -> Self {
        self.reconnect_on_error = enable;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn connect(address: &str) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(address)?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    fn send_pending(&mut self) -> io::Result<()> {
        let stream = match self.stream.as_mut() {
            Some(stream) => stream,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "collector connection lost",
                ))
            }
        };
        stream.write_all(&self.pending)
    }

    fn send_line(&mut self) -> io::Result<()> {
        let first = self.send_pending();
        let result = match first {
            Ok(()) => Ok(()),
            Err(e) if self.reconnect_on_error => {
                self.stream = None;
                match Self::connect(&self.address) {
                    Ok(stream) => {
                        self.stream = Some(stream);
                        self.send_pending()
                    }
                    Err(reconnect_err) => Err(io::Error::new(
                        e.kind(),
                        format!("{} (reconnect: {})", e, reconnect_err),
                    )),
                }
            }
            Err(e) => {
                self.stream = None;
                Err(e)
            }
        };
        self.pending.clear();
        result
    }
}

impl Sink for TcpSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.pending.extend_from_slice(buf);
        // The formatter ends every line with a lone newline write; messages
        // are written raw and may end in a newline of their own.
        if buf == b"\n" {
            self.send_line()
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &str {
        "tcp"
    }

    fn as_flusher(&mut self) -> Option<&mut dyn Flusher> {
        Some(self)
    }
}

impl Flusher for TcpSink {
    fn flush(&mut self) -> io::Result<()> {
        match self.stream.as_mut() {
            Some(stream) => stream.flush(),
            None => Ok(()),
        }
    }
}
