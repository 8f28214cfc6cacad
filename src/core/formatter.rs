//! Line format for log entries
//!
//! Every entry renders as exactly one line:
//!
//! ```text
//! ~ [<timestamp>] LEVEL -- message -- key="value" key2="value2"
//! ```
//!
//! The timestamp block is present only when enabled. The trailing ` --` and
//! attribute pairs appear only when the entry has attributes. Values are
//! rendered with `Display`, double quotes are swapped for single quotes, and
//! the result is quoted with every non-printable or non-ASCII character
//! escaped.

use super::log_entry::LogEntry;
use super::sink::Sink;
use std::fmt::Write as _;
use std::io;

const PREFIX: &[u8] = b"~ ";
const SEPARATOR: &[u8] = b" --";
const SEPARATOR_SPACE: &[u8] = b" -- ";
const TS_PREFIX: &[u8] = b"[";
const TS_SUFFIX: &[u8] = b"] ";
const SPACE: &[u8] = b" ";
const EQUALS: &[u8] = b"=";
const NEWLINE: &[u8] = b"\n";

/// Issues writes until the first failure, then skips the rest
struct ShortCircuit<'a> {
    sink: &'a mut dyn Sink,
    result: io::Result<()>,
}

impl<'a> ShortCircuit<'a> {
    fn new(sink: &'a mut dyn Sink) -> Self {
        Self { sink, result: Ok(()) }
    }

    fn put(&mut self, bytes: &[u8]) {
        if self.result.is_ok() {
            self.result = self.sink.write(bytes);
        }
    }

    fn finish(self) -> io::Result<()> {
        self.result
    }
}

/// Render the current wall-clock time for the timestamp block
fn timestamp() -> String {
    chrono::Local::now().to_string()
}

/// Write `entry` to `sink` as one line
///
/// The line is issued as a sequence of writes. After the first failing write
/// the remaining ones are skipped and that first error is returned.
pub fn write_entry(
    entry: &LogEntry,
    sink: &mut dyn Sink,
    display_timestamp: bool,
) -> io::Result<()> {
    let mut w = ShortCircuit::new(sink);

    w.put(PREFIX);
    if display_timestamp {
        w.put(TS_PREFIX);
        w.put(timestamp().as_bytes());
        w.put(TS_SUFFIX);
    }
    w.put(entry.level().to_str().as_bytes());
    w.put(SEPARATOR_SPACE);
    w.put(entry.message().as_bytes());

    if !entry.attributes().is_empty() {
        w.put(SEPARATOR);
        for (key, value) in entry.attributes() {
            w.put(SPACE);
            w.put(key.as_bytes());
            w.put(EQUALS);
            let rendered = value.to_string().replace('"', "'");
            w.put(quote_ascii(&rendered).as_bytes());
        }
    }
    w.put(NEWLINE);

    w.finish()
}

/// Render `entry` into a fresh buffer
pub fn format_entry(entry: &LogEntry, display_timestamp: bool) -> Vec<u8> {
    let mut buf = BufferSink(Vec::with_capacity(64));
    // Writing into a Vec cannot fail.
    let _ = write_entry(entry, &mut buf, display_timestamp);
    buf.0
}

struct BufferSink(Vec<u8>);

impl Sink for BufferSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.extend_from_slice(buf);
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}

/// Double-quote `s`, escaping anything that is not printable ASCII
///
/// Backslash and double quote are backslash-escaped, the usual control
/// characters get their short escapes, remaining control bytes become
/// `\xNN`, and non-ASCII characters become `\uNNNN` or `\UNNNNNNNN`.
pub fn quote_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            ' '..='~' => out.push(c),
            c if (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if (c as u32) < 0x1_0000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}
