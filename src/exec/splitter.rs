// src/exec/splitter.rs

//! Reassembly of raw byte chunks into complete output lines.
//!
//! The pipe that carries the backup script's output hands us data in
//! arbitrary chunk sizes; a line terminator can land anywhere, including
//! split across two reads. [`LineSplitter`] buffers bytes until it has seen
//! a `\n`, so callers only ever observe whole lines.

/// Accumulates byte chunks and yields complete `\n`-terminated lines.
///
/// Bytes are never dropped or duplicated: whatever does not yet end in a
/// newline stays buffered until more data arrives or [`close`] is called.
/// A trailing `\r` (from CRLF output) is kept as part of the line content.
///
/// [`close`]: LineSplitter::close
#[derive(Debug, Default)]
pub struct LineSplitter {
    buf: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of raw bytes, returning every line completed by it.
    ///
    /// Lines are returned without their `\n` terminator, in the order the
    /// bytes arrived. Non-UTF-8 bytes are replaced rather than dropped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            // drop only the terminator itself
            lines.push(String::from_utf8_lossy(&line[..line.len() - 1]).into_owned());
        }
        lines
    }

    /// Flush whatever remains after the stream has closed.
    ///
    /// Returns the residual bytes as one final (unterminated) line, or
    /// `None` if the stream ended exactly on a line boundary.
    pub fn close(self) -> Option<String> {
        if self.buf.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.buf).into_owned())
        }
    }
}
