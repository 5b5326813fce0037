//! Line splitting and classification for SSE bodies.

use crate::error::StreamError;
use crate::sse::events::SseLine;

/// Classify a single SSE line (without its line terminator).
///
/// The field name and value are split at the first colon and both trimmed,
/// so `data:{...}` and `data:  {...}  ` classify the same way.
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.trim().is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    match line.split_once(':') {
        Some((name, value)) => SseLine::Field {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
        },
        None => SseLine::Malformed(line.to_string()),
    }
}

/// Classify a raw line straight from the body.
///
/// Blank and comment lines are recognized on the raw bytes so that non-UTF-8
/// content inside them never fails the read. Any other line must be valid
/// UTF-8.
pub fn classify_line(raw: Vec<u8>) -> Result<SseLine, StreamError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(SseLine::Empty);
    }

    if let Some(stripped) = raw.strip_prefix(b":") {
        return Ok(SseLine::Comment(
            String::from_utf8_lossy(stripped).trim().to_string(),
        ));
    }

    Ok(parse_sse_line(&String::from_utf8(raw)?))
}

/// Longest line, in bytes, the buffer will hold before giving up.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Accumulates body chunks and hands back complete lines as raw bytes.
///
/// Lines end at `\n`; a `\r` right before it is dropped. Chunk boundaries can
/// fall anywhere, including inside a multi-byte UTF-8 sequence, because
/// nothing is decoded here.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
    /// Bytes of `buf` already known to contain no `\n`.
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of body bytes.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete line, if one is buffered.
    ///
    /// Fails with [`StreamError::LineTooLong`] once more than
    /// [`MAX_LINE_BYTES`] are pending without a terminator.
    pub fn next_line(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        let Some(offset) = self.buf[self.scanned..].iter().position(|&b| b == b'\n') else {
            self.scanned = self.buf.len();
            if self.buf.len() > MAX_LINE_BYTES {
                return Err(StreamError::LineTooLong {
                    limit: MAX_LINE_BYTES,
                });
            }
            return Ok(None);
        };

        let newline_pos = self.scanned + offset;
        let mut line: Vec<u8> = self.buf.drain(..=newline_pos).collect();
        self.scanned = 0;
        line.pop();
        strip_carriage_return(&mut line);
        Ok(Some(line))
    }

    /// Take whatever is left once the body has ended.
    ///
    /// Returns `None` when nothing is buffered.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        if self.buf.is_empty() {
            return None;
        }
        self.scanned = 0;
        let mut line = std::mem::take(&mut self.buf);
        strip_carriage_return(&mut line);
        Some(line)
    }

    /// Number of bytes waiting for a line terminator.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

fn strip_carriage_return(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
}
