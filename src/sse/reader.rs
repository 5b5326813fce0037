//! Pull-based decoder from an SSE body to typed values.

use std::marker::PhantomData;

use futures::Stream;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;

use crate::error::StreamError;
use crate::sse::events::{SseLine, DATA_FIELD, DONE_SENTINEL};
use crate::sse::line::{classify_line, LineBuffer};
use crate::traits::ByteStream;

/// Reads `data:` events from an SSE body and decodes each one as JSON `T`.
///
/// The reader owns the body for its whole lifetime. [`EventReader::close`]
/// releases it explicitly; dropping the reader releases it on any other exit
/// path.
///
/// # Example
///
/// ```ignore
/// let mut reader: EventReader<ChatCompletion> = EventReader::new(body);
/// while let Some(completion) = reader.read().await? {
///     // ...
/// }
/// reader.close();
/// ```
pub struct EventReader<T> {
    body: ByteStream,
    lines: LineBuffer,
    /// The body has yielded its last chunk.
    body_ended: bool,
    /// `[DONE]` was seen; every later read is a clean end of stream.
    done: bool,
    _payload: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> EventReader<T> {
    /// Create a reader that takes ownership of `body`.
    pub fn new(body: ByteStream) -> Self {
        Self {
            body,
            lines: LineBuffer::new(),
            body_ended: false,
            done: false,
            _payload: PhantomData,
        }
    }

    /// Advance to the next `data` event and decode it.
    ///
    /// Returns:
    /// - `Ok(Some(value))` - the next decoded value
    /// - `Ok(None)` - the `[DONE]` sentinel was reached
    /// - `Err(StreamError::Incomplete)` - the body ended without `[DONE]`
    /// - `Err(error)` - invalid JSON, an unexpected field, an oversized or
    ///   non-UTF-8 line, or a body read failure
    pub async fn read(&mut self) -> Result<Option<T>, StreamError> {
        if self.done {
            return Ok(None);
        }

        while let Some(line) = self.next_line().await? {
            match classify_line(line)? {
                SseLine::Empty | SseLine::Comment(_) => continue,
                SseLine::Malformed(raw) => {
                    tracing::debug!(line = %raw, "Skipping SSE line without a field separator");
                    continue;
                }
                SseLine::Field { name, value } => {
                    if name != DATA_FIELD {
                        return Err(StreamError::UnexpectedEventType { field: name });
                    }
                    if value == DONE_SENTINEL {
                        self.done = true;
                        return Ok(None);
                    }
                    return Ok(Some(serde_json::from_str(&value)?));
                }
            }
        }

        Err(StreamError::Incomplete)
    }

    /// Release the underlying body.
    ///
    /// Taking `self` by value means the body can only be released once.
    pub fn close(self) {
        tracing::trace!(done = self.done, "Closing event reader");
        drop(self);
    }

    /// Whether the `[DONE]` sentinel has been reached.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Turn the reader into a [`Stream`] of decoded values.
    ///
    /// The stream ends after `[DONE]`. An error is yielded once and ends the
    /// stream.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, StreamError>> + Send
    where
        T: Send,
    {
        futures::stream::unfold(Some(self), |state| async move {
            let mut reader = match state {
                Some(reader) => reader,
                None => return None,
            };
            match reader.read().await {
                Ok(Some(value)) => Some((Ok(value), Some(reader))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
    }

    /// Next raw line from the body, or `None` once the body is exhausted.
    async fn next_line(&mut self) -> Result<Option<Vec<u8>>, StreamError> {
        loop {
            if let Some(line) = self.lines.next_line()? {
                return Ok(Some(line));
            }

            if self.body_ended {
                return Ok(self.lines.finish());
            }

            match self.body.next().await {
                Some(Ok(chunk)) => self.lines.push(&chunk),
                Some(Err(e)) => return Err(StreamError::Transport(e)),
                None => self.body_ended = true,
            }
        }
    }
}

impl<T> std::fmt::Debug for EventReader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventReader")
            .field("pending_bytes", &self.lines.pending())
            .field("body_ended", &self.body_ended)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
