//! Streaming-related error types.
//!
//! This module defines errors that occur while decoding an SSE response body
//! into typed values.

use crate::traits::HttpError;

/// Stream-specific error variants.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A `data` payload was not valid JSON for the expected type.
    #[error("invalid JSON in event data: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field other than `data` was received.
    #[error("unexpected event type: {field}")]
    UnexpectedEventType { field: String },

    /// The body ended cleanly before the `[DONE]` sentinel.
    #[error("incomplete stream")]
    Incomplete,

    /// A line was not valid UTF-8.
    #[error("invalid UTF-8 in event stream: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A single line grew past the buffer cap without a newline.
    #[error("event stream line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    /// Reading the underlying body failed.
    #[error(transparent)]
    Transport(#[from] HttpError),
}

impl StreamError {
    /// Whether the body was cut short, either by a transport failure or by a
    /// clean close without the `[DONE]` sentinel.
    pub fn is_truncation(&self) -> bool {
        matches!(self, StreamError::Incomplete | StreamError::Transport(_))
    }
}
