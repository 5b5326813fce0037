//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for the one HTTP operation the client
//! needs: a POST whose response body is consumed incrementally. Keeping it
//! behind a trait lets tests swap in [`crate::adapters::MockHttpClient`].

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::Stream;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::pin::Pin;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// An open response body, delivered as a sequence of byte chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HttpError {
    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("request timeout: {0}")]
    Timeout(String),
    /// Reading the response body failed
    #[error("IO error: {0}")]
    Io(String),
    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Response whose body has not been read yet.
///
/// The body is owned by whoever holds the response; dropping it releases the
/// underlying connection.
pub struct StreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: ByteStream,
}

impl StreamResponse {
    /// Create a new response.
    pub fn new(status: u16, body: ByteStream) -> Self {
        Self { status, body }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the body until it ends or fails, consuming the response.
    ///
    /// Returns every byte received before the end, plus the read error if the
    /// body failed partway.
    pub async fn drain(mut self) -> (Bytes, Option<HttpError>) {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.body.next().await {
            match chunk {
                Ok(chunk) => buf.extend_from_slice(&chunk),
                Err(e) => return (buf.freeze(), Some(e)),
            }
        }
        (buf.freeze(), None)
    }
}

impl std::fmt::Debug for StreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and a mock
/// client for testing.
///
/// # Example
///
/// ```ignore
/// use modelstream::traits::{Headers, HttpClient};
///
/// async fn status_of<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.post_stream("https://example.com", "{}", &Headers::new()).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response with its body unread.
    ///
    /// Non-success statuses are *not* errors at this layer; callers inspect
    /// [`StreamResponse::status`] and decide what to do with the body.
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamResponse, HttpError>;
}
