//! Error types for modelstream.
//!
//! - **Stream errors**: decoding an SSE body into typed values
//! - **Client errors**: sending a chat completion request, including the
//!   descriptive message built for non-success HTTP statuses
//!
//! Transport-level [`HttpError`](crate::traits::HttpError) and
//! [`CredentialsError`](crate::traits::CredentialsError) live next to the
//! traits that produce them.

mod client;
mod stream;

pub use client::{http_status_message, ClientError};
pub use stream::StreamError;
