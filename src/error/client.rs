//! Errors returned by the chat completion client.

use reqwest::StatusCode;

use super::stream::StreamError;
use crate::traits::HttpError;

/// Errors from a single chat completion request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The server answered with a non-success status.
    ///
    /// `message` is the human-readable text built by [`http_status_message`].
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// The request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Decoding the response stream failed.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl ClientError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the user needs to authenticate again.
    pub fn requires_reauth(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

/// Build the error text for a failed HTTP response.
///
/// The message starts with a short phrase keyed by status (`unauthorized`,
/// `bad request`, or the raw status line) and, when the body is non-empty,
/// continues with the body on the next line.
pub fn http_status_message(status: u16, body: &[u8]) -> String {
    let mut message = match StatusCode::from_u16(status) {
        Ok(StatusCode::UNAUTHORIZED) => "unauthorized".to_string(),
        Ok(StatusCode::BAD_REQUEST) => "bad request".to_string(),
        Ok(code) => format!("unexpected response from the server: {}", code),
        Err(_) => format!("unexpected response from the server: {}", status),
    };

    if !body.is_empty() {
        message.push('\n');
        message.push_str(&String::from_utf8_lossy(body));
    }

    message
}
