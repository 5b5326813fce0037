//! Credentials provider trait abstraction.
//!
//! Provides a trait-based abstraction for looking up the bearer token used
//! to authenticate against the inference endpoint.

use async_trait::async_trait;

/// Credentials lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    /// No token is configured for the host
    #[error("no authentication token found for {host}")]
    NotFound { host: String },
    /// The external credential helper ran but reported a failure
    #[error("credential helper failed: {0}")]
    CommandFailed(String),
    /// IO error while running the credential helper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for bearer token retrieval.
///
/// # Example
///
/// ```ignore
/// use modelstream::traits::CredentialsProvider;
///
/// async fn token<P: CredentialsProvider>(provider: &P) -> Result<String, CredentialsError> {
///     provider.token_for_host("github.com").await
/// }
/// ```
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Return the token configured for `host`.
    ///
    /// # Returns
    /// - `Ok(token)` with a non-empty token
    /// - `Err(CredentialsError::NotFound)` if no token is configured
    /// - `Err(error)` if the lookup itself failed
    async fn token_for_host(&self, host: &str) -> Result<String, CredentialsError>;
}
