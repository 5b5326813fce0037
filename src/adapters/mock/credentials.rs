//! In-memory credentials provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::traits::{CredentialsError, CredentialsProvider};

/// In-memory credentials provider for testing.
///
/// Holds one token per host; hosts without a token report
/// [`CredentialsError::NotFound`].
///
/// # Example
///
/// ```ignore
/// use modelstream::adapters::mock::InMemoryCredentials;
/// use modelstream::traits::CredentialsProvider;
///
/// let provider = InMemoryCredentials::with_token("github.com", "test-token");
/// assert_eq!(provider.token_for_host("github.com").await?, "test-token");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    tokens: Arc<Mutex<HashMap<String, String>>>,
    /// Whether lookups should fail
    should_fail: Arc<Mutex<bool>>,
}

impl InMemoryCredentials {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with one token.
    pub fn with_token(host: &str, token: &str) -> Self {
        let provider = Self::new();
        provider.set_token(host, token);
        provider
    }

    /// Set the token for `host`.
    pub fn set_token(&self, host: &str, token: &str) {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(host.to_string(), token.to_string());
    }

    /// Remove every stored token.
    pub fn clear(&self) {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Configure whether lookups should fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        *self
            .should_fail
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = should_fail;
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentials {
    async fn token_for_host(&self, host: &str) -> Result<String, CredentialsError> {
        if *self
            .should_fail
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
        {
            return Err(CredentialsError::CommandFailed(
                "Mock lookup failure".to_string(),
            ));
        }

        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(host)
            .cloned()
            .ok_or_else(|| CredentialsError::NotFound {
                host: host.to_string(),
            })
    }
}
