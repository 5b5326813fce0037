//! Client configuration.

use std::time::Duration;

/// Default chat completions endpoint
pub const DEFAULT_INFERENCE_URL: &str = "https://models.github.ai/inference/chat/completions";

/// Value sent in the `x-ms-useragent` / `x-ms-user-agent` headers
pub const DEFAULT_USER_AGENT: &str = "github-cli-models";

/// Environment variable overriding the inference URL
pub const INFERENCE_URL_ENV: &str = "MODELSTREAM_INFERENCE_URL";

/// Configuration for [`ModelsClient`](crate::client::ModelsClient).
///
/// # Example
///
/// ```ignore
/// use modelstream::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_timeout(std::time::Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Chat completions endpoint
    pub inference_url: String,
    /// User agent reported to the service
    pub user_agent: String,
    /// Overall request timeout (None = no timeout)
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chat completions endpoint.
    pub fn with_inference_url(mut self, url: impl Into<String>) -> Self {
        self.inference_url = url.into();
        self
    }

    /// Set the user agent header value.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create config from the environment.
    /// `MODELSTREAM_INFERENCE_URL` overrides the endpoint when set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(INFERENCE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_inference_url(url.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.inference_url, DEFAULT_INFERENCE_URL);
        assert_eq!(config.user_agent, "github-cli-models");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new()
            .with_inference_url("http://localhost:9999/chat")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.inference_url, "http://localhost:9999/chat");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        std::env::set_var(INFERENCE_URL_ENV, "http://127.0.0.1:1234/x");
        let config = ClientConfig::from_env();
        std::env::remove_var(INFERENCE_URL_ENV);
        assert_eq!(config.inference_url, "http://127.0.0.1:1234/x");
    }

    #[test]
    #[serial]
    fn test_from_env_blank_uses_default() {
        std::env::set_var(INFERENCE_URL_ENV, "  ");
        let config = ClientConfig::from_env();
        std::env::remove_var(INFERENCE_URL_ENV);
        assert_eq!(config.inference_url, DEFAULT_INFERENCE_URL);
    }
}
