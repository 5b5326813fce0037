//! GitHub CLI backed credentials provider.
//!
//! Looks for a token in the environment first and falls back to asking the
//! `gh` CLI (`gh auth token --hostname <host>`).

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use crate::traits::{CredentialsError, CredentialsProvider};

/// Host whose tokens live in `GH_TOKEN` / `GITHUB_TOKEN`
pub const GITHUB_HOST: &str = "github.com";

/// Environment variables checked for github.com, in order
const GITHUB_TOKEN_VARS: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

/// Environment variables checked for any other host, in order
const ENTERPRISE_TOKEN_VARS: [&str; 2] = ["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"];

/// Credentials provider using environment variables and the `gh` CLI.
#[derive(Debug, Clone)]
pub struct GhCredentialsProvider {
    gh_binary: String,
}

impl GhCredentialsProvider {
    pub fn new() -> Self {
        Self {
            gh_binary: "gh".to_string(),
        }
    }

    /// Use a different executable in place of `gh`.
    pub fn with_gh_binary(binary: impl Into<String>) -> Self {
        Self {
            gh_binary: binary.into(),
        }
    }

    fn token_vars(host: &str) -> &'static [&'static str] {
        if host.eq_ignore_ascii_case(GITHUB_HOST) {
            &GITHUB_TOKEN_VARS
        } else {
            &ENTERPRISE_TOKEN_VARS
        }
    }

    fn token_from_env(host: &str) -> Option<String> {
        Self::token_vars(host).iter().find_map(|var| {
            std::env::var(var)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
    }

    async fn token_from_gh(&self, host: &str) -> Result<String, CredentialsError> {
        let output = match Command::new(&self.gh_binary)
            .args(["auth", "token", "--hostname", host])
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} not installed", self.gh_binary);
                return Err(CredentialsError::NotFound {
                    host: host.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            tracing::debug!(
                "{} auth token failed: {}",
                self.gh_binary,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(CredentialsError::NotFound {
                host: host.to_string(),
            });
        }

        let token = String::from_utf8(output.stdout)
            .map_err(|e| CredentialsError::CommandFailed(e.to_string()))?;
        let token = token.trim();
        if token.is_empty() {
            return Err(CredentialsError::NotFound {
                host: host.to_string(),
            });
        }
        Ok(token.to_string())
    }
}

impl Default for GhCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for GhCredentialsProvider {
    async fn token_for_host(&self, host: &str) -> Result<String, CredentialsError> {
        if let Some(token) = Self::token_from_env(host) {
            tracing::debug!("Using token from environment for {}", host);
            return Ok(token);
        }
        self.token_from_gh(host).await
    }
}
