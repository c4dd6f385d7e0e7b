//! Configuration for the X (Twitter) publisher.

use crate::error::{PublisherError, Result};
use review_core::DEFAULT_MAX_POST_LENGTH;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com";
pub const DEFAULT_WEB_BASE_URL: &str = "https://twitter.com";

/// Environment variable holding the OAuth 2.0 user-context access token.
pub const ACCESS_TOKEN_ENV: &str = "TWITTER_ACCESS_TOKEN";

/// Environment variable holding the account handle used in post URLs.
pub const USERNAME_ENV: &str = "TWITTER_USERNAME";

/// Configuration for [`XPublisher`](crate::XPublisher).
#[derive(Clone, Serialize, Deserialize)]
pub struct XConfig {
    /// API base URL.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Bearer token with `tweet.write` scope.
    pub access_token: String,

    /// Account handle, without `@`.
    pub username: String,

    /// Character limit enforced before submission.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl std::fmt::Debug for XConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("username", &self.username)
            .field("max_length", &self.max_length)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl XConfig {
    pub fn new(access_token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            base_url: default_api_base_url(),
            access_token: access_token.into(),
            username: username.into(),
            max_length: default_max_length(),
            timeout: default_timeout(),
        }
    }

    /// Read the token and username from `TWITTER_ACCESS_TOKEN` and
    /// `TWITTER_USERNAME`.
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var(ACCESS_TOKEN_ENV).map_err(|_| {
            PublisherError::CredentialNotFound(format!("Environment variable: {}", ACCESS_TOKEN_ENV))
        })?;
        let username = std::env::var(USERNAME_ENV).map_err(|_| {
            PublisherError::CredentialNotFound(format!("Environment variable: {}", USERNAME_ENV))
        })?;
        Ok(Self::new(access_token, username))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(PublisherError::ConfigError("access_token must not be empty".to_string()));
        }
        let username = self.username.trim_start_matches('@');
        if username.is_empty() {
            return Err(PublisherError::ConfigError("username must not be empty".to_string()));
        }
        if self.max_length == 0 {
            return Err(PublisherError::ConfigError("max_length must be positive".to_string()));
        }
        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Public URL of a post by this account.
    pub fn post_url(&self, id: &str) -> String {
        format!(
            "{}/{}/status/{}",
            DEFAULT_WEB_BASE_URL,
            self.username.trim_start_matches('@'),
            id
        )
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_max_length() -> usize {
    DEFAULT_MAX_POST_LENGTH
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}
