//! X (Twitter) API v2 publisher.
//!
//! Posts with `POST /2/tweets` using an OAuth 2.0 user-context bearer token.
//! The character limit is checked locally first so an over-long draft never
//! reaches the network.
//!
//! # Status mapping
//!
//! | response            | failure reason  |
//! |---------------------|-----------------|
//! | 429                 | `RateLimited`   |
//! | 401, 403            | `Unauthorized`  |
//! | other non-2xx       | `Other`         |
//! | transport error     | `Other`         |

use crate::config::XConfig;
use crate::error::{PublisherError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use review_core::{check_length, PublishFailureReason, PublishedPost, Publisher};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Publisher for X (Twitter).
#[derive(Clone)]
pub struct XPublisher {
    config: XConfig,
    client: Client,
}

impl XPublisher {
    pub fn new(config: XConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PublisherError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &XConfig {
        &self.config
    }

    /// Confirm the token is accepted and return the account handle.
    pub async fn verify_credentials(&self) -> Result<String> {
        let response = self
            .client
            .get(self.config.endpoint("/2/users/me"))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PublisherError::Unauthorized(format!("HTTP {}: {}", status, error_text)));
        }
        if !status.is_success() {
            return Err(PublisherError::InvalidResponse(format!("HTTP {}", status)));
        }

        let me: ApiEnvelope<UserData> = response
            .json()
            .await
            .map_err(|e| PublisherError::InvalidResponse(e.to_string()))?;
        Ok(me.data.username)
    }

    async fn submit(&self, text: &str) -> std::result::Result<PublishedPost, PublishFailureReason> {
        let response = self
            .client
            .post(self.config.endpoint("/2/tweets"))
            .bearer_auth(&self.config.access_token)
            .json(&CreatePostRequest { text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PublishFailureReason::other(format!("timed out contacting X: {}", e))
                } else {
                    PublishFailureReason::other(format!("request to X failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %error_text, "X rejected the post");
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => PublishFailureReason::RateLimited,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PublishFailureReason::Unauthorized,
                _ => PublishFailureReason::other(format!(
                    "X API error {}: {}",
                    status,
                    error_text.trim()
                )),
            });
        }

        let created: ApiEnvelope<CreatedPost> = response.json().await.map_err(|e| {
            PublishFailureReason::other(format!("unexpected response from X: {}", e))
        })?;

        let url = self.config.post_url(&created.data.id);
        Ok(PublishedPost {
            id: created.data.id,
            url,
        })
    }
}

#[async_trait]
impl Publisher for XPublisher {
    async fn publish(&self, text: &str) -> std::result::Result<PublishedPost, PublishFailureReason> {
        check_length(text, self.config.max_length)?;

        match self.submit(text).await {
            Ok(post) => {
                info!(post_id = %post.id, "Published to X");
                Ok(post)
            }
            Err(reason) => {
                warn!(reason = %reason, "Publishing to X failed");
                Err(reason)
            }
        }
    }
}

// X API types
#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            XPublisher::new(XConfig::new(" ", "company_x")),
            Err(PublisherError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_too_long_is_rejected_before_any_request() {
        // Nothing listens on this address; reaching the network would yield `Other`.
        let config = XConfig::new("token", "company_x").with_base_url("http://127.0.0.1:9");
        let publisher = XPublisher::new(config).unwrap();

        let text = "a".repeat(281);
        assert_eq!(
            publisher.publish(&text).await,
            Err(PublishFailureReason::TooLong {
                length: 281,
                limit: 280
            })
        );
    }

    #[test]
    fn test_created_post_parsing() {
        let created: ApiEnvelope<CreatedPost> = serde_json::from_str(
            r#"{"data": {"id": "1790000000000000001", "text": "hello", "edit_history_tweet_ids": ["1790000000000000001"]}}"#,
        )
        .unwrap();
        assert_eq!(created.data.id, "1790000000000000001");
    }
}
