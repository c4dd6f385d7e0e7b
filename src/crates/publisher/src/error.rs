//! Error types for publisher construction and credential checks.
//!
//! Failures of `publish` itself are reported as
//! [`PublishFailureReason`](review_core::PublishFailureReason) values.

use thiserror::Error;

/// Result type for publisher operations.
pub type Result<T> = std::result::Result<T, PublisherError>;

#[derive(Debug, Error)]
pub enum PublisherError {
    /// Required setting missing or malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Credential environment variable not set.
    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    /// The platform rejected the credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The platform answered with something unexpected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
