//! Error types for the Ollama producer.

use review_core::GenerationError;
use thiserror::Error;

/// Result type for producer operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Failures talking to the model server
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport failure talking to Ollama
    #[error("Request to Ollama failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Model not pulled on the server
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Server up but refusing work (503)
    #[error("Ollama unavailable: {0}")]
    ServiceUnavailable(String),

    /// Body did not match the chat or tags schema
    #[error("Unexpected reply from Ollama: {0}")]
    InvalidResponse(String),

    /// Any other error status
    #[error("Ollama error: {0}")]
    ProviderError(String),

    #[error("Invalid LLM configuration: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Whether the server could not be reached or is temporarily busy
    pub fn is_unavailable(&self) -> bool {
        match self {
            LlmError::HttpError(e) => e.is_connect() || e.is_timeout(),
            LlmError::ServiceUnavailable(_) => true,
            _ => false,
        }
    }
}

/// Unreachable or busy servers become `Unavailable`; everything else is `Failed`.
impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        if err.is_unavailable() {
            GenerationError::Unavailable(err.to_string())
        } else {
            GenerationError::Failed(err.to_string())
        }
    }
}
