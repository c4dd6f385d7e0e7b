//! Configuration for the local model server.

use crate::error::{LlmError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";
pub const DEFAULT_TONE: &str = "professional";
pub const DEFAULT_MAX_LENGTH: usize = 280;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const BASE_URL_ENV: &str = "OLLAMA_BASE_URL";
pub const MODEL_ENV: &str = "OLLAMA_MODEL";
pub const TONE_ENV: &str = "POST_TONE";
pub const MAX_LENGTH_ENV: &str = "POST_MAX_LENGTH";

/// Configuration for the Ollama producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalLlmConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,

    /// Model name, as shown by `ollama list`.
    pub model: String,

    /// Sampling temperature (0.0 = deterministic).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Voice the prompt asks for, e.g. "professional" or "casual".
    #[serde(default = "default_tone")]
    pub tone: String,

    /// Character budget stated in the prompt.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

impl Default for LocalLlmConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

impl LocalLlmConfig {
    /// Create a new configuration with default post settings.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            temperature: default_temperature(),
            tone: default_tone(),
            max_length: default_max_length(),
            timeout: default_timeout(),
        }
    }

    /// Defaults overridden by `OLLAMA_BASE_URL`, `OLLAMA_MODEL`, `POST_TONE`
    /// and `POST_MAX_LENGTH`.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    /// Apply the environment overrides to an existing configuration.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            self.model = model;
        }
        if let Ok(tone) = std::env::var(TONE_ENV) {
            self.tone = tone;
        }
        if let Ok(max_length) = std::env::var(MAX_LENGTH_ENV) {
            self.max_length = max_length.trim().parse().map_err(|_| {
                LlmError::ConfigError(format!("{} is not a number: {}", MAX_LENGTH_ENV, max_length))
            })?;
        }
        Ok(self)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Reject settings the server would choke on.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(LlmError::ConfigError("base_url must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(LlmError::ConfigError("model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::ConfigError(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_length == 0 {
            return Err(LlmError::ConfigError("max_length must be positive".to_string()));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}
