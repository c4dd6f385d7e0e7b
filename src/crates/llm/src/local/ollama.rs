//! Ollama client implementation.
//!
//! Talks to the Ollama HTTP API (`/api/chat`, `/api/tags`) and implements
//! [`ContentProducer`] so the review workflow can draft and revise posts with
//! a locally running model.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::local::OllamaClient;
//! use llm::config::LocalLlmConfig;
//! use review_core::ContentProducer;
//!
//! let client = OllamaClient::new(LocalLlmConfig::from_env()?)?;
//! let draft = client.generate("Company X launches new product.").await?;
//! ```

use crate::config::LocalLlmConfig;
use crate::error::{LlmError, Result};
use crate::prompts::{ChatMessage, PostPrompts};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use review_core::{ContentProducer, GenerationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ollama client for local LLM inference.
#[derive(Clone)]
pub struct OllamaClient {
    config: LocalLlmConfig,
    client: Client,
    prompts: PostPrompts,
}

impl OllamaClient {
    /// Create a new Ollama client with the given configuration.
    pub fn new(config: LocalLlmConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("failed to build HTTP client: {}", e)))?;
        let prompts = PostPrompts::new(config.tone.clone(), config.max_length);

        Ok(Self {
            config,
            client,
            prompts,
        })
    }

    pub fn config(&self) -> &LocalLlmConfig {
        &self.config
    }

    /// Check if Ollama server is running.
    pub async fn check_health(&self) -> Result<bool> {
        match self.client.get(self.config.endpoint("/api/tags")).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                debug!(error = %e, "Ollama health check failed");
                Ok(false)
            }
        }
    }

    /// Models pulled on the server.
    pub async fn fetch_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self
            .client
            .get(self.config.endpoint("/api/tags"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::ProviderError(format!(
                "Failed to fetch models from Ollama: HTTP {}",
                response.status()
            )));
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(tags.models)
    }

    /// Send one non-streaming chat request and return the trimmed reply.
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let body = OllamaRequest {
            model: &self.config.model,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
            },
        };

        let response = self
            .client
            .post(self.config.endpoint("/api/chat"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, model = %self.config.model, "Ollama returned an error");
            return Err(match status {
                StatusCode::NOT_FOUND => LlmError::ModelNotFound(format!(
                    "{} ({}); run `ollama pull {}`",
                    self.config.model,
                    error_text.trim(),
                    self.config.model
                )),
                StatusCode::SERVICE_UNAVAILABLE => LlmError::ServiceUnavailable(error_text),
                _ => LlmError::ProviderError(format!("Ollama API error {}: {}", status, error_text)),
            });
        }

        let reply: OllamaResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        debug!(
            model = %reply.model,
            eval_count = reply.eval_count.unwrap_or(0),
            "Ollama reply received"
        );
        Ok(reply.message.content.trim().to_string())
    }
}

#[async_trait]
impl ContentProducer for OllamaClient {
    async fn generate(&self, article: &str) -> std::result::Result<String, GenerationError> {
        Ok(self.chat(self.prompts.initial(article)).await?)
    }

    async fn revise(&self, article: &str, feedback: &str) -> std::result::Result<String, GenerationError> {
        Ok(self.chat(self.prompts.revision(article, feedback)).await?)
    }
}

// Ollama API types
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    message: ChatMessage,
    #[serde(default)]
    eval_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// A model available on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}
