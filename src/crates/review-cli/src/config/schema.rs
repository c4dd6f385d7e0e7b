//! Configuration schema for the `review` binary
//!
//! Every section has defaults, so an empty file (or no file at all) is a
//! valid configuration: SQLite storage under `.review/`, a local Ollama
//! server, and a dry-run publisher.

use crate::error::{CliError, Result};
use llm::LocalLlmConfig;
use publisher::XConfig;
use review_core::{CoordinatorConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_POST_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    pub storage: StorageConfig,
    pub workflow: WorkflowConfig,
    pub llm: LlmConfig,
    pub publisher: PublisherConfig,
    pub logging: LoggingConfig,
}

/// Where checkpoints live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    File,
    /// Lost when the process exits; only useful for trying things out
    Memory,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Database file (sqlite) or directory (file); relative paths resolve
    /// against the working directory
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured path, or the backend's default under `.review/`
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => match self.backend {
                StorageBackend::Sqlite => PathBuf::from(".review").join("checkpoints.db"),
                StorageBackend::File | StorageBackend::Memory => PathBuf::from(".review").join("runs"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Drafts allowed per run, including the first
    pub max_iterations: u32,
    pub generation_timeout_secs: u64,
    pub publish_timeout_secs: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generation_timeout_secs: 120,
            publish_timeout_secs: 30,
        }
    }
}

impl WorkflowConfig {
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig::default()
            .with_max_iterations(self.max_iterations)
            .with_generation_timeout(Duration::from_secs(self.generation_timeout_secs))
            .with_publish_timeout(Duration::from_secs(self.publish_timeout_secs))
    }
}

/// Ollama settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub tone: String,
    /// Character budget stated in the prompt
    pub max_length: usize,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let local = LocalLlmConfig::default();
        Self {
            base_url: local.base_url,
            model: local.model,
            temperature: local.temperature,
            tone: local.tone,
            max_length: local.max_length,
            timeout_secs: local.timeout.as_secs(),
        }
    }
}

impl LlmConfig {
    pub fn local_config(&self) -> LocalLlmConfig {
        LocalLlmConfig::new(self.base_url.clone(), self.model.clone())
            .with_temperature(self.temperature)
            .with_tone(self.tone.clone())
            .with_max_length(self.max_length)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublisherKind {
    /// X when an access token is configured, dry run otherwise
    #[default]
    Auto,
    X,
    DryRun,
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublisherConfig {
    pub kind: PublisherKind,
    pub base_url: String,
    pub access_token: Option<String>,
    pub username: Option<String>,
    /// Platform character limit checked before submission
    pub max_length: usize,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for PublisherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublisherConfig")
            .field("kind", &self.kind)
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("max_length", &self.max_length)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            kind: PublisherKind::Auto,
            base_url: publisher::config::DEFAULT_API_BASE_URL.to_string(),
            access_token: None,
            username: None,
            max_length: DEFAULT_MAX_POST_LENGTH,
            timeout_secs: 30,
        }
    }
}

impl PublisherConfig {
    /// `Auto` settled against the configured credentials
    pub fn resolved_kind(&self) -> PublisherKind {
        match self.kind {
            PublisherKind::Auto => {
                let has_token = self
                    .access_token
                    .as_deref()
                    .is_some_and(|token| !token.trim().is_empty());
                if has_token {
                    PublisherKind::X
                } else {
                    PublisherKind::DryRun
                }
            }
            kind => kind,
        }
    }

    /// Settings for the X publisher; both credentials are required
    pub fn x_config(&self) -> Result<XConfig> {
        let access_token = self.access_token.clone().ok_or_else(|| {
            CliError::InvalidConfig(format!(
                "publisher.access_token is not set (or export {})",
                publisher::config::ACCESS_TOKEN_ENV
            ))
        })?;
        let username = self.username.clone().ok_or_else(|| {
            CliError::InvalidConfig(format!(
                "publisher.username is not set (or export {})",
                publisher::config::USERNAME_ENV
            ))
        })?;

        Ok(XConfig::new(access_token, username)
            .with_base_url(self.base_url.clone())
            .with_max_length(self.max_length)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl ReviewConfig {
    /// Expand `${VAR}` references in credential and URL fields
    ///
    /// A referenced variable that is not set is an error rather than being
    /// passed on literally.
    pub fn resolve_env_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = &self.publisher.access_token {
            self.publisher.access_token = Some(expand_env_var(token, &lookup)?);
        }
        if let Some(username) = &self.publisher.username {
            self.publisher.username = Some(expand_env_var(username, &lookup)?);
        }
        self.publisher.base_url = expand_env_var(&self.publisher.base_url, &lookup)?;
        self.llm.base_url = expand_env_var(&self.llm.base_url, &lookup)?;
        Ok(())
    }

    /// Apply the well-known environment variables on top of file settings
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(llm::config::BASE_URL_ENV) {
            self.llm.base_url = base_url;
        }
        if let Some(model) = lookup(llm::config::MODEL_ENV) {
            self.llm.model = model;
        }
        if let Some(tone) = lookup(llm::config::TONE_ENV) {
            self.llm.tone = tone;
        }
        if let Some(max_length) = lookup(llm::config::MAX_LENGTH_ENV) {
            self.llm.max_length = max_length.trim().parse().map_err(|_| {
                CliError::InvalidConfig(format!(
                    "{} is not a number: {}",
                    llm::config::MAX_LENGTH_ENV,
                    max_length
                ))
            })?;
        }
        if let Some(token) = lookup(publisher::config::ACCESS_TOKEN_ENV) {
            self.publisher.access_token = Some(token);
        }
        if let Some(username) = lookup(publisher::config::USERNAME_ENV) {
            self.publisher.username = Some(username);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.workflow
            .coordinator_config()
            .validate()
            .map_err(|e| CliError::InvalidConfig(format!("[workflow] {}", e)))?;
        self.llm
            .local_config()
            .validate()
            .map_err(|e| CliError::InvalidConfig(format!("[llm] {}", e)))?;
        if self.publisher.max_length == 0 {
            return Err(CliError::InvalidConfig(
                "[publisher] max_length must be positive".to_string(),
            ));
        }
        if self.publisher.resolved_kind() == PublisherKind::X {
            self.publisher
                .x_config()?
                .validate()
                .map_err(|e| CliError::InvalidConfig(format!("[publisher] {}", e)))?;
        }
        Ok(())
    }
}

/// Expand a value of the form `${VAR}`; anything else is returned as is
fn expand_env_var<F>(value: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        Some(name) => lookup(name).ok_or_else(|| {
            CliError::InvalidConfig(format!(
                "environment variable {} referenced in config is not set",
                name
            ))
        }),
        None => Ok(value.to_string()),
    }
}
