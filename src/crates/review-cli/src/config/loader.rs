//! Layered configuration loading
//!
//! Sources, later ones winning key by key:
//! 1. Default values
//! 2. User-level config: `~/.review/review.toml`
//! 3. Project-level config: `./.review/review.toml`
//! 4. An explicit `--config` file
//! 5. Environment overrides (`OLLAMA_*`, `POST_*`, `TWITTER_*`)
//!
//! Files are merged as TOML tables before deserialization, so a project
//! file that sets only `[workflow] max_iterations` keeps the rest of the
//! user's `[workflow]` section.

use crate::config::schema::ReviewConfig;
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const CONFIG_DIR: &str = ".review";
const CONFIG_FILE: &str = "review.toml";

/// Configuration loader for user, project and explicit files
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_config_path: Option<PathBuf>,
    project_config_path: Option<PathBuf>,
    explicit_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader for the standard locations
    pub fn new() -> Self {
        Self {
            user_config_path: dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE)),
            project_config_path: std::env::current_dir()
                .ok()
                .map(|cwd| cwd.join(CONFIG_DIR).join(CONFIG_FILE)),
            explicit_path: None,
        }
    }

    /// Loader with custom user and project locations
    pub fn with_paths(user_config_path: Option<PathBuf>, project_config_path: Option<PathBuf>) -> Self {
        Self {
            user_config_path,
            project_config_path,
            explicit_path: None,
        }
    }

    /// Add a file that must exist and overrides both standard locations
    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    pub fn user_config_path(&self) -> Option<&Path> {
        self.user_config_path.as_deref()
    }

    pub fn project_config_path(&self) -> Option<&Path> {
        self.project_config_path.as_deref()
    }

    /// Load using the process environment
    pub async fn load(&self) -> Result<ReviewConfig> {
        self.load_with_env(|name| std::env::var(name).ok()).await
    }

    /// Load with a custom environment lookup
    pub async fn load_with_env<F>(&self, lookup: F) -> Result<ReviewConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut merged = toml::Table::new();

        for path in [&self.user_config_path, &self.project_config_path]
            .into_iter()
            .flatten()
        {
            match read_optional(path).await? {
                Some(layer) => {
                    info!(path = %path.display(), "Loaded config layer");
                    merge_tables(&mut merged, layer);
                }
                None => debug!(path = %path.display(), "No config file"),
            }
        }

        if let Some(path) = &self.explicit_path {
            let layer = read_table(path).await?;
            info!(path = %path.display(), "Loaded explicit config");
            merge_tables(&mut merged, layer);
        }

        let mut config: ReviewConfig = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| CliError::InvalidConfig(e.to_string()))?;

        config.resolve_env_vars(&lookup)?;
        config.apply_env_overrides(&lookup)?;
        config.validate()?;

        debug!(?config, "Configuration resolved");
        Ok(config)
    }
}

async fn read_optional(path: &Path) -> Result<Option<toml::Table>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Ok(None);
    }
    read_table(path).await.map(Some)
}

async fn read_table(path: &Path) -> Result<toml::Table> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

    toml::from_str(&content).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Recursively overlay `layer` onto `base`; nested tables merge, other values replace
fn merge_tables(base: &mut toml::Table, layer: toml::Table) {
    for (key, value) in layer {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, incoming);
                } else {
                    base.insert(key, toml::Value::Table(incoming));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}
