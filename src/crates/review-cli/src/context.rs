//! Wiring from configuration to a ready coordinator

use crate::config::{PublisherKind, ReviewConfig, StorageBackend};
use anyhow::{Context, Result};
use llm::OllamaClient;
use publisher::{DryRunPublisher, XPublisher};
use review_checkpoint::{
    CheckpointStore, FileCheckpointStore, InMemoryCheckpointStore, SqliteCheckpointStore,
};
use review_core::{Publisher, RunCoordinator};
use std::sync::Arc;
use tracing::{info, warn};

/// The publisher selected by configuration
#[derive(Clone)]
pub enum PublisherTarget {
    X(Arc<XPublisher>),
    DryRun(Arc<DryRunPublisher>),
}

impl PublisherTarget {
    pub fn as_publisher(&self) -> Arc<dyn Publisher> {
        match self {
            PublisherTarget::X(publisher) => publisher.clone() as Arc<dyn Publisher>,
            PublisherTarget::DryRun(publisher) => publisher.clone() as Arc<dyn Publisher>,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PublisherTarget::X(_) => "x",
            PublisherTarget::DryRun(_) => "dry_run",
        }
    }
}

/// Everything a command needs
pub struct AppContext {
    pub config: ReviewConfig,
    pub producer: Arc<OllamaClient>,
    pub publisher: PublisherTarget,
    pub coordinator: RunCoordinator,
}

impl AppContext {
    pub async fn from_config(config: ReviewConfig) -> Result<Self> {
        let store = open_store(&config).await?;
        let producer = Arc::new(
            OllamaClient::new(config.llm.local_config()).context("Invalid [llm] settings")?,
        );
        let publisher = build_publisher(&config)?;

        let coordinator = RunCoordinator::new(
            store,
            producer.clone(),
            publisher.as_publisher(),
            config.workflow.coordinator_config(),
        )
        .context("Invalid [workflow] settings")?;

        info!(
            model = %config.llm.model,
            publisher = publisher.label(),
            "Context ready"
        );

        Ok(Self {
            config,
            producer,
            publisher,
            coordinator,
        })
    }
}

/// Open the configured checkpoint backend
pub async fn open_store(config: &ReviewConfig) -> Result<Arc<dyn CheckpointStore>> {
    let path = config.storage.resolved_path();
    let store: Arc<dyn CheckpointStore> = match config.storage.backend {
        StorageBackend::Sqlite => {
            info!(path = %path.display(), "Opening SQLite checkpoint store");
            Arc::new(
                SqliteCheckpointStore::open(&path)
                    .await
                    .with_context(|| format!("Failed to open checkpoint database {}", path.display()))?,
            )
        }
        StorageBackend::File => {
            info!(path = %path.display(), "Opening file checkpoint store");
            Arc::new(
                FileCheckpointStore::open(&path)
                    .await
                    .with_context(|| format!("Failed to open checkpoint directory {}", path.display()))?,
            )
        }
        StorageBackend::Memory => {
            warn!("Using in-memory checkpoints; runs will not survive this process");
            Arc::new(InMemoryCheckpointStore::new())
        }
    };
    Ok(store)
}

fn build_publisher(config: &ReviewConfig) -> Result<PublisherTarget> {
    match config.publisher.resolved_kind() {
        PublisherKind::X => {
            let x_config = config.publisher.x_config()?;
            let publisher = XPublisher::new(x_config).context("Invalid [publisher] settings")?;
            Ok(PublisherTarget::X(Arc::new(publisher)))
        }
        PublisherKind::DryRun | PublisherKind::Auto => {
            info!("No X credentials configured; approved posts will not leave this machine");
            Ok(PublisherTarget::DryRun(Arc::new(DryRunPublisher::new(
                config.publisher.max_length,
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_defaults_use_dry_run() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = ReviewConfig::default();
        config.storage.path = Some(temp_dir.path().join("checkpoints.db"));

        let context = AppContext::from_config(config).await.unwrap();

        assert_eq!(context.publisher.label(), "dry_run");
        assert!(temp_dir.path().join("checkpoints.db").exists());
    }

    #[tokio::test]
    async fn test_token_selects_x() {
        let mut config = ReviewConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.publisher.access_token = Some("token".to_string());
        config.publisher.username = Some("company_x".to_string());

        let context = AppContext::from_config(config).await.unwrap();
        assert_eq!(context.publisher.label(), "x");
    }

    #[tokio::test]
    async fn test_x_without_username_fails() {
        let mut config = ReviewConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.publisher.kind = PublisherKind::X;
        config.publisher.access_token = Some("token".to_string());

        assert!(AppContext::from_config(config).await.is_err());
    }

    #[tokio::test]
    async fn test_file_backend_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = ReviewConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.path = Some(temp_dir.path().join("runs"));

        open_store(&config).await.unwrap();
        assert!(temp_dir.path().join("runs").is_dir());
    }
}
