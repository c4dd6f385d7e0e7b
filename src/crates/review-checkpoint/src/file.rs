//! JSON file checkpoint storage
//!
//! [`FileCheckpointStore`] writes one `<run_id>.json` file per run inside a
//! directory. Each save writes a hidden temporary sibling, flushes it to disk
//! and renames it over the target, so a reader sees either the previous record
//! or the new one, never a torn write. A store-wide async mutex serialises
//! writers within the process.

use crate::{
    checkpoint::{Checkpoint, CheckpointSummary},
    error::{CheckpointError, Result},
    run_id::RunId,
    serializer::{JsonSerializer, SerializerProtocol},
    traits::{order_summaries, CheckpointStore},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

const RECORD_EXTENSION: &str = "json";

/// Directory-backed checkpoint store
#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    root: PathBuf,
    serializer: JsonSerializer,
    write_lock: Arc<Mutex<()>>,
}

impl FileCheckpointStore {
    /// Open (and create if needed) a store rooted at `root`
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        debug!(path = %root.display(), "Opened file checkpoint store");

        Ok(Self {
            root,
            serializer: JsonSerializer::new(),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Directory holding the records
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, run_id: &RunId) -> PathBuf {
        self.root
            .join(format!("{}.{}", run_id.as_str(), RECORD_EXTENSION))
    }

    fn temporary_path(&self, run_id: &RunId) -> PathBuf {
        let suffix = Uuid::new_v4().simple().to_string();
        self.root
            .join(format!(".{}.{}.{}.tmp", run_id.as_str(), std::process::id(), &suffix[..8]))
    }

    async fn read_record(&self, path: &Path) -> Result<Option<Checkpoint>> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(self.serializer.loads_checkpoint(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        checkpoint.validate()?;
        let bytes = self.serializer.dumps(checkpoint)?;

        let _guard = self.write_lock.lock().await;

        let target = self.record_path(&checkpoint.run_id);
        let temporary = self.temporary_path(&checkpoint.run_id);

        let mut file = fs::File::create(&temporary).await?;
        let written = async {
            file.write_all(&bytes).await?;
            file.sync_all().await
        }
        .await;
        drop(file);

        if let Err(e) = written {
            let _ = fs::remove_file(&temporary).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temporary, &target).await {
            let _ = fs::remove_file(&temporary).await;
            return Err(CheckpointError::Storage(format!(
                "failed to persist {} -> {}: {}",
                temporary.display(),
                target.display(),
                e
            )));
        }

        debug!(
            run_id = %checkpoint.run_id,
            stage = checkpoint.stage.label(),
            path = %target.display(),
            "Checkpoint written"
        );
        Ok(())
    }

    async fn load(&self, run_id: &RunId) -> Result<Option<Checkpoint>> {
        let checkpoint = self.read_record(&self.record_path(run_id)).await?;

        if let Some(ref found) = checkpoint {
            if &found.run_id != run_id {
                return Err(CheckpointError::Invalid(format!(
                    "record for {} names run {}",
                    run_id, found.run_id
                )));
            }
        }
        Ok(checkpoint)
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<CheckpointSummary>> {
        let mut summaries = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_record = path.extension().and_then(|ext| ext.to_str()) == Some(RECORD_EXTENSION)
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_record {
                continue;
            }

            match self.read_record(&path).await {
                Ok(Some(checkpoint)) => summaries.push(checkpoint.summary()),
                Ok(None) => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable checkpoint");
                }
            }
        }

        Ok(order_summaries(summaries, limit))
    }

    async fn delete(&self, run_id: &RunId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(self.record_path(run_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::{RunState, Stage};
    use tempfile::TempDir;

    fn checkpoint(id: &str) -> Checkpoint {
        let mut state = RunState::new("Company X launches new product.");
        state.generated_post = "Company X ships! #launch".to_string();
        state.iteration_count = 1;
        Checkpoint::new(RunId::parse(id).unwrap(), state, Stage::AwaitingReview)
    }

    #[tokio::test]
    async fn test_save_load_across_instances() {
        let dir = TempDir::new().unwrap();
        let saved = checkpoint("run-1");

        {
            let store = FileCheckpointStore::open(dir.path()).await.unwrap();
            store.save(&saved).await.unwrap();
        }

        let reopened = FileCheckpointStore::open(dir.path()).await.unwrap();
        assert_eq!(reopened.load(&saved.run_id).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_no_temporary_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::open(dir.path()).await.unwrap();
        store.save(&checkpoint("run-1")).await.unwrap();
        store.save(&checkpoint("run-1")).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["run-1.json".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::open(dir.path()).await.unwrap();
        std::fs::write(dir.path().join("run-1.json"), b"{ not json").unwrap();

        let err = store.load(&RunId::parse("run-1").unwrap()).await.unwrap_err();
        assert!(matches!(err, CheckpointError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_list_skips_foreign_files() {
        let dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::open(dir.path()).await.unwrap();
        store.save(&checkpoint("run-1")).await.unwrap();
        store.save(&checkpoint("run-2")).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        std::fs::write(dir.path().join(".run-3.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("broken.json"), b"[").unwrap();

        let listed = store.list(None).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileCheckpointStore::open(dir.path()).await.unwrap();
        let saved = checkpoint("run-1");
        store.save(&saved).await.unwrap();

        store.delete(&saved.run_id).await.unwrap();
        store.delete(&saved.run_id).await.unwrap();
        assert!(store.load(&saved.run_id).await.unwrap().is_none());
    }
}
