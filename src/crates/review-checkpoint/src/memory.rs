//! In-memory checkpoint storage for development and testing
//!
//! [`InMemoryCheckpointStore`] keeps every snapshot in a
//! `Arc<RwLock<HashMap>>`. It honours the full [`CheckpointStore`] contract but
//! loses everything when the process exits, so it only suits tests and
//! single-process embedding where `respond` runs in the same process as
//! `start`.

use crate::{
    checkpoint::{Checkpoint, CheckpointSummary},
    error::Result,
    run_id::RunId,
    traits::{order_summaries, CheckpointStore},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe in-memory checkpoint storage
type CheckpointStorage = Arc<RwLock<HashMap<RunId, Checkpoint>>>;

/// In-memory checkpoint store implementation
///
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct InMemoryCheckpointStore {
    storage: CheckpointStorage,
}

impl InMemoryCheckpointStore {
    /// Create a new in-memory checkpoint store
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of runs being tracked
    pub async fn run_count(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Clear all checkpoints (useful for testing)
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }
}

impl Default for InMemoryCheckpointStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckpointStore for InMemoryCheckpointStore {
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        checkpoint.validate()?;
        let mut storage = self.storage.write().await;
        storage.insert(checkpoint.run_id.clone(), checkpoint.clone());
        Ok(())
    }

    async fn load(&self, run_id: &RunId) -> Result<Option<Checkpoint>> {
        let storage = self.storage.read().await;
        Ok(storage.get(run_id).cloned())
    }

    async fn list(&self, limit: Option<usize>) -> Result<Vec<CheckpointSummary>> {
        let storage = self.storage.read().await;
        let summaries = storage.values().map(Checkpoint::summary).collect();
        Ok(order_summaries(summaries, limit))
    }

    async fn delete(&self, run_id: &RunId) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.remove(run_id);
        Ok(())
    }
}
