//! Storage trait for checkpoint backends
//!
//! [`CheckpointStore`] is the seam between the review workflow and durable
//! storage. The workflow only ever needs the latest snapshot of a run, so the
//! contract is a keyed overwrite rather than a checkpoint history.
//!
//! # Contract
//!
//! - **`save()`** - persist the snapshot for `run_id`, replacing any previous
//!   one. Readers must never observe a partially written record.
//! - **`load()`** - return the latest snapshot, or `None` when the run is
//!   unknown. A missing run is not an error at this layer.
//! - **`list()`** - summaries of every stored run, newest update first.
//! - **`delete()`** - forget a run.
//!
//! Writes for the same `run_id` arrive sequentially (one reviewer per run), but
//! stores are shared across runs and must serialise per-key writes so that
//! concurrent runs cannot corrupt each other.
//!
//! # Implementations
//!
//! ```text
//!                 CheckpointStore
//!         ┌──────────────┼──────────────┐
//!         ▼              ▼              ▼
//!  ┌─────────────┐ ┌────────────┐ ┌─────────────┐
//!  │  In-Memory  │ │ JSON files │ │   SQLite    │
//!  │   (tests)   │ │ (rename)   │ │  (default)  │
//!  └─────────────┘ └────────────┘ └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use review_checkpoint::{
//!     Checkpoint, CheckpointStore, InMemoryCheckpointStore, RunId, RunState, Stage,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryCheckpointStore::new();
//!     let run_id = RunId::generate();
//!
//!     let mut state = RunState::new("Company X launches new product.");
//!     state.generated_post = "Company X just shipped! #launch".to_string();
//!     state.iteration_count = 1;
//!
//!     store
//!         .save(&Checkpoint::new(run_id.clone(), state, Stage::AwaitingReview))
//!         .await?;
//!
//!     let loaded = store.load(&run_id).await?;
//!     assert!(loaded.is_some());
//!     Ok(())
//! }
//! ```

use crate::{
    checkpoint::{Checkpoint, CheckpointSummary},
    error::Result,
    run_id::RunId,
};
use async_trait::async_trait;

/// Core trait for implementing checkpoint storage backends
///
/// Implementations must be `Send + Sync`; a single store instance is shared by
/// every run the coordinator drives.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Persist `checkpoint` as the current snapshot of its run
    ///
    /// Overwrites any earlier snapshot. Must be atomic with respect to
    /// concurrent `load` calls.
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()>;

    /// Load the latest snapshot for `run_id`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(checkpoint))` - snapshot found and validated
    /// - `Ok(None)` - no snapshot exists for this run
    /// - `Err` - storage failure or an unreadable record
    async fn load(&self, run_id: &RunId) -> Result<Option<Checkpoint>>;

    /// Summaries of stored runs, most recently updated first
    async fn list(&self, limit: Option<usize>) -> Result<Vec<CheckpointSummary>>;

    /// Remove the snapshot for `run_id`; unknown runs are ignored
    async fn delete(&self, run_id: &RunId) -> Result<()>;

    /// Whether a snapshot exists for `run_id`
    async fn exists(&self, run_id: &RunId) -> Result<bool> {
        Ok(self.load(run_id).await?.is_some())
    }
}

/// Sort summaries newest first and apply `limit`
pub(crate) fn order_summaries(
    mut summaries: Vec<CheckpointSummary>,
    limit: Option<usize>,
) -> Vec<CheckpointSummary> {
    summaries.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.run_id.cmp(&b.run_id))
    });
    if let Some(limit) = limit {
        summaries.truncate(limit);
    }
    summaries
}
