//! # review-checkpoint - Durable Run State for Post Review
//!
//! **Persistence layer for suspended review runs.** A review run pauses every
//! time a draft is waiting for a human decision, and the decision may arrive
//! minutes or days later from a different process. This crate owns the record
//! that bridges that gap.
//!
//! ## Core Concepts
//!
//! ### 1. The Record
//!
//! A [`Checkpoint`] wraps the six-field [`RunState`] in a versioned envelope
//! together with the run's [`Stage`]:
//!
//! - **`awaiting_review`** - suspended with a non-empty draft
//! - **`completed`** - terminal, carrying a [`TerminalOutcome`]
//!
//! Only the latest snapshot per run is kept. There is no history.
//!
//! ### 2. Run Identifiers
//!
//! [`RunId`] values are either generated (`run_YYYYmmdd_HHMMSS_<8 hex>`) or
//! supplied by the caller and validated, so they are always safe to use as a
//! file name or primary key.
//!
//! ### 3. Stores
//!
//! [`CheckpointStore`] is implemented by:
//!
//! - [`InMemoryCheckpointStore`] - tests and single-process embedding
//! - [`FileCheckpointStore`] - one JSON file per run, written by rename
//! - [`SqliteCheckpointStore`] - one row per run, the default backend
//!
//! Every store validates a record on save and on load; a record with an
//! unknown version or unknown state fields is rejected rather than guessed at.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use review_checkpoint::{
//!     Checkpoint, CheckpointStore, RunId, RunState, SqliteCheckpointStore, Stage,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteCheckpointStore::open(".review/checkpoints.db").await?;
//!
//!     let mut state = RunState::new("Company X launches new product.");
//!     state.generated_post = "Company X just shipped something big. #launch".into();
//!     state.iteration_count = 1;
//!
//!     let checkpoint = Checkpoint::new(RunId::generate(), state, Stage::AwaitingReview);
//!     store.save(&checkpoint).await?;
//!
//!     for summary in store.list(Some(10)).await? {
//!         println!("{} {} ({} attempts)", summary.run_id, summary.stage, summary.iteration_count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod checkpoint;
pub mod error;
pub mod file;
pub mod memory;
pub mod run_id;
pub mod serializer;
pub mod sqlite;
pub mod traits;

pub use checkpoint::{
    Checkpoint, CheckpointSummary, PublishFailureReason, PublishedPost, RunState, Stage,
    TerminalOutcome,
};
pub use error::{CheckpointError, Result};
pub use file::FileCheckpointStore;
pub use memory::InMemoryCheckpointStore;
pub use run_id::{RunId, MAX_RUN_ID_LEN};
pub use serializer::{JsonSerializer, SerializerProtocol};
pub use sqlite::SqliteCheckpointStore;
pub use traits::CheckpointStore;
