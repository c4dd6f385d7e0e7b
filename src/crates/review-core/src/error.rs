//! Error types for the review workflow
//!
//! Only failures that abort an invocation live here. A rejected publish is not
//! an error: it is recovered into the `approved_unpublished` outcome. Running
//! out of attempts is likewise reported as an outcome.
//!
//! # Error Hierarchy
//!
//! ```text
//! ReviewError
//! ├── RunNotFound            - respond/status on an unknown run
//! ├── RunAlreadyExists       - start with an identifier already in use
//! ├── RunCompleted           - respond on a terminal run
//! ├── EmptyFeedback          - blank reviewer decision
//! ├── GenerationUnavailable  - producer backend unreachable or timed out
//! ├── GenerationFailed       - any other producer failure
//! ├── Configuration          - invalid coordinator settings
//! └── Checkpoint             - storage failure
//! ```
//!
//! Generation errors leave the run at its last checkpoint, so the same
//! `start`/`respond` call can simply be retried.

use review_checkpoint::{CheckpointError, RunId};
use thiserror::Error;

use crate::producer::GenerationError;

/// Result type for workflow operations
pub type Result<T> = std::result::Result<T, ReviewError>;

#[derive(Error, Debug)]
pub enum ReviewError {
    /// No checkpoint exists for the run
    #[error("Run not found: {0}")]
    RunNotFound(RunId),

    /// `start` was given an identifier that already has a checkpoint
    #[error("Run already exists: {0}")]
    RunAlreadyExists(RunId),

    /// The run reached a terminal outcome and accepts no further decisions
    #[error("Run {run_id} is already completed ({outcome})")]
    RunCompleted { run_id: RunId, outcome: String },

    /// Reviewer decision was empty or whitespace
    #[error("Feedback must not be empty")]
    EmptyFeedback,

    /// The content producer could not be reached
    #[error("Content generation unavailable: {0}")]
    GenerationUnavailable(String),

    /// The content producer answered with an error or unusable text
    #[error("Content generation failed: {0}")]
    GenerationFailed(String),

    /// Coordinator settings are unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Checkpoint storage failed
    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),
}

impl ReviewError {
    /// Whether the failed call can be retried unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReviewError::GenerationUnavailable(_) | ReviewError::GenerationFailed(_)
        )
    }
}

impl From<GenerationError> for ReviewError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Unavailable(msg) => ReviewError::GenerationUnavailable(msg),
            GenerationError::Failed(msg) => ReviewError::GenerationFailed(msg),
        }
    }
}
