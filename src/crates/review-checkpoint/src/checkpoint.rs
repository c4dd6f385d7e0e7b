//! Core checkpoint data structures for the review workflow
//!
//! This module defines the record that is persisted for every run:
//!
//! - [`RunState`] - the fixed six-field state the workflow mutates
//! - [`Stage`] - where the workflow stopped (suspended for review, or completed)
//! - [`TerminalOutcome`] - how a completed run ended
//! - [`Checkpoint`] - the versioned envelope written to a store
//! - [`CheckpointSummary`] - a lightweight row for listings
//!
//! # Record Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Checkpoint (v = 1)                           │
//! │  • run_id: "run_20250101_120000_1a2b3c4d"     │
//! │  • created_at / updated_at                    │
//! │  ┌─────────────────────────────────────────┐  │
//! │  │  RunState                               │  │
//! │  │  • article            (set once)        │  │
//! │  │  • generated_post     (latest draft)    │  │
//! │  │  • human_feedback     (last decision)   │  │
//! │  │  • is_approved / is_published           │  │
//! │  │  • iteration_count                      │  │
//! │  └─────────────────────────────────────────┘  │
//! │  • stage: awaiting_review | completed{..}     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! [`RunState`] denies unknown fields and has no serde defaults, so a record
//! written by a different schema fails to load instead of being passed through
//! half-understood.

use crate::error::{CheckpointError, Result};
use crate::run_id::RunId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State of a single review run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunState {
    /// Source article, immutable after creation
    pub article: String,

    /// Latest candidate post, overwritten on every generation
    pub generated_post: String,

    /// Last reviewer input, empty until the first review
    pub human_feedback: String,

    /// Set once a decision is classified as approval
    pub is_approved: bool,

    /// Set once the publisher confirms success; never reset
    pub is_published: bool,

    /// Number of generation attempts so far
    pub iteration_count: u32,
}

impl RunState {
    /// Fresh state for a new run
    pub fn new(article: impl Into<String>) -> Self {
        Self {
            article: article.into(),
            generated_post: String::new(),
            human_feedback: String::new(),
            is_approved: false,
            is_published: false,
            iteration_count: 0,
        }
    }

    /// Character count of the current draft
    pub fn post_length(&self) -> usize {
        self.generated_post.chars().count()
    }
}

/// Why a publish attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PublishFailureReason {
    /// Text exceeds the platform limit; nothing was submitted
    #[error("post is too long ({length} characters, limit is {limit})")]
    TooLong { length: usize, limit: usize },

    /// Platform rejected the request for rate limiting
    #[error("rate limit exceeded, wait before posting again")]
    RateLimited,

    /// Credentials missing, expired or rejected
    #[error("unauthorized, check the publisher credentials")]
    Unauthorized,

    /// Any other failure
    #[error("{message}")]
    Other { message: String },
}

impl PublishFailureReason {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Identifier and location of a published post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPost {
    pub id: String,
    pub url: String,
}

/// How a completed run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TerminalOutcome {
    /// Approved and accepted by the publisher
    Published { post: PublishedPost },

    /// Approved, but the publisher rejected it
    ApprovedUnpublished { reason: PublishFailureReason },

    /// Iteration budget spent without approval
    RetryExhausted { iterations: u32 },
}

impl TerminalOutcome {
    /// Short machine-friendly label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Published { .. } => "published",
            Self::ApprovedUnpublished { .. } => "approved_unpublished",
            Self::RetryExhausted { .. } => "retry_exhausted",
        }
    }
}

/// Where the workflow stopped when the checkpoint was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    /// Suspended until a reviewer responds
    AwaitingReview,

    /// Terminal; never mutated again
    Completed { outcome: TerminalOutcome },
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Completed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::AwaitingReview => "awaiting_review",
            Stage::Completed { outcome } => outcome.label(),
        }
    }
}

/// Versioned envelope persisted for each run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Record format version
    pub v: u32,

    pub run_id: RunId,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    pub state: RunState,

    pub stage: Stage,
}

impl Checkpoint {
    /// Current record format version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create the first checkpoint of a run
    pub fn new(run_id: RunId, state: RunState, stage: Stage) -> Self {
        let now = Utc::now();
        Self {
            v: Self::CURRENT_VERSION,
            run_id,
            created_at: now,
            updated_at: now,
            state,
            stage,
        }
    }

    /// Replace state and stage, keeping identity and creation time
    pub fn advance(&self, state: RunState, stage: Stage) -> Self {
        Self {
            v: Self::CURRENT_VERSION,
            run_id: self.run_id.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
            state,
            stage,
        }
    }

    /// Reject records whose shape this build does not understand
    pub fn validate(&self) -> Result<()> {
        if self.v != Self::CURRENT_VERSION {
            return Err(CheckpointError::Invalid(format!(
                "unsupported checkpoint version {} for run {} (expected {})",
                self.v,
                self.run_id,
                Self::CURRENT_VERSION
            )));
        }
        if self.stage == Stage::AwaitingReview && self.state.generated_post.trim().is_empty() {
            return Err(CheckpointError::Invalid(format!(
                "run {} is awaiting review without a draft",
                self.run_id
            )));
        }
        if self.stage == Stage::AwaitingReview && self.state.is_published {
            return Err(CheckpointError::Invalid(format!(
                "run {} is awaiting review but already published",
                self.run_id
            )));
        }
        Ok(())
    }

    pub fn summary(&self) -> CheckpointSummary {
        CheckpointSummary {
            run_id: self.run_id.clone(),
            stage: self.stage.label().to_string(),
            iteration_count: self.state.iteration_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing row for a stored run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointSummary {
    pub run_id: RunId,
    pub stage: String,
    pub iteration_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
