//! # review-core - Resumable Human-in-the-Loop Post Review
//!
//! **A durable state machine that turns an article into a published social
//! post under human control.** A draft is produced, the run suspends until a
//! reviewer answers, and the answer either publishes the draft or sends it
//! back for revision, up to a fixed number of attempts.
//!
//! ## Overview
//!
//! - [`ContentProducer`] - generates and revises drafts (see the `llm` crate)
//! - [`Publisher`] - submits approved text (see the `publisher` crate)
//! - [`ReviewMachine`] - the five-node `GENERATE → AWAIT_REVIEW → CLASSIFY →
//!   PUBLISH → DONE` graph
//! - [`RunCoordinator`] - `start`, `respond`, `status` and `list` on top of a
//!   [`CheckpointStore`](review_checkpoint::CheckpointStore)
//!
//! Suspension spans processes: `start` persists the run and returns, and
//! `respond` may run hours later from a fresh process. Nothing is kept in
//! memory between the two calls.
//!
//! ## Guarantees
//!
//! - `iteration_count` is 1 after `start` and grows by exactly 1 per draft.
//! - A run is published at most once; terminal runs reject `respond` without
//!   calling the publisher.
//! - A suspended run always carries a non-empty draft.
//! - Producer failures abort the call and leave the stored run untouched.
//! - Publisher failures end the run as `approved_unpublished` with a reason.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use review_checkpoint::SqliteCheckpointStore;
//! use review_core::{CoordinatorConfig, Outcome, RunCoordinator};
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteCheckpointStore::open(".review/checkpoints.db").await?);
//! let coordinator = RunCoordinator::new(store, producer, publisher, CoordinatorConfig::default())?;
//!
//! let started = coordinator.start("Company X launches new product.").await?;
//! println!("{}: {}", started.run_id, started.draft);
//!
//! match coordinator.respond(&started.run_id, "make it punchier").await? {
//!     Outcome::AwaitingReview { draft, .. } => println!("next draft: {}", draft),
//!     other => println!("finished: {}", other.label()),
//! }
//! ```

pub mod coordinator;
pub mod decision;
pub mod error;
pub mod machine;
pub mod producer;
pub mod publisher;

pub use coordinator::{CoordinatorConfig, Outcome, RunCoordinator, StartedRun};
pub use decision::{
    classify, is_approval, is_quit, RetryPolicy, Route, APPROVAL_TOKENS, DEFAULT_MAX_ITERATIONS,
    QUIT_TOKENS,
};
pub use error::{Result, ReviewError};
pub use machine::{Halt, Node, ReviewMachine};
pub use producer::{ContentProducer, GenerationError};
pub use publisher::{check_length, Publisher, DEFAULT_MAX_POST_LENGTH};

pub use review_checkpoint::{
    Checkpoint, CheckpointStore, CheckpointSummary, PublishFailureReason, PublishedPost, RunId,
    RunState, Stage, TerminalOutcome,
};
