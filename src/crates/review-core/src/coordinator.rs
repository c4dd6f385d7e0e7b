//! Run coordinator: the public entry points of the workflow
//!
//! [`RunCoordinator`] is the only component that touches the checkpoint store.
//! Each call loads the freshest snapshot, drives the [`ReviewMachine`] to its
//! next halt on a private copy of the state, and writes the result back in a
//! single `save`. A failure anywhere before that `save` leaves the stored
//! record exactly as it was.
//!
//! ```text
//!  start(article) ──► GENERATE ──► AWAIT_REVIEW ──► save ──► StartedRun
//!
//!  respond(id, fb) ──► load ──► CLASSIFY ──► … ──► save ──► Outcome
//!                                   │
//!                   AWAIT_REVIEW ◄──┴──► DONE
//! ```

use std::sync::Arc;
use std::time::Duration;

use review_checkpoint::{
    Checkpoint, CheckpointStore, CheckpointSummary, PublishFailureReason, PublishedPost, RunId,
    RunState, Stage, TerminalOutcome,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::decision::{RetryPolicy, DEFAULT_MAX_ITERATIONS};
use crate::error::{ReviewError, Result};
use crate::machine::{Halt, ReviewMachine};
use crate::producer::ContentProducer;
use crate::publisher::Publisher;

/// Coordinator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Drafts allowed per run, including the first
    pub max_iterations: u32,

    /// Bound on a single producer call
    pub generation_timeout: Duration,

    /// Bound on a single publisher call
    pub publish_timeout: Duration,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generation_timeout: Duration::from_secs(120),
            publish_timeout: Duration::from_secs(30),
        }
    }
}

impl CoordinatorConfig {
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn with_publish_timeout(mut self, timeout: Duration) -> Self {
        self.publish_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(ReviewError::Configuration(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.generation_timeout.is_zero() || self.publish_timeout.is_zero() {
            return Err(ReviewError::Configuration(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of `start`: the run is suspended with its first draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedRun {
    pub run_id: RunId,
    pub draft: String,
    pub iteration_count: u32,
}

/// What a caller learns after `respond`
///
/// The four variants never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Another review round: a new draft is waiting
    AwaitingReview { draft: String, iteration_count: u32 },

    /// Approved and published
    Published { post: PublishedPost },

    /// Approved, but the publisher refused it
    ApprovedUnpublished { reason: PublishFailureReason },

    /// No approval within the attempt budget
    RetryExhausted { iterations: u32 },
}

impl Outcome {
    /// Outcome as recorded by a checkpoint
    pub fn from_checkpoint(checkpoint: &Checkpoint) -> Self {
        match &checkpoint.stage {
            Stage::AwaitingReview => Outcome::AwaitingReview {
                draft: checkpoint.state.generated_post.clone(),
                iteration_count: checkpoint.state.iteration_count,
            },
            Stage::Completed { outcome } => outcome.clone().into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::AwaitingReview { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::AwaitingReview { .. } => "awaiting_review",
            Outcome::Published { .. } => "published",
            Outcome::ApprovedUnpublished { .. } => "approved_unpublished",
            Outcome::RetryExhausted { .. } => "retry_exhausted",
        }
    }
}

impl From<TerminalOutcome> for Outcome {
    fn from(outcome: TerminalOutcome) -> Self {
        match outcome {
            TerminalOutcome::Published { post } => Outcome::Published { post },
            TerminalOutcome::ApprovedUnpublished { reason } => Outcome::ApprovedUnpublished { reason },
            TerminalOutcome::RetryExhausted { iterations } => Outcome::RetryExhausted { iterations },
        }
    }
}

/// Entry points for starting and resuming review runs
#[derive(Clone)]
pub struct RunCoordinator {
    store: Arc<dyn CheckpointStore>,
    machine: ReviewMachine,
    config: CoordinatorConfig,
}

impl RunCoordinator {
    pub fn new(
        store: Arc<dyn CheckpointStore>,
        producer: Arc<dyn ContentProducer>,
        publisher: Arc<dyn Publisher>,
        config: CoordinatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let machine = ReviewMachine::new(
            producer,
            publisher,
            RetryPolicy::new(config.max_iterations),
            config.generation_timeout,
            config.publish_timeout,
        );
        Ok(Self {
            store,
            machine,
            config,
        })
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Create a run with a generated identifier and produce its first draft
    pub async fn start(&self, article: &str) -> Result<StartedRun> {
        self.start_with_id(RunId::generate(), article).await
    }

    /// Create a run under a caller-chosen identifier
    ///
    /// Fails with [`ReviewError::RunAlreadyExists`] if the identifier is taken.
    pub async fn start_with_id(&self, run_id: RunId, article: &str) -> Result<StartedRun> {
        if self.store.exists(&run_id).await? {
            return Err(ReviewError::RunAlreadyExists(run_id));
        }

        let mut state = RunState::new(article);
        let stage = match self.machine.start(&run_id, &mut state).await? {
            Halt::Suspended => Stage::AwaitingReview,
            Halt::Finished(outcome) => Stage::Completed { outcome },
        };

        let checkpoint = Checkpoint::new(run_id, state, stage);
        self.store.save(&checkpoint).await?;
        debug!(run_id = %checkpoint.run_id, stage = checkpoint.stage.label(), "Checkpoint saved");
        info!(run_id = %checkpoint.run_id, "Run started, awaiting review");

        Ok(StartedRun {
            run_id: checkpoint.run_id,
            draft: checkpoint.state.generated_post,
            iteration_count: checkpoint.state.iteration_count,
        })
    }

    /// Apply a reviewer decision to a suspended run
    pub async fn respond(&self, run_id: &RunId, feedback: &str) -> Result<Outcome> {
        let current = self.load(run_id).await?;

        if let Stage::Completed { outcome } = &current.stage {
            return Err(ReviewError::RunCompleted {
                run_id: run_id.clone(),
                outcome: outcome.label().to_string(),
            });
        }
        if feedback.trim().is_empty() {
            return Err(ReviewError::EmptyFeedback);
        }

        let mut state = current.state.clone();
        state.human_feedback = feedback.to_string();

        let stage = match self.machine.resume(run_id, &mut state).await? {
            Halt::Suspended => Stage::AwaitingReview,
            Halt::Finished(outcome) => Stage::Completed { outcome },
        };

        let next = current.advance(state, stage);
        self.store.save(&next).await?;
        debug!(run_id = %run_id, stage = next.stage.label(), "Checkpoint saved");

        let outcome = Outcome::from_checkpoint(&next);
        info!(run_id = %run_id, outcome = outcome.label(), "Decision applied");
        Ok(outcome)
    }

    /// Latest checkpoint of a run, read-only
    pub async fn status(&self, run_id: &RunId) -> Result<Checkpoint> {
        self.load(run_id).await
    }

    /// Stored runs, most recently updated first
    pub async fn list(&self, limit: Option<usize>) -> Result<Vec<CheckpointSummary>> {
        Ok(self.store.list(limit).await?)
    }

    async fn load(&self, run_id: &RunId) -> Result<Checkpoint> {
        self.store
            .load(run_id)
            .await?
            .ok_or_else(|| ReviewError::RunNotFound(run_id.clone()))
    }
}
