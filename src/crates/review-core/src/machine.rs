//! The review state machine
//!
//! Five nodes, dispatched with a plain `match`:
//!
//! ```text
//!            ┌──────────────────────────────────────────┐
//!            ▼                                          │ Regenerate
//!      ┌──────────┐     ┌──────────────┐     ┌──────────┴─┐   Publish   ┌─────────┐
//!  ──► │ GENERATE │ ──► │ AWAIT_REVIEW │ ──► │  CLASSIFY  │ ──────────► │ PUBLISH │
//!      └──────────┘     └──────────────┘     └────────────┘             └────┬────┘
//!                        (suspends here)            │ Exhausted              │
//!                                                   ▼                        ▼
//!                                              ┌──────────────────────────────────┐
//!                                              │               DONE               │
//!                                              └──────────────────────────────────┘
//! ```
//!
//! The machine never blocks waiting for a reviewer. Reaching `AWAIT_REVIEW`
//! returns [`Halt::Suspended`]; the coordinator persists the state and the
//! process is free to exit. A later `respond` re-enters at `CLASSIFY`.
//!
//! All mutations happen on the caller's `RunState`. When a node fails the
//! caller discards that copy, so the stored checkpoint is untouched.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use review_checkpoint::{PublishFailureReason, RunId, RunState, TerminalOutcome};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::decision::{classify, RetryPolicy, Route};
use crate::error::{ReviewError, Result};
use crate::producer::ContentProducer;
use crate::publisher::Publisher;

/// Workflow node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Generate,
    AwaitReview,
    Classify,
    Publish,
    Done(TerminalOutcome),
}

impl Node {
    pub fn name(&self) -> &'static str {
        match self {
            Node::Generate => "generate",
            Node::AwaitReview => "await_review",
            Node::Classify => "classify",
            Node::Publish => "publish",
            Node::Done(_) => "done",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a drive stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// Waiting at `AWAIT_REVIEW` with a fresh draft
    Suspended,

    /// Reached `DONE`
    Finished(TerminalOutcome),
}

/// Executes nodes against a run's state
#[derive(Clone)]
pub struct ReviewMachine {
    producer: Arc<dyn ContentProducer>,
    publisher: Arc<dyn Publisher>,
    policy: RetryPolicy,
    generation_timeout: Duration,
    publish_timeout: Duration,
}

impl ReviewMachine {
    pub fn new(
        producer: Arc<dyn ContentProducer>,
        publisher: Arc<dyn Publisher>,
        policy: RetryPolicy,
        generation_timeout: Duration,
        publish_timeout: Duration,
    ) -> Self {
        Self {
            producer,
            publisher,
            policy,
            generation_timeout,
            publish_timeout,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Drive a fresh run from `GENERATE` to its first suspension
    pub async fn start(&self, run_id: &RunId, state: &mut RunState) -> Result<Halt> {
        self.drive(run_id, state, Node::Generate).await
    }

    /// Drive a suspended run whose `human_feedback` was just set
    pub async fn resume(&self, run_id: &RunId, state: &mut RunState) -> Result<Halt> {
        debug!(
            run_id = %run_id,
            node = Node::AwaitReview.name(),
            iteration = state.iteration_count,
            "Resuming with reviewer decision"
        );
        self.drive(run_id, state, Node::Classify).await
    }

    async fn drive(&self, run_id: &RunId, state: &mut RunState, entry: Node) -> Result<Halt> {
        let mut node = entry;

        loop {
            info!(
                run_id = %run_id,
                node = node.name(),
                iteration = state.iteration_count,
                "Entering node"
            );

            node = match node {
                Node::Generate => {
                    self.generate(run_id, state).await?;
                    Node::AwaitReview
                }
                Node::AwaitReview => return Ok(Halt::Suspended),
                Node::Classify => self.classify(state),
                Node::Publish => Node::Done(self.publish(run_id, state).await),
                Node::Done(outcome) => return Ok(Halt::Finished(outcome)),
            };
        }
    }

    async fn generate(&self, run_id: &RunId, state: &mut RunState) -> Result<()> {
        let revising = state.iteration_count > 0 && !state.human_feedback.is_empty();

        let request = if revising {
            self.producer.revise(&state.article, &state.human_feedback)
        } else {
            self.producer.generate(&state.article)
        };

        let draft = timeout(self.generation_timeout, request)
            .await
            .map_err(|_| {
                ReviewError::GenerationUnavailable(format!(
                    "no reply within {}s",
                    self.generation_timeout.as_secs_f64()
                ))
            })??;

        if draft.trim().is_empty() {
            return Err(ReviewError::GenerationFailed(
                "producer returned empty text".to_string(),
            ));
        }

        state.generated_post = draft;
        state.iteration_count += 1;

        debug!(
            run_id = %run_id,
            iteration = state.iteration_count,
            revising,
            length = state.post_length(),
            "Draft generated"
        );
        Ok(())
    }

    fn classify(&self, state: &mut RunState) -> Node {
        match classify(&state.human_feedback, state.iteration_count, &self.policy) {
            Route::Publish => {
                state.is_approved = true;
                Node::Publish
            }
            Route::Regenerate => {
                state.is_approved = false;
                Node::Generate
            }
            Route::Exhausted => Node::Done(TerminalOutcome::RetryExhausted {
                iterations: state.iteration_count,
            }),
        }
    }

    async fn publish(&self, run_id: &RunId, state: &mut RunState) -> TerminalOutcome {
        let attempt = timeout(self.publish_timeout, self.publisher.publish(&state.generated_post)).await;

        let result = match attempt {
            Ok(result) => result,
            Err(_) => Err(PublishFailureReason::other(format!(
                "timed out after {}s",
                self.publish_timeout.as_secs_f64()
            ))),
        };

        match result {
            Ok(post) => {
                state.is_published = true;
                info!(run_id = %run_id, post_id = %post.id, url = %post.url, "Post published");
                TerminalOutcome::Published { post }
            }
            Err(reason) => {
                warn!(run_id = %run_id, reason = %reason, "Publish failed, run ends unpublished");
                TerminalOutcome::ApprovedUnpublished { reason }
            }
        }
    }
}
