//! Decision classification and the regeneration budget
//!
//! A reviewer answers every draft with free text. The `CLASSIFY` node maps
//! that text to one of three routes:
//!
//! ```text
//!   feedback ──► approval token? ──yes──► Publish
//!                     │ no
//!                     ▼
//!          iteration_count ≥ max? ──yes──► Exhausted
//!                     │ no
//!                     ▼
//!                Regenerate (feedback becomes revision instructions)
//! ```
//!
//! Matching is case-insensitive and ignores surrounding whitespace. There is
//! no rejection token: anything that is not an approval asks for a revision.
//!
//! Quit tokens are never classified. Front ends check [`is_quit`] and simply
//! do not call `respond`, which leaves the run suspended.

use serde::{Deserialize, Serialize};

/// Inputs accepted as approval
pub const APPROVAL_TOKENS: [&str; 5] = ["approve", "yes", "ok", "publish", "y"];

/// Inputs a front end treats as "leave this run for later"
pub const QUIT_TOKENS: [&str; 3] = ["quit", "exit", "q"];

/// Default number of generation attempts per run
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

fn matches_token(input: &str, tokens: &[&str]) -> bool {
    let normalized = input.trim().to_lowercase();
    tokens.iter().any(|token| *token == normalized)
}

/// Whether `feedback` approves the current draft
pub fn is_approval(feedback: &str) -> bool {
    matches_token(feedback, &APPROVAL_TOKENS)
}

/// Whether `input` asks to abort without deciding
pub fn is_quit(input: &str) -> bool {
    matches_token(input, &QUIT_TOKENS)
}

/// Upper bound on generation attempts for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of drafts produced per run (including the first)
    pub max_iterations: u32,
}

impl RetryPolicy {
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    /// Whether another generation round is allowed after `iteration_count`
    /// attempts
    pub fn allows_another(&self, iteration_count: u32) -> bool {
        iteration_count < self.max_iterations
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

/// Where `CLASSIFY` sends the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Publish,
    Regenerate,
    Exhausted,
}

/// Classify a reviewer decision
///
/// Approval wins even when the budget is spent: the last draft can always be
/// approved.
pub fn classify(feedback: &str, iteration_count: u32, policy: &RetryPolicy) -> Route {
    if is_approval(feedback) {
        Route::Publish
    } else if !policy.allows_another(iteration_count) {
        Route::Exhausted
    } else {
        Route::Regenerate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_tokens_ignore_case_and_whitespace() {
        for input in ["  Approve ", "YES", "ok", "publish", "y", "\tOK\n", "Y"] {
            assert!(is_approval(input), "{:?} should approve", input);
        }
    }

    #[test]
    fn test_non_approval_inputs() {
        for input in ["make it shorter", "", "yes please", "approved", "no", "quit"] {
            assert!(!is_approval(input), "{:?} should not approve", input);
        }
    }

    #[test]
    fn test_quit_tokens() {
        assert!(is_quit(" QUIT "));
        assert!(is_quit("exit"));
        assert!(is_quit("q"));
        assert!(!is_quit("quite good"));
        assert!(!is_quit("approve"));
    }

    #[test]
    fn test_classify_routes() {
        let policy = RetryPolicy::default();

        assert_eq!(classify("approve", 1, &policy), Route::Publish);
        assert_eq!(classify("punchier", 1, &policy), Route::Regenerate);
        assert_eq!(classify("punchier", 4, &policy), Route::Regenerate);
        assert_eq!(classify("punchier", 5, &policy), Route::Exhausted);
        assert_eq!(classify("punchier", 9, &policy), Route::Exhausted);
    }

    #[test]
    fn test_approval_allowed_after_budget_spent() {
        let policy = RetryPolicy::new(2);
        assert_eq!(classify("ok", 2, &policy), Route::Publish);
    }

    #[test]
    fn test_default_budget() {
        assert_eq!(RetryPolicy::default().max_iterations, 5);
        assert!(RetryPolicy::default().allows_another(4));
        assert!(!RetryPolicy::default().allows_another(5));
    }
}
