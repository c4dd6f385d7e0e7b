//! Publisher boundary
//!
//! A [`Publisher`] submits approved text to the target platform. Failures are
//! returned as a [`PublishFailureReason`] value rather than an error type the
//! workflow would propagate: the `PUBLISH` node records them as a terminal
//! outcome.

use async_trait::async_trait;
pub use review_checkpoint::{PublishFailureReason, PublishedPost};

/// Character limit of a standard post on the default platform
pub const DEFAULT_MAX_POST_LENGTH: usize = 280;

/// Platform submission capability used by the `PUBLISH` node
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Submit `text`; implementations must call [`check_length`] before any
    /// network traffic
    async fn publish(&self, text: &str) -> Result<PublishedPost, PublishFailureReason>;
}

/// Reject text longer than `limit` Unicode scalar values
pub fn check_length(text: &str, limit: usize) -> Result<(), PublishFailureReason> {
    let length = text.chars().count();
    if length > limit {
        return Err(PublishFailureReason::TooLong { length, limit });
    }
    Ok(())
}
