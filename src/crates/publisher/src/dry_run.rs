//! Publisher that records instead of posting.

use async_trait::async_trait;
use review_core::{check_length, PublishFailureReason, PublishedPost, Publisher, DEFAULT_MAX_POST_LENGTH};
use std::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Accepts any post within the limit and returns a synthetic location.
///
/// Used when no platform credentials are configured.
#[derive(Debug)]
pub struct DryRunPublisher {
    max_length: usize,
    published: Mutex<Vec<PublishedPost>>,
}

impl DryRunPublisher {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            published: Mutex::new(Vec::new()),
        }
    }

    /// Posts accepted so far by this instance
    pub fn published(&self) -> Vec<PublishedPost> {
        match self.published.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Default for DryRunPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POST_LENGTH)
    }
}

#[async_trait]
impl Publisher for DryRunPublisher {
    async fn publish(&self, text: &str) -> Result<PublishedPost, PublishFailureReason> {
        check_length(text, self.max_length)?;

        let id = Uuid::new_v4().simple().to_string();
        let post = PublishedPost {
            url: format!("dry-run://posts/{}", id),
            id,
        };
        info!(post_id = %post.id, length = text.chars().count(), "Dry run: post not sent");

        match self.published.lock() {
            Ok(mut guard) => guard.push(post.clone()),
            Err(poisoned) => poisoned.into_inner().push(post.clone()),
        }
        Ok(post)
    }
}
