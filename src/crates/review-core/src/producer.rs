//! Content producer boundary
//!
//! A [`ContentProducer`] turns an article into candidate post text. It keeps
//! no state between calls; the workflow decides which form to call.

use async_trait::async_trait;
use thiserror::Error;

/// Why a producer could not return text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Backend unreachable or timed out
    #[error("{0}")]
    Unavailable(String),

    /// Backend reachable but returned an error or an unusable reply
    #[error("{0}")]
    Failed(String),
}

/// Text generation capability used by the `GENERATE` node
#[async_trait]
pub trait ContentProducer: Send + Sync {
    /// First draft from the article alone
    async fn generate(&self, article: &str) -> Result<String, GenerationError>;

    /// New draft following reviewer feedback
    async fn revise(&self, article: &str, feedback: &str) -> Result<String, GenerationError>;
}
