//! Scripted collaborators shared by the workflow tests

#![allow(dead_code)]

use async_trait::async_trait;
use review_core::{
    ContentProducer, GenerationError, PublishFailureReason, PublishedPost, Publisher,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Producer returning a distinct numbered draft on every call
#[derive(Default)]
pub struct ScriptedProducer {
    calls: AtomicUsize,
    revisions: Mutex<Vec<String>>,
}

impl ScriptedProducer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Feedback strings passed to `revise`, in order
    pub fn revisions(&self) -> Vec<String> {
        self.revisions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentProducer for ScriptedProducer {
    async fn generate(&self, article: &str) -> Result<String, GenerationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("Draft {}: {} #news", n, article))
    }

    async fn revise(&self, article: &str, feedback: &str) -> Result<String, GenerationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.revisions.lock().unwrap().push(feedback.to_string());
        Ok(format!("Draft {} ({}): {} #news", n, feedback, article))
    }
}

/// Producer whose backend is down
pub struct UnreachableProducer;

#[async_trait]
impl ContentProducer for UnreachableProducer {
    async fn generate(&self, _article: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Unavailable("connection refused".to_string()))
    }

    async fn revise(&self, _article: &str, _feedback: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Unavailable("connection refused".to_string()))
    }
}

/// Producer that works for the first draft and fails revisions
pub struct FirstDraftOnlyProducer;

#[async_trait]
impl ContentProducer for FirstDraftOnlyProducer {
    async fn generate(&self, article: &str) -> Result<String, GenerationError> {
        Ok(format!("Only draft: {}", article))
    }

    async fn revise(&self, _article: &str, _feedback: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Failed("HTTP 500 from model server".to_string()))
    }
}

/// Publisher that records every call and answers with a fixed result
pub struct RecordingPublisher {
    result: Result<PublishedPost, PublishFailureReason>,
    published: Mutex<Vec<String>>,
}

impl RecordingPublisher {
    pub fn succeeding() -> Self {
        Self::with_result(Ok(PublishedPost {
            id: "1790000000000000001".to_string(),
            url: "https://twitter.com/reviewer/status/1790000000000000001".to_string(),
        }))
    }

    pub fn failing(reason: PublishFailureReason) -> Self {
        Self::with_result(Err(reason))
    }

    fn with_result(result: Result<PublishedPost, PublishFailureReason>) -> Self {
        Self {
            result,
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn texts(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, text: &str) -> Result<PublishedPost, PublishFailureReason> {
        self.published.lock().unwrap().push(text.to_string());
        self.result.clone()
    }
}
