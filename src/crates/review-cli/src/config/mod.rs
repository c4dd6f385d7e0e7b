//! Configuration for the `review` binary

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    LlmConfig, LoggingConfig, PublisherConfig, PublisherKind, ReviewConfig, StorageBackend,
    StorageConfig, WorkflowConfig,
};
