//! Content producers for the post review workflow.
//!
//! This crate implements [`review_core::ContentProducer`] on top of a local
//! Ollama server. The producer has two forms:
//!
//! - **initial** - article in, first draft out
//! - **revision** - article and reviewer feedback in, new draft out
//!
//! Both send a system prompt carrying the configured tone and character
//! budget, call `POST /api/chat` without streaming, and return the trimmed
//! reply.
//!
//! Connection failures and timeouts surface as
//! [`GenerationError::Unavailable`](review_core::GenerationError::Unavailable);
//! error statuses and malformed replies surface as
//! [`GenerationError::Failed`](review_core::GenerationError::Failed).
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use llm::config::LocalLlmConfig;
//! use llm::local::OllamaClient;
//! use review_core::ContentProducer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OllamaClient::new(LocalLlmConfig::from_env()?)?;
//!
//!     if !client.check_health().await? {
//!         eprintln!("Ollama is not running; start it with `ollama serve`");
//!         return Ok(());
//!     }
//!
//!     let draft = client.generate("Company X launches new product.").await?;
//!     let revised = client
//!         .revise("Company X launches new product.", "make it punchier")
//!         .await?;
//!     println!("{}\n---\n{}", draft, revised);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod local;
pub mod prompts;

pub use config::LocalLlmConfig;
pub use error::{LlmError, Result};
pub use local::{ModelInfo, OllamaClient};
pub use prompts::{ChatMessage, PostPrompts};
