//! Local LLM provider implementations.
//!
//! Providers here talk to a model server on localhost or the local network.
//! They need no API key and keep article text on the machine.
//!
//! # Providers
//!
//! - **Ollama** - local LLM runner with wide model support

pub mod ollama;

pub use ollama::{ModelInfo, OllamaClient};
