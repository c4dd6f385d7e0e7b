//! Library half of the `review` binary
//!
//! - [`config`] - layered TOML configuration with environment overrides
//! - [`context`] - builds the checkpoint store, producer, publisher and
//!   coordinator from a [`ReviewConfig`]
//! - [`commands`] - `start`, `respond`, `status`, `list` and `check`
//!
//! Every command is a separate process: `start` persists the run and exits,
//! and a later `respond` picks it up from the checkpoint store.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;

pub use config::{ConfigLoader, ReviewConfig};
pub use context::{AppContext, PublisherTarget};
pub use error::{CliError, Result};
