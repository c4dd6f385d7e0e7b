//! Command handlers for the `review` binary
//!
//! Handlers write to any [`std::io::Write`] so the binary can pass stdout
//! and tests can pass a buffer.

pub mod check;
pub mod inspect;
pub mod render;
pub mod respond;
pub mod start;

pub use check::handle_check;
pub use inspect::{handle_list, handle_status};
pub use respond::{handle_respond, prompt_feedback};
pub use start::{handle_start, read_article};
