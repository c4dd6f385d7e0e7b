//! Publishers for the post review workflow.
//!
//! Two implementations of [`review_core::Publisher`]:
//!
//! - [`XPublisher`] - posts through the X (Twitter) API v2
//! - [`DryRunPublisher`] - accepts posts locally, for runs without credentials
//!
//! Both enforce the character limit before doing anything else, so an
//! over-long draft ends the run as `approved_unpublished` with a `TooLong`
//! reason and no request is made.
//!
//! # Example
//!
//! ```rust,ignore
//! use publisher::{XConfig, XPublisher};
//! use review_core::Publisher;
//!
//! let publisher = XPublisher::new(XConfig::from_env()?)?;
//! println!("posting as @{}", publisher.verify_credentials().await?);
//!
//! match publisher.publish("Company X just shipped! #launch").await {
//!     Ok(post) => println!("live at {}", post.url),
//!     Err(reason) => eprintln!("not published: {}", reason),
//! }
//! ```

pub mod config;
pub mod dry_run;
pub mod error;
pub mod x;

pub use config::XConfig;
pub use dry_run::DryRunPublisher;
pub use error::{PublisherError, Result};
pub use x::XPublisher;
