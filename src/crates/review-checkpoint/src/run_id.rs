//! Run identifiers
//!
//! A [`RunId`] keys every checkpoint. Generated identifiers combine a UTC
//! timestamp with a random suffix so concurrent runs started in the same
//! second never collide; caller-supplied identifiers are validated so every
//! backend (including the file store, which uses them as file names) can hold
//! them verbatim.

use crate::error::{CheckpointError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Maximum accepted length of a run identifier
pub const MAX_RUN_ID_LEN: usize = 128;

/// Opaque, validated identifier of a review run
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunId(String);

impl RunId {
    /// Generate a fresh identifier: `run_<YYYYmmdd>_<HHMMSS>_<8 hex>`
    pub fn generate() -> Self {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("run_{}_{}", timestamp, &suffix[..8]))
    }

    /// Accept a caller-supplied identifier after validation
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(CheckpointError::Invalid("run id must not be empty".to_string()));
        }
        if value.len() > MAX_RUN_ID_LEN {
            return Err(CheckpointError::Invalid(format!(
                "run id exceeds {} characters",
                MAX_RUN_ID_LEN
            )));
        }
        if value.starts_with('.') {
            return Err(CheckpointError::Invalid(format!(
                "run id must not start with '.': {}",
                value
            )));
        }
        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(CheckpointError::Invalid(format!(
                "run id contains unsupported character {:?}: {}",
                bad, value
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RunId {
    type Err = CheckpointError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RunId {
    type Error = CheckpointError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<RunId> for String {
    fn from(id: RunId) -> Self {
        id.0
    }
}

impl AsRef<str> for RunId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = RunId::generate();
        let b = RunId::generate();

        assert!(a.as_str().starts_with("run_"));
        assert_ne!(a, b);
        assert!(RunId::parse(a.as_str()).is_ok());
    }

    #[test]
    fn test_generated_id_shape() {
        let id = RunId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 6);
        assert_eq!(parts[3].len(), 8);
    }

    #[test]
    fn test_parse_rejects_path_like_ids() {
        assert!(RunId::parse("").is_err());
        assert!(RunId::parse("../etc/passwd").is_err());
        assert!(RunId::parse("a/b").is_err());
        assert!(RunId::parse(".hidden").is_err());
        assert!(RunId::parse("x".repeat(MAX_RUN_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_parse_accepts_caller_ids() {
        let id: RunId = "workflow_20240101_120000_abcdef12".parse().unwrap();
        assert_eq!(id.to_string(), "workflow_20240101_120000_abcdef12");
        assert!(RunId::parse("release-notes.v2").is_ok());
    }

    #[test]
    fn test_serde_validates() {
        let ok: RunId = serde_json::from_str("\"run-1\"").unwrap();
        assert_eq!(ok.as_str(), "run-1");

        let bad: std::result::Result<RunId, _> = serde_json::from_str("\"a b\"");
        assert!(bad.is_err());
    }
}
