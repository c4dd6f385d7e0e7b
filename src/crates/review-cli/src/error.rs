//! Error types for the command-line front end

use std::path::PathBuf;
use thiserror::Error;

/// Failures that happen before the workflow is reached
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Article is empty; provide a file or pipe text on stdin")]
    EmptyArticle,
}

pub type Result<T> = std::result::Result<T, CliError>;
