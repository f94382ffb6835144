//! Error types for configuration parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration parsing error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Unknown file type
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
    /// Handler file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Invalid glob pattern
    #[error("Invalid pattern: {0}")]
    Glob(#[from] glob::PatternError),
    /// Pattern matched no files
    #[error("No handler files match: {0}")]
    NoFilesMatched(String),
    /// Handler definition is unusable
    #[error("Invalid handler: {reason}")]
    InvalidHandler { reason: String },
}
