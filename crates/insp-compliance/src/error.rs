//! Policy loading errors.
//!
//! Every variant that comes from a file carries its path.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a compliance policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The policy file does not exist.
    #[error("policy file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The policy parsed but its tables are unusable.
    #[error("invalid policy: {0}")]
    Invalid(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for policy results.
pub type PolicyResult<T> = Result<T, PolicyError>;
