//! # Error Hierarchy
//!
//! Structured error types for the foundational layer, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Validation errors carry the rejected input so that a caller can report
//! the bad record without re-deriving what went wrong.

use thiserror::Error;

/// Top-level error type for the core crate.
#[derive(Error, Debug)]
pub enum InspError {
    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for domain primitives parsed from persisted strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A `unit_type` string outside the known set.
    #[error("unknown unit type: {0:?}")]
    UnknownUnitType(String),

    /// A section kind string outside the known set.
    #[error("unknown section kind: {0:?}")]
    UnknownSectionKind(String),

    /// A lifecycle status string outside {draft, complete}.
    #[error("unknown inspection status: {0:?}")]
    UnknownStatus(String),

    /// Identifier is not a valid UUID.
    #[error("invalid identifier: \"{0}\" (expected a UUID)")]
    InvalidIdentifier(String),

    /// Timestamp string is not valid UTC ISO 8601.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
