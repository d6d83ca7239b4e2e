//! Lifecycle errors.
//!
//! Write and delete refusals are recoverable: the caller reopens and
//! retries. An integrity fault is not recoverable locally.

use insp_core::InspectionId;
use insp_schema::IncompleteReport;
use serde::Serialize;
use thiserror::Error;

/// What exactly is inconsistent about a faulted inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum IntegrityViolation {
    /// Status is complete but no completion date is stored.
    CompleteWithoutDate,
    /// A completion date is stored on a draft.
    DateOnDraft,
    /// Completed while required fields are still empty.
    CompleteWithIncompleteFields { incomplete: IncompleteReport },
}

impl std::fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompleteWithoutDate => f.write_str("status complete without complete_date"),
            Self::DateOnDraft => f.write_str("complete_date set on a draft"),
            Self::CompleteWithIncompleteFields { incomplete } => write!(
                f,
                "completed with {} incomplete field(s): {}",
                incomplete.total(),
                incomplete.qualified_ids().join(", ")
            ),
        }
    }
}

/// Errors raised by the lifecycle guard.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Field write against a completed inspection.
    #[error("inspection {inspection_id} is complete; reopen it before writing")]
    FrozenStateWrite { inspection_id: InspectionId },

    /// Deletion of a completed inspection.
    #[error("inspection {inspection_id} is complete and cannot be deleted")]
    DeleteWhileComplete { inspection_id: InspectionId },

    /// The stored state could only have been produced by bypassing the
    /// completion guard.
    #[error("data integrity fault on inspection {inspection_id}: {violation}")]
    DataIntegrityFault {
        inspection_id: InspectionId,
        violation: IntegrityViolation,
    },
}

impl LifecycleError {
    /// Whether the error must propagate as a hard failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DataIntegrityFault { .. })
    }
}
