//! Engine error taxonomy.
//!
//! Incompleteness is not here: a refused completion is the
//! [`TransitionOutcome::Rejected`](insp_state::TransitionOutcome) value.

use insp_core::{InspectionId, SectionKind, UnitId, UnitType, ValidationError};
use insp_state::{IntegrityViolation, LifecycleError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Write to a section outside the resolved tabs. Nothing was applied.
    #[error("section {section} is not applicable to a {unit_type} unit")]
    InapplicableSectionWrite {
        section: SectionKind,
        unit_type: UnitType,
    },

    /// Write or delete against a completed inspection.
    #[error("inspection {inspection_id} is complete; reopen it first")]
    FrozenStateWrite { inspection_id: InspectionId },

    /// Stored state bypassed the completion guard.
    #[error("data integrity fault on inspection {inspection_id}: {violation}")]
    DataIntegrityFault {
        inspection_id: InspectionId,
        violation: IntegrityViolation,
    },

    /// The unit type could not be parsed; applicability is undecidable.
    #[error("unknown unit configuration: {0}")]
    UnknownUnitConfiguration(#[source] ValidationError),

    /// Unknown or derived field, or a value of the wrong kind.
    #[error("invalid write to {section}.{field}: {reason}")]
    InvalidFieldWrite {
        section: SectionKind,
        field: String,
        reason: String,
    },

    #[error("unit {unit_id} is referenced by {inspections} inspection(s)")]
    UnitInUse { unit_id: UnitId, inspections: usize },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
}

impl EngineError {
    /// Fatal errors must propagate as hard failures, never be shown as a
    /// per-field message.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DataIntegrityFault { .. } | Self::UnknownUnitConfiguration(_)
        )
    }

    pub(crate) fn invalid_write(
        section: SectionKind,
        field: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFieldWrite {
            section,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<LifecycleError> for EngineError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::FrozenStateWrite { inspection_id }
            | LifecycleError::DeleteWhileComplete { inspection_id } => {
                Self::FrozenStateWrite { inspection_id }
            }
            LifecycleError::DataIntegrityFault {
                inspection_id,
                violation,
            } => Self::DataIntegrityFault {
                inspection_id,
                violation,
            },
        }
    }
}
