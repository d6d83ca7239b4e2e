//! # Integrity Classification
//!
//! The guarded draft → complete transition is the only legitimate way to
//! produce a complete inspection. A snapshot that is complete without its
//! date, dated while draft, or complete with missing required fields was
//! written by something else (a repair script, a direct database edit) and
//! is reported as a [`LifecycleError::DataIntegrityFault`].

use insp_core::{Inspection, InspectionStatus};
use insp_schema::IncompleteReport;

use crate::error::{IntegrityViolation, LifecycleError};

/// Check `inspection` against its freshly computed incomplete report.
pub fn check_integrity(
    inspection: &Inspection,
    incomplete: &IncompleteReport,
) -> Result<(), LifecycleError> {
    let violation = match (inspection.status, inspection.complete_date.is_some()) {
        (InspectionStatus::Complete, false) => Some(IntegrityViolation::CompleteWithoutDate),
        (InspectionStatus::Draft, true) => Some(IntegrityViolation::DateOnDraft),
        (InspectionStatus::Complete, true) if !incomplete.is_empty() => {
            Some(IntegrityViolation::CompleteWithIncompleteFields {
                incomplete: incomplete.clone(),
            })
        }
        _ => None,
    };

    match violation {
        None => Ok(()),
        Some(violation) => {
            tracing::error!(
                inspection_id = %inspection.id,
                %violation,
                "inspection failed integrity check"
            );
            Err(LifecycleError::DataIntegrityFault {
                inspection_id: inspection.id,
                violation,
            })
        }
    }
}
