//! # Lifecycle Transitions
//!
//! Two-phase: [`plan_transition`] decides against an immutable snapshot,
//! [`apply`] commits an accepted plan. A rejected or faulted plan leaves the
//! inspection untouched because nothing was ever written.
//!
//! | from     | to       | outcome                                         |
//! |----------|----------|-------------------------------------------------|
//! | draft    | complete | `Completed` iff zero incomplete, else `Rejected` |
//! | complete | draft    | `Reopened`, unconditionally                     |
//! | x        | x        | `Unchanged`                                     |
//!
//! Every plan except a reopen first passes [`check_integrity`]; a reopen is
//! the caller's explicit way out of a faulted state.

use insp_core::{Inspection, InspectionStatus, Timestamp};
use insp_schema::{incomplete_fields, IncompleteReport, ResolvedTabs};
use serde::Serialize;

use crate::error::LifecycleError;
use crate::integrity::check_integrity;

/// Result of planning a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// Draft → complete accepted; `complete_date` is the supplied clock.
    Completed { complete_date: Timestamp },
    /// Complete → draft accepted.
    Reopened,
    /// Requested status equals current status.
    Unchanged { status: InspectionStatus },
    /// Draft → complete refused; the inspection stays draft.
    Rejected { incomplete: IncompleteReport },
}

impl TransitionOutcome {
    /// Whether applying this outcome changes the inspection.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Reopened)
    }

    /// The status the inspection holds after [`apply`].
    pub fn resulting_status(&self, current: InspectionStatus) -> InspectionStatus {
        match self {
            Self::Completed { .. } => InspectionStatus::Complete,
            Self::Reopened => InspectionStatus::Draft,
            Self::Unchanged { .. } | Self::Rejected { .. } => current,
        }
    }
}

/// Decide the outcome of moving `inspection` to `target` at time `now`.
pub fn plan_transition(
    inspection: &Inspection,
    tabs: &ResolvedTabs,
    target: InspectionStatus,
    now: Timestamp,
) -> Result<TransitionOutcome, LifecycleError> {
    if inspection.status == InspectionStatus::Complete && target == InspectionStatus::Draft {
        return Ok(TransitionOutcome::Reopened);
    }

    let incomplete = incomplete_fields(inspection, tabs);
    check_integrity(inspection, &incomplete)?;

    if inspection.status == target {
        return Ok(TransitionOutcome::Unchanged { status: target });
    }

    // Only draft → complete remains.
    if incomplete.is_empty() {
        Ok(TransitionOutcome::Completed { complete_date: now })
    } else {
        tracing::info!(
            inspection_id = %inspection.id,
            incomplete = incomplete.total(),
            "completion rejected"
        );
        Ok(TransitionOutcome::Rejected { incomplete })
    }
}

/// Commit an accepted plan. `Unchanged` and `Rejected` are no-ops.
///
/// `status` and `complete_date` are always written together here and
/// nowhere else.
pub fn apply(inspection: &mut Inspection, outcome: &TransitionOutcome) {
    let from = inspection.status;
    match outcome {
        TransitionOutcome::Completed { complete_date } => {
            inspection.status = InspectionStatus::Complete;
            inspection.complete_date = Some(*complete_date);
        }
        TransitionOutcome::Reopened => {
            inspection.status = InspectionStatus::Draft;
            inspection.complete_date = None;
        }
        TransitionOutcome::Unchanged { .. } | TransitionOutcome::Rejected { .. } => return,
    }
    tracing::info!(
        inspection_id = %inspection.id,
        %from,
        to = %inspection.status,
        "inspection transitioned"
    );
}

/// Refuse field writes while complete.
pub fn ensure_writable(inspection: &Inspection) -> Result<(), LifecycleError> {
    if inspection.is_complete() {
        return Err(LifecycleError::FrozenStateWrite {
            inspection_id: inspection.id,
        });
    }
    Ok(())
}

/// Refuse deletion while complete.
pub fn ensure_deletable(inspection: &Inspection) -> Result<(), LifecycleError> {
    if inspection.is_complete() {
        return Err(LifecycleError::DeleteWhileComplete {
            inspection_id: inspection.id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insp_core::{SectionKind, UnitConfiguration, UnitType};
    use insp_schema::resolve_tabs;

    fn pat_tabs() -> ResolvedTabs {
        resolve_tabs(&UnitConfiguration::new(UnitType::PatTestable)).unwrap()
    }

    fn filled_pat_inspection() -> Inspection {
        let mut insp = Inspection::new_draft(None);
        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        insp.general.set("inspection_date", date);
        insp.general.set("inspection_location", "Depot");
        let tabs = pat_tabs();
        for kind in tabs.tabs() {
            let schema = insp_schema::schema_for(*kind);
            for spec in schema.required_fields(false) {
                let value = match spec.value_kind() {
                    Some(insp_core::ValueKind::Bool) => insp_core::FieldValue::Bool(true),
                    Some(insp_core::ValueKind::Integer) => insp_core::FieldValue::Integer(1),
                    Some(insp_core::ValueKind::Number) => insp_core::FieldValue::Number(1.0),
                    Some(insp_core::ValueKind::Date) => insp_core::FieldValue::Date(date),
                    Some(insp_core::ValueKind::Text) => insp_core::FieldValue::Text("ok".into()),
                    None => continue,
                };
                insp.fields_mut(*kind).set(spec.id, value);
            }
        }
        insp
    }

    #[test]
    fn complete_requires_zero_incomplete() {
        let insp = Inspection::new_draft(None);
        let now = Timestamp::now();
        let outcome = plan_transition(&insp, &pat_tabs(), InspectionStatus::Complete, now).unwrap();
        match outcome {
            TransitionOutcome::Rejected { incomplete } => {
                assert!(!incomplete.section(SectionKind::General).is_empty());
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejected_plan_has_no_side_effect() {
        let mut insp = Inspection::new_draft(None);
        let before = insp.clone();
        let outcome =
            plan_transition(&insp, &pat_tabs(), InspectionStatus::Complete, Timestamp::now())
                .unwrap();
        apply(&mut insp, &outcome);
        assert_eq!(insp, before);
    }

    #[test]
    fn complete_then_reopen_round_trip_keeps_values() {
        let mut insp = filled_pat_inspection();
        let now = Timestamp::now();
        let outcome = plan_transition(&insp, &pat_tabs(), InspectionStatus::Complete, now).unwrap();
        assert_eq!(outcome, TransitionOutcome::Completed { complete_date: now });
        apply(&mut insp, &outcome);
        assert!(insp.is_complete());
        assert_eq!(insp.complete_date, Some(now));

        let values = insp.sections.clone();
        let outcome =
            plan_transition(&insp, &pat_tabs(), InspectionStatus::Draft, Timestamp::now()).unwrap();
        assert_eq!(outcome, TransitionOutcome::Reopened);
        apply(&mut insp, &outcome);
        assert_eq!(insp.status, InspectionStatus::Draft);
        assert!(insp.complete_date.is_none());
        assert_eq!(insp.sections, values);
    }

    #[test]
    fn reopen_is_allowed_even_from_faulted_state() {
        let mut insp = Inspection::new_draft(None);
        insp.status = InspectionStatus::Complete;
        insp.complete_date = Some(Timestamp::now());
        assert_eq!(
            plan_transition(&insp, &pat_tabs(), InspectionStatus::Draft, Timestamp::now()).unwrap(),
            TransitionOutcome::Reopened
        );
    }

    #[test]
    fn faulted_complete_is_not_reported_unchanged() {
        let mut insp = Inspection::new_draft(None);
        insp.status = InspectionStatus::Complete;
        insp.complete_date = Some(Timestamp::now());
        let err = plan_transition(&insp, &pat_tabs(), InspectionStatus::Complete, Timestamp::now())
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn same_status_is_unchanged() {
        let insp = Inspection::new_draft(None);
        assert_eq!(
            plan_transition(&insp, &pat_tabs(), InspectionStatus::Draft, Timestamp::now()).unwrap(),
            TransitionOutcome::Unchanged {
                status: InspectionStatus::Draft
            }
        );
    }

    #[test]
    fn writes_and_deletes_frozen_while_complete() {
        let mut insp = Inspection::new_draft(None);
        assert!(ensure_writable(&insp).is_ok());
        assert!(ensure_deletable(&insp).is_ok());
        insp.status = InspectionStatus::Complete;
        assert!(matches!(
            ensure_writable(&insp),
            Err(LifecycleError::FrozenStateWrite { .. })
        ));
        assert!(matches!(
            ensure_deletable(&insp),
            Err(LifecycleError::DeleteWhileComplete { .. })
        ));
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(TransitionOutcome::Reopened).unwrap();
        assert_eq!(json["outcome"], "reopened");
    }
}
