//! # Inspection Engine
//!
//! Resolver → aggregator and compliance → state machine, wired together
//! over one snapshot. The engine holds only the compliance policy, which is
//! read-only after construction, so one instance serves every request.

use insp_compliance::{CompliancePolicy, ComplianceSummary};
use insp_core::{
    Inspection, InspectionSnapshot, InspectionStatus, SectionKind, Timestamp, Unit,
    UnitConfiguration,
};
use insp_schema::{incomplete_fields, inapplicable_sections, IncompleteReport, ResolvedTabs};
use insp_state::{apply, check_integrity, ensure_writable, plan_transition, TransitionOutcome};
use serde::Serialize;

use crate::error::EngineError;
use crate::prefill::{self, PrefillDraft};
use crate::repository::InspectionHistory;
use crate::update::{self, SectionUpdate};

/// Result of evaluating one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Applicable tabs in display order.
    pub tabs: Vec<SectionKind>,
    pub incomplete: IncompleteReport,
    pub complete_eligible: bool,
    pub compliance: ComplianceSummary,
    /// Section rows present on the inspection but not applicable. Ignored.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_sections: Vec<SectionKind>,
}

#[derive(Debug, Clone, Default)]
pub struct InspectionEngine {
    policy: CompliancePolicy,
}

impl InspectionEngine {
    pub fn new(policy: CompliancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    /// Ordered applicable sections for a unit configuration.
    pub fn resolve_tabs(&self, configuration: &UnitConfiguration) -> Result<ResolvedTabs, EngineError> {
        insp_schema::resolve_tabs(configuration).map_err(|e| {
            tracing::error!(error = %e, "cannot resolve tabs");
            EngineError::UnknownUnitConfiguration(e)
        })
    }

    /// Completion and compliance for a snapshot.
    ///
    /// A snapshot that could only exist by bypassing the completion guard
    /// is a fatal [`EngineError::DataIntegrityFault`].
    pub fn evaluate(&self, snapshot: &InspectionSnapshot) -> Result<Evaluation, EngineError> {
        let inspection = &snapshot.inspection;
        let tabs = self.resolve_tabs(&snapshot.configuration)?;
        let ignored_sections = inapplicable_sections(inspection, &tabs);
        let incomplete = incomplete_fields(inspection, &tabs);
        check_integrity(inspection, &incomplete)?;

        let compliance = ComplianceSummary::compute(inspection, tabs.tabs(), &self.policy);
        let complete_eligible = incomplete.is_empty();

        tracing::debug!(
            inspection_id = %inspection.id,
            unit_type = %tabs.unit_type(),
            tabs = tabs.tabs().len(),
            incomplete = incomplete.total(),
            complete_eligible,
            warnings = compliance.warnings.len(),
            "evaluated inspection"
        );

        Ok(Evaluation {
            tabs: tabs.into_vec(),
            incomplete,
            complete_eligible,
            compliance,
            ignored_sections,
        })
    }

    /// Plan a lifecycle transition without touching the snapshot.
    pub fn transition(
        &self,
        snapshot: &InspectionSnapshot,
        target: InspectionStatus,
        now: Timestamp,
    ) -> Result<TransitionOutcome, EngineError> {
        let tabs = self.resolve_tabs(&snapshot.configuration)?;
        Ok(plan_transition(&snapshot.inspection, &tabs, target, now)?)
    }

    /// Plan a transition and, if accepted, apply it to the snapshot.
    pub fn transition_in_place(
        &self,
        snapshot: &mut InspectionSnapshot,
        target: InspectionStatus,
        now: Timestamp,
    ) -> Result<TransitionOutcome, EngineError> {
        let outcome = self.transition(snapshot, target, now)?;
        apply(&mut snapshot.inspection, &outcome);
        Ok(outcome)
    }

    /// Patch-merge one section's writes into a draft inspection.
    pub fn apply_update(
        &self,
        configuration: &UnitConfiguration,
        inspection: &mut Inspection,
        update: &SectionUpdate,
    ) -> Result<(), EngineError> {
        ensure_writable(inspection)?;
        let tabs = self.resolve_tabs(configuration)?;
        update::merge(inspection, &tabs, update)
    }

    /// Draft values from the unit's most recently completed inspection.
    /// Empty when there is none.
    ///
    /// The source is checked before anything is copied: a record that is
    /// not complete is skipped, and one that fails the integrity check over
    /// the sections it actually recorded is a fatal
    /// [`EngineError::DataIntegrityFault`].
    pub fn prefill(
        &self,
        unit: &Unit,
        history: &dyn InspectionHistory,
    ) -> Result<PrefillDraft, EngineError> {
        let tabs = self.resolve_tabs(&unit.configuration)?;
        let draft = match history.latest_completed_for_unit(&unit.id) {
            Some(prior) if !prior.is_complete() => {
                tracing::warn!(
                    unit_id = %unit.id,
                    inspection_id = %prior.id,
                    "history returned a draft as prefill source; ignoring"
                );
                PrefillDraft::default()
            }
            Some(prior) => {
                let recorded = incomplete_fields(&prior, &tabs)
                    .restricted_to(|kind| !kind.is_assessment() || prior.has_section(kind));
                check_integrity(&prior, &recorded)?;
                prefill::from_prior(&prior, &tabs)
            }
            None => PrefillDraft::default(),
        };
        tracing::debug!(
            unit_id = %unit.id,
            source = ?draft.source,
            sections = draft.sections.len(),
            "prefilled draft"
        );
        Ok(draft)
    }

    /// One-shot copy of the measurements stored on `unit`, limited to
    /// `tabs`.
    pub fn copy_unit_dimensions(&self, unit: &Unit, tabs: &ResolvedTabs) -> PrefillDraft {
        prefill::from_unit_measurements(&unit.measurements, tabs)
    }

    /// Overlay a prefill draft onto a draft inspection, validated like any
    /// other write.
    pub fn apply_prefill(
        &self,
        configuration: &UnitConfiguration,
        inspection: &mut Inspection,
        draft: &PrefillDraft,
    ) -> Result<(), EngineError> {
        ensure_writable(inspection)?;
        let tabs = self.resolve_tabs(configuration)?;
        update::merge_sections(inspection, &tabs, &draft.sections)
    }

    /// A fresh draft inspection for `unit` seeded with `draft`.
    pub fn prefilled_inspection(
        &self,
        unit: &Unit,
        draft: &PrefillDraft,
    ) -> Result<Inspection, EngineError> {
        let mut inspection = Inspection::new_draft(Some(unit.id));
        self.apply_prefill(&unit.configuration, &mut inspection, draft)?;
        Ok(inspection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insp_core::{FieldValue, UnitType, ValueKind};
    use insp_schema::schema_for;

    fn fill_required(engine: &InspectionEngine, snapshot: &mut InspectionSnapshot) {
        let tabs = engine.resolve_tabs(&snapshot.configuration).unwrap();
        let inflatable = tabs.unit_type().is_inflatable();
        for kind in tabs.tabs() {
            let mut update = SectionUpdate::new(*kind);
            for spec in schema_for(*kind).required_fields(inflatable) {
                let value = match spec.value_kind() {
                    Some(ValueKind::Bool) => FieldValue::Bool(true),
                    Some(ValueKind::Integer) => FieldValue::Integer(2),
                    Some(ValueKind::Number) => FieldValue::Number(1.0),
                    Some(ValueKind::Text) => FieldValue::Text("recorded".into()),
                    Some(ValueKind::Date) => {
                        FieldValue::Date(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap())
                    }
                    None => continue,
                };
                update = update.set(spec.id, value);
            }
            engine
                .apply_update(&snapshot.configuration, &mut snapshot.inspection, &update)
                .unwrap();
        }
    }

    fn snapshot(config: UnitConfiguration) -> InspectionSnapshot {
        InspectionSnapshot::new(config, Inspection::new_draft(None))
    }

    #[test]
    fn eligible_iff_report_empty() {
        let engine = InspectionEngine::default();
        let mut snap = snapshot(UnitConfiguration::new(UnitType::Combo).with_slide(true));
        let eval = engine.evaluate(&snap).unwrap();
        assert!(!eval.complete_eligible);
        assert_eq!(eval.incomplete.section(SectionKind::Results), ["passed"]);

        fill_required(&engine, &mut snap);
        let eval = engine.evaluate(&snap).unwrap();
        assert!(eval.incomplete.is_empty());
        assert!(eval.complete_eligible);
    }

    #[test]
    fn unknown_unit_type_is_fatal() {
        let engine = InspectionEngine::default();
        let mut config = UnitConfiguration::new(UnitType::BounceHouse);
        config.unit_type = "hovercraft".into();
        let err = engine.evaluate(&snapshot(config)).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, EngineError::UnknownUnitConfiguration(_)));
    }

    #[test]
    fn completed_snapshot_with_gaps_is_an_integrity_fault() {
        let engine = InspectionEngine::default();
        let mut snap = snapshot(UnitConfiguration::new(UnitType::BounceHouse));
        snap.inspection.status = InspectionStatus::Complete;
        snap.inspection.complete_date = Some(Timestamp::now());
        let err = engine.evaluate(&snap).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, EngineError::DataIntegrityFault { .. }));
    }

    #[test]
    fn writes_frozen_after_completion_until_reopen() {
        let engine = InspectionEngine::default();
        let mut snap = snapshot(UnitConfiguration::new(UnitType::PatTestable));
        fill_required(&engine, &mut snap);
        let now = Timestamp::now();
        let outcome = engine
            .transition_in_place(&mut snap, InspectionStatus::Complete, now)
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::Completed { complete_date: now });

        let update = SectionUpdate::new(SectionKind::Pat).set("fuse_rating", 13.0);
        let err = engine
            .apply_update(&snap.configuration, &mut snap.inspection, &update)
            .unwrap_err();
        assert!(matches!(err, EngineError::FrozenStateWrite { .. }));

        engine
            .transition_in_place(&mut snap, InspectionStatus::Draft, Timestamp::now())
            .unwrap();
        engine
            .apply_update(&snap.configuration, &mut snap.inspection, &update)
            .unwrap();
        assert_eq!(
            snap.inspection.fields(SectionKind::Pat).unwrap().number("fuse_rating"),
            Some(13.0)
        );
    }

    #[test]
    fn stray_rows_are_reported_and_ignored() {
        let engine = InspectionEngine::default();
        let mut snap = snapshot(UnitConfiguration::new(UnitType::PatTestable));
        fill_required(&engine, &mut snap);
        snap.inspection
            .fields_mut(SectionKind::Slide)
            .set("runout", 0.1);
        let eval = engine.evaluate(&snap).unwrap();
        assert_eq!(eval.ignored_sections, vec![SectionKind::Slide]);
        assert!(eval.complete_eligible);
        assert!(eval.compliance.runout.is_none());
    }

    #[test]
    fn apply_prefill_recomputes_derived_and_respects_tabs() {
        let engine = InspectionEngine::default();
        let config = UnitConfiguration::new(UnitType::BounceHouse);
        let mut unit = Unit::new("Castle", config.clone());
        let mut anchorage = insp_core::FieldSet::new();
        anchorage.set("num_low_anchors", 4_i64);
        anchorage.set("num_high_anchors", 2_i64);
        unit.measurements.insert(SectionKind::Anchorage, anchorage);
        let mut slide = insp_core::FieldSet::new();
        slide.set("runout", 1.2);
        unit.measurements.insert(SectionKind::Slide, slide);

        let tabs = engine.resolve_tabs(&config).unwrap();
        let draft = engine.copy_unit_dimensions(&unit, &tabs);
        assert!(draft.fields(SectionKind::Slide).is_none());

        let mut insp = Inspection::new_draft(Some(unit.id));
        engine.apply_prefill(&config, &mut insp, &draft).unwrap();
        assert_eq!(
            insp.fields(SectionKind::Anchorage).unwrap().integer("total_anchors"),
            Some(6)
        );

        let indoor = UnitConfiguration::new(UnitType::BounceHouse).with_indoor_only(true);
        assert!(matches!(
            engine.apply_prefill(&indoor, &mut insp, &draft),
            Err(EngineError::InapplicableSectionWrite {
                section: SectionKind::Anchorage,
                ..
            })
        ));
    }

    #[test]
    fn apply_prefill_validates_unit_measurements() {
        let engine = InspectionEngine::default();
        let config = UnitConfiguration::new(UnitType::BounceHouse);
        let mut unit = Unit::new("Castle", config.clone());
        let mut general = insp_core::FieldSet::new();
        general.set("width", "five metres");
        general.set("length", 6.0);
        unit.measurements.insert(SectionKind::General, general);
        let mut anchorage = insp_core::FieldSet::new();
        anchorage.set("num_low_anchors", 4.0);
        anchorage.set("num_high_anchors", 2_i64);
        unit.measurements.insert(SectionKind::Anchorage, anchorage);

        let tabs = engine.resolve_tabs(&config).unwrap();
        let draft = engine.copy_unit_dimensions(&unit, &tabs);
        let mut insp = Inspection::new_draft(Some(unit.id));
        let err = engine.apply_prefill(&config, &mut insp, &draft).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFieldWrite {
                section: SectionKind::General,
                ..
            }
        ));
        assert!(!insp.general.has("width"));
        assert!(!insp.has_section(SectionKind::Anchorage));

        unit.measurements
            .get_mut(&SectionKind::General)
            .unwrap()
            .set("width", 5.0);
        let draft = engine.copy_unit_dimensions(&unit, &tabs);
        engine.apply_prefill(&config, &mut insp, &draft).unwrap();
        let anchorage = insp.fields(SectionKind::Anchorage).unwrap();
        assert_eq!(anchorage.get("num_low_anchors"), Some(&FieldValue::Integer(4)));
        assert_eq!(anchorage.integer("total_anchors"), Some(6));

        let snap = InspectionSnapshot::new(config, insp);
        let eval = engine.evaluate(&snap).unwrap();
        assert!(eval.compliance.anchors.is_some());
    }

    struct FixedHistory(Inspection);

    impl InspectionHistory for FixedHistory {
        fn latest_completed_for_unit(&self, _: &insp_core::UnitId) -> Option<Inspection> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn prefill_refuses_a_faulted_source() {
        let engine = InspectionEngine::default();
        let unit = Unit::new("Castle", UnitConfiguration::new(UnitType::BounceHouse));
        let mut faulted = Inspection::new_draft(Some(unit.id));
        faulted.general.set("width", 5.0);
        faulted.status = InspectionStatus::Complete;
        faulted.complete_date = Some(Timestamp::now());

        let err = engine.prefill(&unit, &FixedHistory(faulted)).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, EngineError::DataIntegrityFault { .. }));
    }

    #[test]
    fn prefill_ignores_a_draft_source() {
        let engine = InspectionEngine::default();
        let unit = Unit::new("Castle", UnitConfiguration::new(UnitType::BounceHouse));
        let mut draft = Inspection::new_draft(Some(unit.id));
        draft.general.set("width", 5.0);

        let prefill = engine.prefill(&unit, &FixedHistory(draft)).unwrap();
        assert!(prefill.is_empty());
        assert!(prefill.source.is_none());
    }
}
