//! # Prefill
//!
//! Seeds a new draft from the unit's most recently completed inspection,
//! or from the measurements stored on the unit itself. Both are explicit,
//! one-shot copies: nothing links the draft back to its source afterwards.
//!
//! Copying is per section and limited to the sections applicable to the
//! unit now. A section the unit gained since the last visit starts empty;
//! one it lost is dropped.
//!
//! Per-visit fields are never carried. They are listed by identifier in
//! [`NON_CARRIED_FIELDS`] rather than inferred from their shape, because
//! pass-flags in general *are* carried (the inspector re-confirms them)
//! while the overall verdict is not.

use std::collections::BTreeMap;

use insp_core::{FieldSet, FieldValue, Inspection, InspectionId, SectionKind};
use insp_schema::{schema_for, ResolvedTabs};
use serde::Serialize;

/// Fields that belong to one visit and are re-determined every time.
pub const NON_CARRIED_FIELDS: &[(SectionKind, &str)] = &[
    (SectionKind::General, "inspection_date"),
    (SectionKind::General, "inspection_location"),
    (SectionKind::General, "inspector_signature"),
    (SectionKind::General, "signed_at"),
    (SectionKind::Results, "passed"),
    (SectionKind::Results, "risk_assessment"),
];

fn is_carried(kind: SectionKind, field: &str) -> bool {
    !NON_CARRIED_FIELDS
        .iter()
        .any(|(k, f)| *k == kind && *f == field)
}

/// Field values and comments to seed a new draft with, per section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrefillDraft {
    /// The inspection the values came from, if any.
    pub source: Option<InspectionId>,
    pub sections: BTreeMap<SectionKind, FieldSet>,
}

impl PrefillDraft {
    /// Nothing to seed.
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(FieldSet::is_empty)
    }

    pub fn fields(&self, kind: SectionKind) -> Option<&FieldSet> {
        self.sections.get(&kind)
    }

    /// Values keyed `section.field`.
    pub fn flatten(&self) -> BTreeMap<String, FieldValue> {
        self.sections
            .iter()
            .flat_map(|(kind, fields)| {
                fields
                    .values
                    .iter()
                    .map(move |(id, v)| (format!("{kind}.{id}"), v.clone()))
            })
            .collect()
    }

    /// Comments keyed `section.field`.
    pub fn flatten_comments(&self) -> BTreeMap<String, String> {
        self.sections
            .iter()
            .flat_map(|(kind, fields)| {
                fields
                    .comments
                    .iter()
                    .map(move |(id, c)| (format!("{kind}.{id}"), c.clone()))
            })
            .collect()
    }

    fn copy_section(&mut self, kind: SectionKind, from: &FieldSet) {
        let schema = schema_for(kind);
        let known = |id: &str| schema.field(id).is_some() && is_carried(kind, id);
        let mut copied = FieldSet::new();
        for (id, value) in from.values.iter().filter(|(id, _)| known(id.as_str())) {
            copied.set(id.as_str(), value.clone());
        }
        for (id, comment) in from.comments.iter().filter(|(id, _)| known(id.as_str())) {
            copied.set_comment(id.as_str(), comment.as_str());
        }
        if !copied.is_empty() {
            self.sections.insert(kind, copied);
        }
    }
}

/// Copy the carried fields of `prior` for every applicable tab.
pub(crate) fn from_prior(prior: &Inspection, tabs: &ResolvedTabs) -> PrefillDraft {
    let mut draft = PrefillDraft {
        source: Some(prior.id),
        sections: BTreeMap::new(),
    };
    for kind in tabs.tabs() {
        if let Some(fields) = prior.fields(*kind) {
            draft.copy_section(*kind, fields);
        }
    }
    draft
}

/// Copy the measurements stored on a unit for every applicable tab.
pub(crate) fn from_unit_measurements(
    measurements: &BTreeMap<SectionKind, FieldSet>,
    tabs: &ResolvedTabs,
) -> PrefillDraft {
    let mut draft = PrefillDraft::default();
    for kind in tabs.tabs() {
        if let Some(fields) = measurements.get(kind) {
            draft.copy_section(*kind, fields);
        }
    }
    draft
}
