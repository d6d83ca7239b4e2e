//! # Completion Aggregator
//!
//! A pure projection from (inspection, resolved tabs) to the list of
//! required fields that are still null, grouped by section. It is computed
//! on demand from the snapshot and never stored, so it cannot drift from
//! the field values it describes.
//!
//! A required field is incomplete when its value is absent, or present but
//! not representable as the field's declared kind (a corrupted row is not a
//! completed row). A missing section instance makes every required field
//! of that section incomplete. Rows for sections outside the resolved tabs
//! are never consulted.

use std::collections::BTreeMap;

use insp_core::{FieldSet, Inspection, SectionKind};
use serde::{Deserialize, Serialize};

use crate::resolver::ResolvedTabs;
use crate::schema::schema_for;

/// Required-but-empty fields per section, in tab order.
///
/// Only sections with at least one missing field appear. An empty report
/// means the inspection is complete-eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncompleteReport(BTreeMap<SectionKind, Vec<String>>);

impl IncompleteReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero incomplete fields across every section.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of incomplete fields.
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Missing field ids of one section (empty if complete).
    pub fn section(&self, kind: SectionKind) -> &[String] {
        self.0.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sections with missing fields, in tab order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &[String])> {
        self.0.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// `section.field` keys, the form label tables are keyed by.
    pub fn qualified_ids(&self) -> Vec<String> {
        self.sections()
            .flat_map(|(kind, fields)| fields.iter().map(move |f| format!("{kind}.{f}")))
            .collect()
    }

    /// The report limited to sections for which `keep` holds.
    pub fn restricted_to(mut self, keep: impl Fn(SectionKind) -> bool) -> Self {
        self.0.retain(|kind, _| keep(*kind));
        self
    }

    fn push(&mut self, kind: SectionKind, field: &str) {
        self.0.entry(kind).or_default().push(field.to_string());
    }
}

/// Compute the incomplete-field report of `inspection` over `tabs`.
pub fn incomplete_fields(inspection: &Inspection, tabs: &ResolvedTabs) -> IncompleteReport {
    let inflatable = tabs.unit_type().is_inflatable();
    let mut report = IncompleteReport::new();

    for kind in tabs.tabs() {
        let schema = schema_for(*kind);
        let fields = inspection.fields(*kind);
        for spec in schema.required_fields(inflatable) {
            if !is_filled(fields, spec.id, spec.value_kind()) {
                report.push(*kind, spec.id);
            }
        }
    }

    tracing::debug!(
        inspection_id = %inspection.id,
        incomplete = report.total(),
        "computed completion report"
    );
    report
}

/// Section instances present on `inspection` that are not applicable under
/// `tabs`. They are ignored by every computation; callers may clean them up.
pub fn inapplicable_sections(inspection: &Inspection, tabs: &ResolvedTabs) -> Vec<SectionKind> {
    let stray: Vec<SectionKind> = inspection
        .sections
        .keys()
        .copied()
        .filter(|k| k.is_assessment() && !tabs.contains(*k))
        .collect();
    if !stray.is_empty() {
        tracing::warn!(
            inspection_id = %inspection.id,
            sections = ?stray,
            "ignoring section rows outside the applicable set"
        );
    }
    stray
}

fn is_filled(fields: Option<&FieldSet>, id: &str, kind: Option<insp_core::ValueKind>) -> bool {
    match (fields.and_then(|f| f.get(id)), kind) {
        (Some(value), Some(kind)) => value.coerce_to(kind).is_some(),
        (Some(_), None) => true,
        (None, _) => false,
    }
}
