//! # Inspection Aggregate
//!
//! An [`Inspection`] is one dated compliance record. It owns its own
//! top-level fields (`general` and `results`) and at most one field set per
//! assessment section. The sections map is keyed by [`SectionKind`]; a
//! missing key means "not yet created", never "not applicable".
//! Applicability is resolved from the unit configuration, separately.
//!
//! `status` and `complete_date` are both stored. Only the lifecycle state
//! machine writes them, and always together.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InspError, ValidationError};
use crate::field::FieldSet;
use crate::identity::{InspectionId, UnitId};
use crate::section::SectionKind;
use crate::temporal::Timestamp;
use crate::unit::UnitConfiguration;

/// General-section fields stripped by [`Inspection::public_view`].
const SIGNATURE_FIELDS: &[&str] = &["inspector_signature", "signed_at"];

/// Lifecycle status of an inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    /// Editable; sections may be created and written.
    Draft,
    /// Read-only until reopened.
    Complete,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InspectionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "complete" => Ok(Self::Complete),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// One compliance inspection of a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub id: InspectionId,
    /// The inspected unit; `None` while pending assignment.
    #[serde(default)]
    pub unit_id: Option<UnitId>,
    pub status: InspectionStatus,
    /// Set only by the draft → complete transition.
    #[serde(default)]
    pub complete_date: Option<Timestamp>,
    /// The inspection's own fields: date, location, footprint, signature.
    #[serde(default)]
    pub general: FieldSet,
    /// Overall verdict and narrative.
    #[serde(default)]
    pub results: FieldSet,
    /// Assessment section instances created so far.
    #[serde(default)]
    pub sections: BTreeMap<SectionKind, FieldSet>,
}

impl Inspection {
    /// A fresh draft inspection with no fields and no section instances.
    pub fn new_draft(unit_id: Option<UnitId>) -> Self {
        Self {
            id: InspectionId::new(),
            unit_id,
            status: InspectionStatus::Draft,
            complete_date: None,
            general: FieldSet::new(),
            results: FieldSet::new(),
            sections: BTreeMap::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == InspectionStatus::Complete
    }

    /// The field set backing `kind`, if it exists.
    ///
    /// `General` and `Results` always exist. Assessment sections exist once
    /// created. Pseudo-section keys stored in `sections` are never read.
    pub fn fields(&self, kind: SectionKind) -> Option<&FieldSet> {
        match kind {
            SectionKind::General => Some(&self.general),
            SectionKind::Results => Some(&self.results),
            _ => self.sections.get(&kind),
        }
    }

    /// Mutable field set for `kind`, creating the section instance lazily.
    pub fn fields_mut(&mut self, kind: SectionKind) -> &mut FieldSet {
        match kind {
            SectionKind::General => &mut self.general,
            SectionKind::Results => &mut self.results,
            _ => self.sections.entry(kind).or_default(),
        }
    }

    /// Whether an instance exists for an assessment section.
    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }

    /// JSON view safe to publish: identifiers, timestamps, and signature
    /// metadata removed.
    pub fn public_view(&self) -> Result<serde_json::Value, InspError> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("id");
            obj.remove("unit_id");
            obj.remove("complete_date");
            if let Some(general) = obj.get_mut("general").and_then(|g| g.as_object_mut()) {
                for map in ["values", "comments"] {
                    if let Some(m) = general.get_mut(map).and_then(|m| m.as_object_mut()) {
                        for field in SIGNATURE_FIELDS {
                            m.remove(*field);
                        }
                    }
                }
            }
        }
        Ok(value)
    }
}

/// An inspection together with the configuration of its unit, as handed to
/// the engine by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionSnapshot {
    pub configuration: UnitConfiguration,
    pub inspection: Inspection,
}

impl InspectionSnapshot {
    pub fn new(configuration: UnitConfiguration, inspection: Inspection) -> Self {
        Self {
            configuration,
            inspection,
        }
    }
}
