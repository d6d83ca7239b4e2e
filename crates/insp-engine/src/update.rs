//! # Section Write Merge
//!
//! Patch semantics over one section: keys present in the payload overwrite,
//! keys absent are untouched, and an explicit `null` clears. Two writers on
//! different sections of the same inspection therefore never clobber each
//! other. The whole payload is validated before any field is applied.

use std::collections::BTreeMap;

use insp_compliance::total_anchors;
use insp_core::{FieldSet, FieldValue, Inspection, SectionKind};
use insp_schema::{schema_for, FieldSpec, ResolvedTabs, SectionSchema};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One write payload against one section (or `general` / `results`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionUpdate {
    pub section: SectionKind,
    /// `None` clears the field.
    #[serde(default)]
    pub values: BTreeMap<String, Option<FieldValue>>,
    /// `None` removes the comment.
    #[serde(default)]
    pub comments: BTreeMap<String, Option<String>>,
}

impl SectionUpdate {
    pub fn new(section: SectionKind) -> Self {
        Self {
            section,
            values: BTreeMap::new(),
            comments: BTreeMap::new(),
        }
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(field.into(), Some(value.into()));
        self
    }

    pub fn clear(mut self, field: impl Into<String>) -> Self {
        self.values.insert(field.into(), None);
        self
    }

    pub fn comment(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.comments.insert(field.into(), Some(text.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.comments.is_empty()
    }
}

/// Validate `update` against the schema and merge it into `inspection`.
///
/// The caller has already checked the lifecycle guard.
pub(crate) fn merge(
    inspection: &mut Inspection,
    tabs: &ResolvedTabs,
    update: &SectionUpdate,
) -> Result<(), EngineError> {
    let section = update.section;
    ensure_applicable(tabs, section)?;

    let schema = schema_for(section);
    let mut values = Vec::with_capacity(update.values.len());
    for (id, value) in &update.values {
        let spec = writable_field(schema, id)?;
        let value = match value {
            None => None,
            Some(v) => Some(coerce(spec, section, v)?),
        };
        values.push((id.as_str(), value));
    }
    for id in update.comments.keys() {
        writable_field(schema, id)?;
    }

    let fields = inspection.fields_mut(section);
    for (id, value) in values {
        match value {
            Some(v) => {
                fields.set(id, v);
            }
            None => {
                fields.clear(id);
            }
        }
    }
    for (id, comment) in &update.comments {
        match comment {
            Some(text) => fields.set_comment(id.as_str(), text.as_str()),
            None => {
                fields.clear_comment(id);
            }
        }
    }
    if section == SectionKind::Anchorage {
        recompute_total_anchors(fields);
    }

    tracing::debug!(
        inspection_id = %inspection.id,
        %section,
        values = update.values.len(),
        comments = update.comments.len(),
        "merged section update"
    );
    Ok(())
}

/// Validate every section of a prefill draft and overlay it onto
/// `inspection`. Values are coerced to their declared kinds; derived values
/// are dropped and recomputed. One bad field rejects the whole draft.
pub(crate) fn merge_sections(
    inspection: &mut Inspection,
    tabs: &ResolvedTabs,
    sections: &BTreeMap<SectionKind, FieldSet>,
) -> Result<(), EngineError> {
    let mut validated = Vec::with_capacity(sections.len());
    for (section, source) in sections {
        ensure_applicable(tabs, *section)?;
        let schema = schema_for(*section);
        let mut coerced = FieldSet::new();
        for (id, value) in &source.values {
            let spec = schema
                .field(id)
                .ok_or_else(|| EngineError::invalid_write(*section, id, "unknown field"))?;
            if !spec.is_writable() {
                continue;
            }
            coerced.set(id.as_str(), coerce(spec, *section, value)?);
        }
        for (id, comment) in &source.comments {
            writable_field(schema, id)?;
            coerced.set_comment(id.as_str(), comment.as_str());
        }
        validated.push((*section, coerced));
    }

    for (section, coerced) in validated {
        let fields = inspection.fields_mut(section);
        fields.values.extend(coerced.values);
        fields.comments.extend(coerced.comments);
        if section == SectionKind::Anchorage {
            recompute_total_anchors(fields);
        }
    }
    tracing::debug!(
        inspection_id = %inspection.id,
        sections = sections.len(),
        "merged prefill draft"
    );
    Ok(())
}

fn ensure_applicable(tabs: &ResolvedTabs, section: SectionKind) -> Result<(), EngineError> {
    if tabs.contains(section) {
        Ok(())
    } else {
        Err(EngineError::InapplicableSectionWrite {
            section,
            unit_type: tabs.unit_type(),
        })
    }
}

fn writable_field(schema: &SectionSchema, id: &str) -> Result<&'static FieldSpec, EngineError> {
    let spec = schema
        .field(id)
        .ok_or_else(|| EngineError::invalid_write(schema.kind, id, "unknown field"))?;
    if !spec.is_writable() {
        return Err(EngineError::invalid_write(schema.kind, id, "derived field"));
    }
    Ok(spec)
}

fn coerce(spec: &FieldSpec, section: SectionKind, value: &FieldValue) -> Result<FieldValue, EngineError> {
    let kind = spec
        .value_kind()
        .ok_or_else(|| EngineError::invalid_write(section, spec.id, "derived field"))?;
    value.coerce_to(kind).ok_or_else(|| {
        EngineError::invalid_write(
            section,
            spec.id,
            format!("expected {kind}, got {}", value.kind()),
        )
    })
}

/// Keep `total_anchors` equal to low + high, or absent when either is.
pub(crate) fn recompute_total_anchors(fields: &mut FieldSet) {
    let count = |id: &str| fields.integer(id).and_then(|n| u32::try_from(n).ok());
    match (count("num_low_anchors"), count("num_high_anchors")) {
        (Some(low), Some(high)) => {
            fields.set("total_anchors", i64::from(total_anchors(low, high)));
        }
        _ => {
            fields.clear("total_anchors");
        }
    }
}
