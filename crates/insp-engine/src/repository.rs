//! # Repository Collaborator
//!
//! [`InspectionHistory`] is the one storage capability the engine needs.
//! [`MemoryRepository`] is a thread-safe, cloneable in-process store that
//! also enforces the referential guards a durable store would: a unit with
//! inspections cannot be deleted, and neither can a completed inspection.
//!
//! Locks are `parking_lot` and never held across calls back into the
//! caller. When both maps are locked, `units` is taken before
//! `inspections`.

use std::collections::BTreeMap;
use std::sync::Arc;

use insp_core::{Inspection, InspectionId, Unit, UnitId};
use insp_state::ensure_deletable;
use parking_lot::RwLock;

use crate::error::EngineError;

/// Lookup of prior inspections for prefill.
pub trait InspectionHistory: Send + Sync {
    /// The completed inspection of `unit_id` with the latest
    /// `complete_date`, if any.
    fn latest_completed_for_unit(&self, unit_id: &UnitId) -> Option<Inspection>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    units: Arc<RwLock<BTreeMap<UnitId, Unit>>>,
    inspections: Arc<RwLock<BTreeMap<InspectionId, Inspection>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from exported records.
    pub fn from_records(
        units: impl IntoIterator<Item = Unit>,
        inspections: impl IntoIterator<Item = Inspection>,
    ) -> Self {
        let repo = Self::new();
        for unit in units {
            repo.insert_unit(unit);
        }
        for inspection in inspections {
            repo.insert_inspection(inspection);
        }
        repo
    }

    /// Insert or replace a unit.
    pub fn insert_unit(&self, unit: Unit) -> Option<Unit> {
        self.units.write().insert(unit.id, unit)
    }

    pub fn unit(&self, id: &UnitId) -> Option<Unit> {
        self.units.read().get(id).cloned()
    }

    /// Insert or replace an inspection record as stored.
    pub fn insert_inspection(&self, inspection: Inspection) -> Option<Inspection> {
        self.inspections.write().insert(inspection.id, inspection)
    }

    pub fn inspection(&self, id: &InspectionId) -> Option<Inspection> {
        self.inspections.read().get(id).cloned()
    }

    /// Every inspection referencing `unit_id`, in id order.
    pub fn inspections_for_unit(&self, unit_id: &UnitId) -> Vec<Inspection> {
        self.inspections
            .read()
            .values()
            .filter(|i| i.unit_id.as_ref() == Some(unit_id))
            .cloned()
            .collect()
    }

    /// Read-validate-update one inspection under a single write lock.
    ///
    /// `f` works on a copy; the stored record is replaced only when it
    /// returns `Ok`, so a failed update leaves no partial write behind.
    pub fn try_update_inspection<R>(
        &self,
        id: &InspectionId,
        f: impl FnOnce(&mut Inspection) -> Result<R, EngineError>,
    ) -> Result<R, EngineError> {
        let mut guard = self.inspections.write();
        let stored = guard.get_mut(id).ok_or_else(|| EngineError::NotFound {
            entity: "inspection",
            id: id.to_string(),
        })?;
        let mut working = stored.clone();
        let result = f(&mut working)?;
        *stored = working;
        Ok(result)
    }

    /// Delete a unit that no inspection references.
    pub fn delete_unit(&self, id: &UnitId) -> Result<Unit, EngineError> {
        let mut units = self.units.write();
        if !units.contains_key(id) {
            return Err(EngineError::NotFound {
                entity: "unit",
                id: id.to_string(),
            });
        }
        // Held until the removal so no referencing inspection can land
        // between the count and the delete.
        let inspections = self.inspections.read();
        let referencing = inspections
            .values()
            .filter(|i| i.unit_id.as_ref() == Some(id))
            .count();
        if referencing > 0 {
            return Err(EngineError::UnitInUse {
                unit_id: *id,
                inspections: referencing,
            });
        }
        units.remove(id).ok_or_else(|| EngineError::NotFound {
            entity: "unit",
            id: id.to_string(),
        })
    }

    /// Delete a draft inspection.
    pub fn delete_inspection(&self, id: &InspectionId) -> Result<Inspection, EngineError> {
        let mut inspections = self.inspections.write();
        let inspection = inspections.get(id).ok_or_else(|| EngineError::NotFound {
            entity: "inspection",
            id: id.to_string(),
        })?;
        ensure_deletable(inspection)?;
        inspections.remove(id).ok_or_else(|| EngineError::NotFound {
            entity: "inspection",
            id: id.to_string(),
        })
    }

    pub fn units(&self) -> Vec<Unit> {
        self.units.read().values().cloned().collect()
    }

    pub fn inspections(&self) -> Vec<Inspection> {
        self.inspections.read().values().cloned().collect()
    }
}

impl InspectionHistory for MemoryRepository {
    fn latest_completed_for_unit(&self, unit_id: &UnitId) -> Option<Inspection> {
        self.inspections
            .read()
            .values()
            .filter(|i| i.unit_id.as_ref() == Some(unit_id) && i.is_complete())
            .filter(|i| i.complete_date.is_some())
            .max_by_key(|i| i.complete_date)
            .cloned()
    }
}
