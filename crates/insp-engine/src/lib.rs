//! # insp-engine — Inspection Completion & Compliance Engine
//!
//! The caller-facing surface. Each interaction is synchronous and
//! request-scoped: a snapshot goes in, a plain structured result comes out,
//! and the caller persists it.
//!
//! | Operation | Returns |
//! |-----------|---------|
//! | [`InspectionEngine::resolve_tabs`] | ordered applicable sections |
//! | [`InspectionEngine::evaluate`] | incomplete report, eligibility, compliance |
//! | [`InspectionEngine::transition`] | applied or rejected outcome |
//! | [`InspectionEngine::apply_update`] | patch-merges one section's writes |
//! | [`InspectionEngine::prefill`] | draft values from the last completed inspection |
//!
//! Storage is a collaborator. [`InspectionHistory`] is the only capability
//! the engine needs from it; [`MemoryRepository`] is an in-process
//! implementation with the referential guards a real store enforces.

pub mod engine;
pub mod error;
pub mod prefill;
pub mod repository;
pub mod update;

pub use engine::{Evaluation, InspectionEngine};
pub use error::EngineError;
pub use prefill::{PrefillDraft, NON_CARRIED_FIELDS};
pub use repository::{InspectionHistory, MemoryRepository};
pub use update::SectionUpdate;

pub use insp_state::TransitionOutcome;
