//! # insp-core — Foundational Types for Inspections
//!
//! The leaf crate of the inspection workspace. It defines the vocabulary every
//! other crate speaks: what a unit is, which checklist sections exist, how a
//! field value is represented, and what an inspection aggregate looks like.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `UnitId` and `InspectionId` are distinct UUID
//!    newtypes; an inspection id cannot be passed where a unit id is expected.
//!
//! 2. **Single `SectionKind` enum.** One definition of the ten checklist tabs,
//!    in canonical tab order. Every `match` on it is exhaustive, so adding a
//!    section forces every consumer to handle it at compile time.
//!
//! 3. **Absence is null.** A `FieldSet` never stores a null; a missing key is
//!    the unassessed state. Section instances are likewise absent until first
//!    touched, and absence never implies inapplicability.
//!
//! 4. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `insp-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod field;
pub mod identity;
pub mod inspection;
pub mod section;
pub mod temporal;
pub mod unit;

// Re-export primary types for ergonomic imports.
pub use error::{InspError, ValidationError};
pub use field::{FieldSet, FieldValue, ValueKind};
pub use identity::{InspectionId, UnitId};
pub use inspection::{Inspection, InspectionSnapshot, InspectionStatus};
pub use section::{SectionKind, ASSESSMENT_KIND_COUNT, SECTION_KIND_COUNT};
pub use temporal::Timestamp;
pub use unit::{Unit, UnitConfiguration, UnitType};
