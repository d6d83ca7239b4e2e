//! # insp-compliance — Compliance Calculator
//!
//! Pure formulas over raw measurements, consumed for display and warnings
//! only. A computed non-compliance never blocks the lifecycle: the
//! inspector's explicit verdict stands.
//!
//! - **Calculator** (`calculator.rs`): stateless functions of primitive
//!   numeric inputs. No I/O.
//! - **Policy** (`policy.rs`): the standard's lookup tables (anchor count by
//!   footprint, floor area per user by height band) as data, loadable from
//!   YAML or JSON and validated on load.
//! - **Summary** (`summary.rs`): applies the calculator to an inspection's
//!   recorded measurements and collects the resulting warnings.

pub mod calculator;
pub mod error;
pub mod policy;
pub mod summary;

pub use calculator::{
    effective_play_area, meets_anchor_requirements, meets_runout_requirements,
    meets_wall_height, required_anchors, required_runout, required_wall_height, total_anchors,
    user_capacity, user_capacity_at_band, BandCapacity, MIN_RUNOUT_M, RUNOUT_RATIO,
};
pub use error::PolicyError;
pub use policy::{AnchorBand, AnchorPolicy, CapacityPolicy, CompliancePolicy, HeightBand};
pub use summary::{AnchorCheck, CapacityCheck, ComplianceSummary, RunoutCheck, WallHeightCheck};
