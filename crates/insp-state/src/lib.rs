//! # insp-state — Inspection Lifecycle
//!
//! ```text
//!            complete (guard: zero incomplete fields; sets complete_date)
//!   Draft ─────────────────────────────────────────────▶ Complete
//!     ▲                                                     │
//!     └─────────────────────────────────────────────────────┘
//!            reopen (always allowed; clears complete_date)
//! ```
//!
//! - **Lifecycle** (`lifecycle.rs`): plans a transition against a snapshot
//!   without touching it, then applies an accepted plan. A rejected plan
//!   carries the incomplete-field report and has no side effect.
//!
//! - **Integrity** (`integrity.rs`): classifies snapshots whose stored state
//!   could only have come from bypassing the guard. Such a snapshot is a
//!   fatal fault and is never repaired here.

pub mod error;
pub mod integrity;
pub mod lifecycle;

pub use error::{IntegrityViolation, LifecycleError};
pub use integrity::check_integrity;
pub use lifecycle::{apply, ensure_deletable, ensure_writable, plan_transition, TransitionOutcome};
