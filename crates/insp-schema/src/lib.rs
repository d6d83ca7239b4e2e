//! # insp-schema — Checklist Shape and Completeness
//!
//! - **Schema** (`schema.rs`): one static field table per [`SectionKind`],
//!   classifying every field as measurement, pass-flag, optional, or derived.
//!
//! - **Resolver** (`resolver.rs`): maps a unit configuration to the ordered
//!   list of applicable tabs. The single source of truth for applicability.
//!
//! - **Completion** (`completion.rs`): walks an inspection over its resolved
//!   tabs and reports the required fields that are still null.
//!
//! All three are pure. The tables are `static` data and are never mutated.
//!
//! [`SectionKind`]: insp_core::SectionKind

pub mod completion;
pub mod resolver;
pub mod schema;

pub use completion::{inapplicable_sections, incomplete_fields, IncompleteReport};
pub use resolver::{resolve_tabs, ResolvedTabs};
pub use schema::{schema_for, FieldShape, FieldSpec, SectionSchema};
