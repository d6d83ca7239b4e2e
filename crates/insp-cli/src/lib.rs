//! # insp-cli — Inspection Engine CLI
//!
//! Drives the engine over JSON files so a persistence layer (or a person)
//! can run it without linking the library.
//!
//! ```bash
//! insp tabs --unit-type combo --has-slide
//! insp evaluate snapshot.json
//! insp transition snapshot.json --to complete --in-place
//! insp prefill history.json --unit unit.json
//! insp --policy policy.yaml policy
//! ```
//!
//! Results go to stdout as pretty JSON; logs go to stderr.
//!
//! Exit codes: `0` ok, `1` rejected or incomplete, `2` fatal (integrity
//! fault, unknown unit configuration, unreadable input).

pub mod evaluate;
pub mod policy;
pub mod prefill;
pub mod tabs;
pub mod transition;

use std::path::Path;

use anyhow::{Context, Result};
use insp_compliance::CompliancePolicy;
use insp_engine::{EngineError, InspectionEngine};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const EXIT_OK: u8 = 0;
pub const EXIT_REJECTED: u8 = 1;
pub const EXIT_FATAL: u8 = 2;

/// Build the engine from an optional policy file, defaults otherwise.
pub fn load_engine(policy: Option<&Path>) -> Result<InspectionEngine> {
    let policy = match policy {
        Some(path) => CompliancePolicy::from_file(path)
            .with_context(|| format!("failed to load policy {}", path.display()))?,
        None => CompliancePolicy::default(),
    };
    Ok(InspectionEngine::new(policy))
}

/// Read and parse a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Write `value` to `path` as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text + "\n").with_context(|| format!("failed to write {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an engine error as JSON and map it to an exit code.
pub fn report_engine_error(err: &EngineError) -> Result<u8> {
    let fatal = err.is_fatal();
    if fatal {
        tracing::error!(error = %err, "fatal engine error");
    } else {
        tracing::warn!(error = %err, "request refused");
    }
    print_json(&serde_json::json!({
        "error": err.to_string(),
        "fatal": fatal,
    }))?;
    Ok(if fatal { EXIT_FATAL } else { EXIT_REJECTED })
}
