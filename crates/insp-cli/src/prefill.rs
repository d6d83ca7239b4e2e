//! # Prefill Subcommand
//!
//! Produce draft values for a unit from an exported history file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use insp_core::{Inspection, Unit};
use insp_engine::{InspectionEngine, MemoryRepository};
use serde::Deserialize;

use crate::{print_json, read_json, report_engine_error, EXIT_OK};

/// Arguments for the `insp prefill` subcommand.
#[derive(Args, Debug)]
pub struct PrefillArgs {
    /// History JSON: `{ "inspections": [...] }`.
    #[arg(value_name = "HISTORY")]
    pub history: PathBuf,

    /// Unit JSON the new draft is for.
    #[arg(long)]
    pub unit: PathBuf,

    /// Emit a complete draft inspection instead of flat field maps.
    #[arg(long)]
    pub as_inspection: bool,
}

/// Exported records the repository is rebuilt from.
#[derive(Debug, Deserialize)]
pub struct HistoryFile {
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub inspections: Vec<Inspection>,
}

/// Execute the prefill subcommand. No prior inspection is not an error.
pub fn run_prefill(args: &PrefillArgs, engine: &InspectionEngine) -> Result<u8> {
    let unit: Unit = read_json(&args.unit)?;
    let history: HistoryFile = read_json(&args.history)?;
    let repo = MemoryRepository::from_records(history.units, history.inspections);

    let draft = match engine.prefill(&unit, &repo) {
        Ok(draft) => draft,
        Err(e) => return report_engine_error(&e),
    };

    if args.as_inspection {
        match engine.prefilled_inspection(&unit, &draft) {
            Ok(inspection) => print_json(&inspection)?,
            Err(e) => return report_engine_error(&e),
        }
    } else {
        print_json(&serde_json::json!({
            "source": draft.source,
            "values": draft.flatten(),
            "comments": draft.flatten_comments(),
        }))?;
    }
    Ok(EXIT_OK)
}
