//! # Evaluate Subcommand
//!
//! Evaluate a snapshot file: applicable tabs, incomplete fields,
//! completion eligibility, and compliance warnings.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use insp_core::InspectionSnapshot;
use insp_engine::InspectionEngine;

use crate::{print_json, read_json, report_engine_error, EXIT_OK, EXIT_REJECTED};

/// Arguments for the `insp evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Snapshot JSON: `{ "configuration": ..., "inspection": ... }`.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// Execute the evaluate subcommand.
///
/// Exits `1` when the inspection is not yet complete-eligible.
pub fn run_evaluate(args: &EvaluateArgs, engine: &InspectionEngine) -> Result<u8> {
    let snapshot: InspectionSnapshot = read_json(&args.snapshot)?;
    match engine.evaluate(&snapshot) {
        Ok(evaluation) => {
            for warning in &evaluation.compliance.warnings {
                tracing::info!(%warning, "compliance warning");
            }
            print_json(&evaluation)?;
            Ok(if evaluation.complete_eligible {
                EXIT_OK
            } else {
                EXIT_REJECTED
            })
        }
        Err(e) => report_engine_error(&e),
    }
}
