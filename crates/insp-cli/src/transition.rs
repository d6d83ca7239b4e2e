//! # Transition Subcommand
//!
//! Request a lifecycle transition for a snapshot file. With `--in-place`
//! an accepted transition is written back to the file; a rejected one
//! never touches it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use insp_core::{InspectionSnapshot, InspectionStatus, Timestamp};
use insp_engine::{InspectionEngine, TransitionOutcome};

use crate::{print_json, read_json, report_engine_error, write_json, EXIT_OK, EXIT_REJECTED};

/// Arguments for the `insp transition` subcommand.
#[derive(Args, Debug)]
pub struct TransitionArgs {
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Target status: `draft` or `complete`.
    #[arg(long)]
    pub to: InspectionStatus,

    /// Write the updated snapshot back to SNAPSHOT.
    #[arg(long)]
    pub in_place: bool,
}

/// Execute the transition subcommand.
///
/// Exits `1` when completion is rejected for missing fields.
pub fn run_transition(args: &TransitionArgs, engine: &InspectionEngine) -> Result<u8> {
    let mut snapshot: InspectionSnapshot = read_json(&args.snapshot)?;
    let outcome = match engine.transition_in_place(&mut snapshot, args.to, Timestamp::now()) {
        Ok(outcome) => outcome,
        Err(e) => return report_engine_error(&e),
    };

    if args.in_place && outcome.is_applied() {
        write_json(&args.snapshot, &snapshot)?;
        tracing::info!(path = %args.snapshot.display(), "snapshot updated");
    }

    print_json(&serde_json::json!({
        "result": outcome,
        "status": snapshot.inspection.status,
        "complete_date": snapshot.inspection.complete_date,
    }))?;

    Ok(match outcome {
        TransitionOutcome::Rejected { .. } => EXIT_REJECTED,
        _ => EXIT_OK,
    })
}
