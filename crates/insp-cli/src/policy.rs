//! # Policy Subcommand
//!
//! Print the effective compliance policy as YAML. With no `--policy` file
//! this is the built-in table, and a convenient starting point for a custom
//! one.

use anyhow::{Context, Result};
use insp_engine::InspectionEngine;

use crate::EXIT_OK;

/// Execute the policy subcommand.
pub fn run_policy(engine: &InspectionEngine) -> Result<u8> {
    let yaml = serde_yaml::to_string(engine.policy()).context("failed to render policy")?;
    print!("{yaml}");
    Ok(EXIT_OK)
}
