//! # Tabs Subcommand
//!
//! Resolve the applicable checklist tabs for a unit configuration given
//! on the command line.

use anyhow::Result;
use clap::Args;
use insp_core::UnitConfiguration;
use insp_engine::InspectionEngine;

use crate::{print_json, report_engine_error, EXIT_OK};

/// Arguments for the `insp tabs` subcommand.
#[derive(Args, Debug)]
pub struct TabsArgs {
    /// Unit type (bounce_house, slide, combo, obstacle_course,
    /// totally_enclosed, pat_testable).
    #[arg(long)]
    pub unit_type: String,

    #[arg(long)]
    pub has_slide: bool,

    #[arg(long)]
    pub totally_enclosed: bool,

    #[arg(long)]
    pub indoor_only: bool,
}

impl TabsArgs {
    fn configuration(&self) -> UnitConfiguration {
        UnitConfiguration {
            unit_type: self.unit_type.clone(),
            has_slide: Some(self.has_slide),
            is_totally_enclosed: Some(self.totally_enclosed),
            indoor_only: Some(self.indoor_only),
        }
    }
}

/// Execute the tabs subcommand.
pub fn run_tabs(args: &TabsArgs, engine: &InspectionEngine) -> Result<u8> {
    match engine.resolve_tabs(&args.configuration()) {
        Ok(tabs) => {
            print_json(&tabs.tabs())?;
            Ok(EXIT_OK)
        }
        Err(e) => report_engine_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXIT_FATAL;

    fn args(unit_type: &str) -> TabsArgs {
        TabsArgs {
            unit_type: unit_type.to_string(),
            has_slide: false,
            totally_enclosed: false,
            indoor_only: false,
        }
    }

    #[test]
    fn known_unit_type_resolves() {
        let engine = InspectionEngine::default();
        assert_eq!(run_tabs(&args("bounce_house"), &engine).unwrap(), EXIT_OK);
    }

    #[test]
    fn unknown_unit_type_is_fatal() {
        let engine = InspectionEngine::default();
        assert_eq!(run_tabs(&args("zorb"), &engine).unwrap(), EXIT_FATAL);
    }

    #[test]
    fn flags_map_to_configuration() {
        let mut a = args("combo");
        a.has_slide = true;
        let config = a.configuration();
        assert_eq!(config.has_slide, Some(true));
        assert_eq!(config.indoor_only, Some(false));
    }
}
