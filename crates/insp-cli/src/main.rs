//! # insp CLI entry point
//!
//! Parses command-line arguments, sets up logging, builds the engine from
//! the effective policy, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use insp_cli::evaluate::{run_evaluate, EvaluateArgs};
use insp_cli::policy::run_policy;
use insp_cli::prefill::{run_prefill, PrefillArgs};
use insp_cli::tabs::{run_tabs, TabsArgs};
use insp_cli::transition::{run_transition, TransitionArgs};
use insp_cli::{load_engine, EXIT_FATAL};

/// Inspection completion and compliance engine.
#[derive(Parser, Debug)]
#[command(name = "insp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Compliance policy file (YAML or JSON). Built-in tables otherwise.
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the applicable checklist tabs for a unit configuration.
    Tabs(TabsArgs),

    /// Report incomplete fields and compliance for a snapshot.
    Evaluate(EvaluateArgs),

    /// Complete or reopen a snapshot.
    Transition(TransitionArgs),

    /// Draft values from a unit's last completed inspection.
    Prefill(PrefillArgs),

    /// Print the effective compliance policy as YAML.
    Policy,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!("insp CLI starting");

    let engine = match load_engine(cli.policy.as_deref()) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let result = match cli.command {
        Commands::Tabs(args) => run_tabs(&args, &engine),
        Commands::Evaluate(args) => run_evaluate(&args, &engine),
        Commands::Transition(args) => run_transition(&args, &engine),
        Commands::Prefill(args) => run_prefill(&args, &engine),
        Commands::Policy => run_policy(&engine),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// `RUST_LOG` wins over `-v` when set. Logs go to stderr; stdout carries
/// results.
fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
