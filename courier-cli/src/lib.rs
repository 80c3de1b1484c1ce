//! Command-line interface for planning courier delivery runs.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request-path";
const ARG_PLAN_ENVIRONMENT: &str = "environment";
const ARG_PLAN_SOLVER: &str = "solver";
const ARG_PLAN_HEURISTIC: &str = "heuristic";
const ARG_PLAN_DEDUPLICATION: &str = "deduplication";
const ARG_PLAN_MAX_EXPANSIONS: &str = "max-expansions";
const ARG_PLAN_SPEED: &str = "speed-kmh";
const ENV_PLAN_REQUEST: &str = "COURIER_CMDS_PLAN_REQUEST_PATH";

/// Run the courier CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Fastest-route planning for two-order courier runs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan routes for delivery requests read from JSON.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
