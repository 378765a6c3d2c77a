//! Command-line interface for planning evacuations from JSON requests.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request-path";
const ARG_PLAN_OUTPUT: &str = "output";
const ARG_PLAN_AVERAGE_SPEED: &str = "average-speed-kmh";
const ARG_PLAN_MAX_ZONES: &str = "max-zones";
const ENV_PLAN_REQUEST: &str = "EVACROUTE_CMDS_PLAN_REQUEST_PATH";

/// Run the evacroute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// request cannot be read or fails validation, or the plan cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "evacroute",
    about = "Plan evacuation pickups and routes for a single vehicle",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan an evacuation from a JSON request file.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
