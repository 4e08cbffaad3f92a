//! Command-line interface for the Paseo walking-route planner.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::PlanArgs;

pub(crate) const ARG_PLAN_REQUEST: &str = "request";
pub(crate) const ARG_PLAN_PLACES: &str = "places";
pub(crate) const ARG_PLAN_DIRECTIONS_BASE_URL: &str = "directions-base-url";
pub(crate) const ARG_PLAN_API_KEY: &str = "api-key";
pub(crate) const ARG_PLAN_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_PLAN_ORDERING: &str = "ordering";
pub(crate) const ENV_PLAN_REQUEST: &str = "PASEO_CMDS_PLAN_REQUEST_PATH";
pub(crate) const ENV_PLAN_PLACES: &str = "PASEO_CMDS_PLAN_PLACES";

/// Run the Paseo CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] describing the first failure.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "paseo",
    about = "Plan walking routes through points of interest",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a walking route from a JSON request and a place catalog.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
