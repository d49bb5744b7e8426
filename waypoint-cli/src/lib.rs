//! Command-line interface for the Waypoint recommendation engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod recommend;
mod vibes;

pub use error::CliError;
use recommend::{RecommendArgs, run_recommend};
use vibes::{VibesArgs, run_vibes};

pub(crate) const ARG_RECOMMEND_REQUEST: &str = "request";
pub(crate) const ARG_PREFERENCES: &str = "preferences";
pub(crate) const ARG_MAX_RESULTS: &str = "max-results";
pub(crate) const ARG_DIVERSITY_WEIGHT: &str = "diversity-weight";
pub(crate) const ARG_MODE: &str = "mode";
pub(crate) const ARG_NOW: &str = "now";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ENV_RECOMMEND_REQUEST: &str = "WAYPOINT_CMDS_RECOMMEND_REQUEST_PATH";

/// Run the Waypoint CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] describing the first failure.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Vibes(args) => run_vibes(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waypoint",
    about = "Recommend amenities for travellers passing through a venue",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank candidate amenities for a journey.
    Recommend(RecommendArgs),
    /// List the vibes a traveller can choose from.
    Vibes(VibesArgs),
}

#[cfg(test)]
mod tests;
