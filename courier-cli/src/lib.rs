//! Command-line interface for routing delivery batches offline.
//!
//! `courier route <request.json>` reads a routing request, runs the routing
//! engine and prints the result as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod route;

pub use error::CliError;

use route::RouteArgs;

pub(crate) const ARG_ROUTE_REQUEST: &str = "request";
pub(crate) const ENV_ROUTE_REQUEST: &str = "COURIER_CMDS_ROUTE_REQUEST_PATH";
pub(crate) const ARG_ROUTE_VEHICLE_COUNT: &str = "vehicle-count";
pub(crate) const ARG_ROUTE_VEHICLE_CAPACITY: &str = "vehicle-capacity";
pub(crate) const ARG_ROUTE_MAX_STOPS: &str = "max-stops";
pub(crate) const ARG_ROUTE_TIME_LIMIT: &str = "time-limit-secs";
pub(crate) const ARG_ROUTE_OUTPUT: &str = "output";

/// Run the courier CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => route::run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Plan multi-vehicle delivery routes from a JSON request",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Route every stop in a request across the fleet.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
