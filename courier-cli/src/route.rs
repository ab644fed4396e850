//! Route command implementation for the courier CLI.

use std::io::Write;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use courier_core::{RoutingEngine, RoutingInput, RoutingResult};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ROUTE_MAX_STOPS, ARG_ROUTE_OUTPUT, ARG_ROUTE_REQUEST, ARG_ROUTE_TIME_LIMIT,
    ARG_ROUTE_VEHICLE_CAPACITY, ARG_ROUTE_VEHICLE_COUNT, CliError, ENV_ROUTE_REQUEST,
};

/// Largest batch accepted from a single upload.
pub(crate) const DEFAULT_MAX_STOPS: usize = 500;

/// Search budget handed to the constrained router.
pub(crate) const DEFAULT_TIME_LIMIT_SECS: u64 = 5;

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Route a delivery batch. The request is a JSON-encoded \
                 RoutingInput holding the depot, stops, fleet size and \
                 capacity plus optional HH:MM time windows. The result is \
                 printed as JSON unless --output names a file.",
    about = "Route a delivery batch across the fleet"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct RouteArgs {
    /// Path to a JSON file containing a RoutingInput.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Override the number of vehicles in the request.
    #[arg(long = ARG_ROUTE_VEHICLE_COUNT, value_name = "count")]
    #[serde(default)]
    pub(crate) vehicle_count: Option<i64>,
    /// Override the capacity of each vehicle in the request.
    #[arg(long = ARG_ROUTE_VEHICLE_CAPACITY, value_name = "units")]
    #[serde(default)]
    pub(crate) vehicle_capacity: Option<i64>,
    /// Reject requests with more stops than this (default 500).
    #[arg(long = ARG_ROUTE_MAX_STOPS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_stops: Option<usize>,
    /// Constrained search budget in seconds (default 5).
    #[arg(long = ARG_ROUTE_TIME_LIMIT, value_name = "secs")]
    #[serde(default)]
    pub(crate) time_limit_secs: Option<u64>,
    /// Write the result here instead of standard output.
    #[arg(long = ARG_ROUTE_OUTPUT, short = 'o', value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Fleet size override.
    pub(crate) vehicle_count: Option<i64>,
    /// Vehicle capacity override.
    pub(crate) vehicle_capacity: Option<i64>,
    /// Batch size limit.
    pub(crate) max_stops: usize,
    /// Constrained search budget.
    pub(crate) time_limit: Duration,
    /// Output file; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RouteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match courier_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_ROUTE_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_ROUTE_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_ROUTE_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }

    /// Apply fleet overrides and the batch limit to a decoded request.
    pub(crate) fn prepare(&self, mut input: RoutingInput) -> Result<RoutingInput, CliError> {
        if input.stops.len() > self.max_stops {
            return Err(CliError::TooManyStops {
                count: input.stops.len(),
                max: self.max_stops,
            });
        }
        if let Some(count) = self.vehicle_count {
            input.vehicle_count = count;
        }
        if let Some(capacity) = self.vehicle_capacity {
            input.vehicle_capacity = capacity;
        }
        Ok(input)
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_REQUEST,
            env: ENV_ROUTE_REQUEST,
        })?;
        Ok(Self {
            request_path,
            vehicle_count: args.vehicle_count,
            vehicle_capacity: args.vehicle_capacity,
            max_stops: args.max_stops.unwrap_or(DEFAULT_MAX_STOPS),
            time_limit: Duration::from_secs(
                args.time_limit_secs.unwrap_or(DEFAULT_TIME_LIMIT_SECS),
            ),
            output: args.output,
        })
    }
}

/// Builds the routing engine for the current invocation.
pub(crate) trait RouteEngineBuilder {
    fn build(&self, config: &RouteConfig) -> RoutingEngine;
}

pub(crate) struct DefaultRouteEngineBuilder;

impl RouteEngineBuilder for DefaultRouteEngineBuilder {
    #[cfg(feature = "solver-vrp")]
    fn build(&self, config: &RouteConfig) -> RoutingEngine {
        use courier_solver_vrp::{VrpRouter, VrpRouterConfig};

        let router = VrpRouter::with_config(VrpRouterConfig {
            time_limit: config.time_limit,
            ..VrpRouterConfig::default()
        });
        RoutingEngine::new(Some(Box::new(router)))
    }

    #[cfg(not(feature = "solver-vrp"))]
    fn build(&self, _config: &RouteConfig) -> RoutingEngine {
        RoutingEngine::greedy_only()
    }
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &DefaultRouteEngineBuilder, &mut stdout)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteEngineBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let result = execute_route(&config, builder)?;
    match &config.output {
        Some(path) => {
            let mut file = courier_fs::create_file(path).map_err(|source| {
                CliError::CreateOutput {
                    path: path.clone(),
                    source,
                }
            })?;
            write_result(&mut file, &result)
        }
        None => write_result(writer, &result),
    }
}

pub(crate) fn execute_route(
    config: &RouteConfig,
    builder: &dyn RouteEngineBuilder,
) -> Result<RoutingResult, CliError> {
    let input = config.prepare(load_routing_input(&config.request_path)?)?;
    let engine = builder.build(config);
    Ok(engine.route(&input.into_request()))
}

/// Loads a JSON-encoded [`RoutingInput`] from disk.
pub(crate) fn load_routing_input(path: &Utf8Path) -> Result<RoutingInput, CliError> {
    let payload = courier_fs::read_to_string(path).map_err(|source| CliError::ReadRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&payload).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_result(writer: &mut dyn Write, result: &RoutingResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(result).map_err(CliError::SerialiseResult)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteResult)?;
    writer.write_all(b"\n").map_err(CliError::WriteResult)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
