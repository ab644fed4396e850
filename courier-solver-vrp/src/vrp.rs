//! `vrp-core` modelling helpers for `VrpRouter`.
//!
//! This module converts a routing request and its distance matrix into a
//! capacitated, time-windowed `vrp-core` problem, runs the solver, and
//! translates the resulting tours back into stop indices.
//!
//! Matrix index `0` is the depot and index `i + 1` is `request.stops[i]`.
//! Arc costs are thousandths of a mile; durations are whole minutes at the
//! assumed average speed, so time windows are expressed in minutes too.

use std::sync::Arc;

use courier_core::{DistanceMatrix, RouteError, RoutingRequest, transit_minutes};
use vrp_core::construction::features::{CapacityFeatureBuilder, MinimizeUnassignedBuilder};
use vrp_core::models::common::{Demand, Location, Profile, SingleDimLoad, TimeWindow};
use vrp_core::models::problem::TravelTime;
use vrp_core::models::solution::Route as VrpRoute;
use vrp_core::prelude::*;

use crate::router::VrpRouterConfig;

fn define_goal(transport: Arc<dyn TransportCost>) -> GenericResult<GoalContext> {
    let minimize_unassigned = MinimizeUnassignedBuilder::new("min-unassigned").build()?;

    let capacity_feature = CapacityFeatureBuilder::<SingleDimLoad>::new("capacity").build()?;

    let transport_feature = TransportFeatureBuilder::new("min-distance")
        .set_transport_cost(transport)
        .set_time_constrained(true)
        .build_minimize_distance()?;

    GoalContextBuilder::with_features(&[
        minimize_unassigned,
        capacity_feature,
        transport_feature,
    ])?
    .build()
}

struct ProblemParts<'a> {
    request: &'a RoutingRequest,
    transport: Arc<dyn TransportCost>,
    goal: GoalContext,
}

fn define_problem(parts: ProblemParts<'_>) -> GenericResult<Problem> {
    let ProblemParts {
        request,
        transport,
        goal,
    } = parts;

    let jobs = request
        .stops
        .iter()
        .enumerate()
        .map(|(idx, stop)| {
            let window = stop.window();
            let demand = i32::try_from(stop.demand).unwrap_or(i32::MAX);
            SingleBuilder::default()
                .id(format!("stop{idx}").as_str())
                .demand(Demand::delivery(demand))
                .times(vec![TimeWindow::new(
                    f64::from(window.start),
                    f64::from(window.end),
                )])?
                .location(idx + 1)?
                .build_as_job()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let depot_window = request.depot.window();
    let capacity = i32::try_from(request.fleet.capacity()).unwrap_or(i32::MAX);
    let vehicles = (0..request.fleet.vehicle_count())
        .map(|idx| {
            VehicleBuilder::default()
                .id(format!("vehicle{idx}").as_str())
                .add_detail(
                    VehicleDetailBuilder::default()
                        .set_start_location(0)
                        .set_start_time(f64::from(depot_window.start))
                        .set_end_location(0)
                        .set_end_time(f64::from(depot_window.end))
                        .build()?,
                )
                .capacity(SingleDimLoad::new(capacity))
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;

    ProblemBuilder::default()
        .add_jobs(jobs.into_iter())
        .add_vehicles(vehicles.into_iter())
        .with_goal(goal)
        .with_transport_cost(transport)
        .build()
}

/// Arc costs and durations read from the shared distance matrix.
struct MatrixTransportCost {
    distances: Vec<Vec<f64>>,
    durations: Vec<Vec<f64>>,
}

impl MatrixTransportCost {
    #[expect(
        clippy::cast_precision_loss,
        reason = "scaled distances are far below 2^52 thousandths of a mile"
    )]
    fn new(matrix: &DistanceMatrix) -> Self {
        let n = matrix.len();
        let distances = (0..n)
            .map(|from| (0..n).map(|to| matrix.milli_miles(from, to) as f64).collect())
            .collect();
        let durations = (0..n)
            .map(|from| {
                (0..n)
                    .map(|to| f64::from(transit_minutes(matrix.milli_miles(from, to))))
                    .collect()
            })
            .collect();
        Self {
            distances,
            durations,
        }
    }

    fn lookup(table: &[Vec<f64>], from: Location, to: Location) -> f64 {
        let result = table.get(from).and_then(|row| row.get(to)).copied();
        debug_assert!(
            result.is_some(),
            "Matrix lookup failed: from={from}, to={to}"
        );
        result.unwrap_or(0.0)
    }
}

impl TransportCost for MatrixTransportCost {
    // The trait signature carries `route` and `departure` for time-dependent
    // costs; this matrix is static so both are ignored.
    fn distance(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> Cost {
        Self::lookup(&self.distances, from, to)
    }

    fn duration(
        &self,
        _route: &VrpRoute,
        from: Location,
        to: Location,
        _departure: TravelTime,
    ) -> f64 {
        Self::lookup(&self.durations, from, to)
    }

    fn distance_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        Self::lookup(&self.distances, from, to)
    }

    fn duration_approx(&self, _profile: &Profile, from: usize, to: usize) -> f64 {
        Self::lookup(&self.durations, from, to)
    }
}

/// Context for running a bounded `vrp-core` search.
pub(super) struct VrpSolveContext<'a> {
    config: &'a VrpRouterConfig,
}

impl<'a> VrpSolveContext<'a> {
    /// Create a new solve context.
    pub(super) const fn new(config: &'a VrpRouterConfig) -> Self {
        Self { config }
    }

    /// Solve `request`, returning stop indices per used vehicle.
    ///
    /// Any job left unassigned makes the whole solve infeasible.
    pub(super) fn solve(
        &self,
        request: &RoutingRequest,
        matrix: &DistanceMatrix,
    ) -> Result<Vec<Vec<usize>>, RouteError> {
        let transport = Arc::new(MatrixTransportCost::new(matrix));
        let goal = define_goal(transport.clone()).map_err(model_error)?;
        let problem = Arc::new(
            define_problem(ProblemParts {
                request,
                transport,
                goal,
            })
            .map_err(model_error)?,
        );

        let max_time =
            usize::try_from(self.config.time_limit.as_secs().max(1)).unwrap_or(usize::MAX);
        let vrp_config = VrpConfigBuilder::new(problem.clone())
            .prebuild()
            .map_err(model_error)?
            .with_max_time(Some(max_time))
            .with_max_generations(Some(self.config.max_generations))
            .build()
            .map_err(model_error)?;

        let solution = vrp_core::solver::Solver::new(problem, vrp_config)
            .solve()
            .map_err(model_error)?;

        if !solution.unassigned.is_empty() {
            return Err(RouteError::Infeasible {
                unassigned: solution.unassigned.len(),
            });
        }

        let routes = solution
            .get_locations()
            .map(|tour| {
                tour.filter_map(|location| location.checked_sub(1))
                    .filter(|stop| *stop < request.stops.len())
                    .collect::<Vec<_>>()
            })
            .collect();
        Ok(routes)
    }
}

fn model_error(err: impl std::fmt::Display) -> RouteError {
    RouteError::Model(err.to_string())
}
