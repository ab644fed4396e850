//! `VrpRouter` implementation backed by `vrp-core`.
//!
//! Every stop is a mandatory delivery job. A plan is only returned when the
//! search places every job and the replayed schedule honours capacity and
//! every time window; anything less is reported as infeasible so the caller
//! can fall back.

use std::time::{Duration, Instant};

use courier_core::{
    DistanceMatrix, Engine, RouteError, RoutePlan, Router, RoutingRequest, simulate_plan,
};

use crate::vrp::VrpSolveContext;

/// Configuration for [`VrpRouter`].
#[derive(Debug, Clone)]
pub struct VrpRouterConfig {
    /// Wall-clock budget for a single search. Rounded up to whole seconds.
    pub time_limit: Duration,
    /// Upper bound on `vrp-core` generations.
    pub max_generations: usize,
}

impl Default for VrpRouterConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(5),
            max_generations: 2000,
        }
    }
}

/// Constrained router honouring fleet size, capacity and time windows.
///
/// # Examples
/// ```no_run
/// use courier_core::{Coordinate, Depot, DistanceMatrix, Fleet, Router, RoutingRequest, Stop};
/// use courier_solver_vrp::VrpRouter;
///
/// let request = RoutingRequest::new(
///     Depot::new(Coordinate::new(51.5072, -0.1276)),
///     vec![Stop::new("A", Coordinate::new(51.51, -0.12)).with_demand(2)],
///     Fleet::new(1, 10),
/// );
/// let matrix = DistanceMatrix::from_points(&request.points());
/// let plan = VrpRouter::default().route(&request, &matrix)?;
/// assert_eq!(plan.routes, vec![vec![0]]);
/// # Ok::<(), courier_core::RouteError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct VrpRouter {
    config: VrpRouterConfig,
}

impl VrpRouter {
    /// Construct a router using default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a router with explicit configuration.
    pub const fn with_config(config: VrpRouterConfig) -> Self {
        Self { config }
    }

    /// The configuration this router searches with.
    pub const fn config(&self) -> &VrpRouterConfig {
        &self.config
    }
}

impl Router for VrpRouter {
    fn engine(&self) -> Engine {
        Engine::Constrained
    }

    fn route(
        &self,
        request: &RoutingRequest,
        matrix: &DistanceMatrix,
    ) -> Result<RoutePlan, RouteError> {
        if request.stops.is_empty() {
            return Ok(RoutePlan::default());
        }
        let expected = request.stops.len() + 1;
        if matrix.len() != expected {
            return Err(RouteError::Model(format!(
                "matrix has {} points, expected {expected}",
                matrix.len()
            )));
        }

        let started_at = Instant::now();
        let context = VrpSolveContext::new(&self.config);
        let plan = RoutePlan::new(context.solve(request, matrix)?);
        log::debug!(
            "vrp-core placed {visits} stops on {routes} routes in {elapsed:?}",
            visits = plan.visit_count(),
            routes = plan.routes.len(),
            elapsed = started_at.elapsed(),
        );

        ensure_every_stop_once(request, &plan)?;
        ensure_schedules_feasible(request, matrix, &plan)?;
        Ok(plan)
    }
}

fn ensure_every_stop_once(request: &RoutingRequest, plan: &RoutePlan) -> Result<(), RouteError> {
    let mut seen = vec![false; request.stops.len()];
    for &stop in plan.routes.iter().flatten() {
        match seen.get_mut(stop) {
            Some(slot) if !*slot => *slot = true,
            _ => {
                log::warn!("vrp-core returned stop {stop} more than once or out of range");
                return Err(RouteError::Model(format!("invalid stop index {stop} in solution")));
            }
        }
    }
    let unassigned = seen.iter().filter(|visited| !**visited).count();
    if unassigned > 0 {
        return Err(RouteError::Infeasible { unassigned });
    }
    Ok(())
}

fn ensure_schedules_feasible(
    request: &RoutingRequest,
    matrix: &DistanceMatrix,
    plan: &RoutePlan,
) -> Result<(), RouteError> {
    let broken: Vec<_> = simulate_plan(request, matrix, plan)
        .into_iter()
        .filter(|schedule| !schedule.is_feasible())
        .collect();
    if broken.is_empty() {
        return Ok(());
    }
    for schedule in &broken {
        log::warn!(
            "rejecting vrp-core route with violations: {:?}",
            schedule.violations
        );
    }
    let unassigned = broken.iter().map(|schedule| schedule.visits.len()).sum();
    Err(RouteError::Infeasible { unassigned })
}

#[cfg(test)]
mod tests;
