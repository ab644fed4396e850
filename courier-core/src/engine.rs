//! Routing orchestrator.
//!
//! Per request: `Start -> empty? -> Done(none)`, otherwise build the matrix,
//! try the constrained router when one is installed and fall back to the
//! greedy router when it is absent or finds nothing feasible. Baseline and
//! savings are computed last. The engine holds no per-request state, so one
//! instance can serve concurrent callers.

use crate::greedy::GreedyRouter;
use crate::matrix::DistanceMatrix;
use crate::model::RoutingRequest;
use crate::result::{RoutedStop, RoutingResult, baseline_miles, round2, savings_pct};
use crate::router::{Engine, RouteError, RoutePlan, Router};

const FALLBACK_LIMITATION: &str =
    "greedy fallback ignores vehicle capacity and time windows";

/// Selects a routing strategy and assembles the [`RoutingResult`].
///
/// # Examples
/// ```
/// use courier_core::{Coordinate, Depot, Engine, Fleet, RoutingEngine, RoutingRequest, Stop};
///
/// let engine = RoutingEngine::greedy_only();
/// let request = RoutingRequest::new(
///     Depot::new(Coordinate::new(51.5072, -0.1276)),
///     vec![Stop::new("A", Coordinate::new(51.51, -0.12))],
///     Fleet::new(1, 10),
/// );
/// let result = engine.route(&request);
/// assert_eq!(result.engine, Engine::GreedyFallback);
/// assert_eq!(result.routes.len(), 1);
/// ```
pub struct RoutingEngine {
    constrained: Option<Box<dyn Router>>,
    fallback: GreedyRouter,
}

impl RoutingEngine {
    /// Build an engine, optionally with a constrained router installed.
    pub fn new(constrained: Option<Box<dyn Router>>) -> Self {
        Self {
            constrained,
            fallback: GreedyRouter,
        }
    }

    /// An engine without the constrained capability.
    pub fn greedy_only() -> Self {
        Self::new(None)
    }

    /// Whether a constrained router is installed.
    pub fn constrained_available(&self) -> bool {
        self.constrained.is_some()
    }

    /// Route `request`. Never fails; problems surface in `note`.
    pub fn route(&self, request: &RoutingRequest) -> RoutingResult {
        if request.stops.is_empty() {
            log::debug!("no stops supplied; returning empty result");
            return RoutingResult::empty();
        }

        let matrix = DistanceMatrix::from_points(&request.points());
        log::debug!(
            "built {n}x{n} distance matrix for {vehicles} vehicles",
            n = matrix.len(),
            vehicles = request.fleet.vehicle_count()
        );

        let (engine, plan, note) = self.select_plan(request, &matrix);
        let total_miles = round2(plan.total_miles(&matrix));
        let baseline = round2(baseline_miles(&request.depot, &request.stops));
        log::info!(
            "routed {stops} stops on {routes} routes with {engine}: {total_miles} mi (baseline {baseline} mi)",
            stops = plan.visit_count(),
            routes = plan.routes.len(),
        );

        RoutingResult {
            engine,
            routes: materialise(request, &plan),
            total_miles,
            baseline_miles: baseline,
            savings_pct: savings_pct(baseline, total_miles),
            note,
        }
    }

    fn select_plan(
        &self,
        request: &RoutingRequest,
        matrix: &DistanceMatrix,
    ) -> (Engine, RoutePlan, Option<String>) {
        let reason = match &self.constrained {
            Some(router) => match router.route(request, matrix) {
                Ok(plan) => return (router.engine(), plan, None),
                Err(err) => {
                    log::warn!("constrained routing failed, using greedy fallback: {err}");
                    fallback_reason(&err)
                }
            },
            None => {
                log::debug!("constrained solver unavailable; using greedy fallback");
                "constrained solver unavailable"
            }
        };

        let plan = match self.fallback.route(request, matrix) {
            Ok(plan) => plan,
            Err(err) => {
                log::warn!("greedy fallback failed: {err}");
                RoutePlan::default()
            }
        };
        let note = if request.declares_constraints() {
            format!("{reason}; {FALLBACK_LIMITATION}")
        } else {
            reason.to_owned()
        };
        (self.fallback.engine(), plan, Some(note))
    }
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::greedy_only()
    }
}

impl std::fmt::Debug for RoutingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingEngine")
            .field(
                "constrained",
                &self.constrained.as_ref().map(|router| router.engine()),
            )
            .finish_non_exhaustive()
    }
}

const fn fallback_reason(err: &RouteError) -> &'static str {
    match err {
        RouteError::Unavailable => "constrained solver unavailable",
        RouteError::Infeasible { .. } => "no feasible constrained solution found",
        RouteError::Model(_) => "constrained solver rejected the routing model",
    }
}

fn materialise(request: &RoutingRequest, plan: &RoutePlan) -> Vec<Vec<RoutedStop>> {
    plan.routes
        .iter()
        .map(|route| {
            route
                .iter()
                .filter_map(|index| request.stops.get(*index))
                .map(RoutedStop::from)
                .collect()
        })
        .collect()
}
