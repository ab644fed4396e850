//! Nearest-neighbour fallback router.
//!
//! Builds one global nearest-neighbour tour from the depot, then deals its
//! visit order out to vehicles round-robin. Capacity and time windows are
//! ignored, so the result is always available but not constraint-exact.

use crate::matrix::DistanceMatrix;
use crate::model::RoutingRequest;
use crate::router::{Engine, RouteError, RoutePlan, Router};

/// Deterministic, always-available router.
///
/// # Examples
/// ```
/// use courier_core::{
///     Coordinate, Depot, DistanceMatrix, Fleet, GreedyRouter, Router, RoutingRequest, Stop,
/// };
///
/// let request = RoutingRequest::new(
///     Depot::new(Coordinate::new(0.0, 0.0)),
///     vec![
///         Stop::new("far", Coordinate::new(0.0, 2.0)),
///         Stop::new("near", Coordinate::new(0.0, 1.0)),
///     ],
///     Fleet::new(1, 10),
/// );
/// let matrix = DistanceMatrix::from_points(&request.points());
/// let plan = GreedyRouter.route(&request, &matrix).unwrap();
/// assert_eq!(plan.routes, vec![vec![1, 0]]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyRouter;

impl Router for GreedyRouter {
    fn engine(&self) -> Engine {
        Engine::GreedyFallback
    }

    fn route(
        &self,
        request: &RoutingRequest,
        matrix: &DistanceMatrix,
    ) -> Result<RoutePlan, RouteError> {
        let order = nearest_neighbour_order(request.stops.len(), matrix);
        Ok(partition_round_robin(&order, request.fleet.vehicle_count()))
    }
}

/// Visit order of a nearest-neighbour tour over `stop_count` stops.
///
/// Ties go to the stop listed first. Distances that do not compare (`NaN`)
/// never win, but a stop is still chosen so the tour always completes.
pub fn nearest_neighbour_order(stop_count: usize, matrix: &DistanceMatrix) -> Vec<usize> {
    let mut visited = vec![false; stop_count];
    let mut order = Vec::with_capacity(stop_count);
    let mut current = 0_usize;

    while order.len() < stop_count {
        let mut best: Option<(usize, f64)> = None;
        for (stop, _) in visited.iter().enumerate().filter(|(_, seen)| !**seen) {
            let distance = matrix.miles(current, stop + 1);
            let closer = best.is_none_or(|(_, best_distance)| distance < best_distance);
            if closer && !distance.is_nan() {
                best = Some((stop, distance));
            }
        }

        let next = best
            .map(|(stop, _)| stop)
            .or_else(|| visited.iter().position(|seen| !*seen));
        let Some(next) = next else {
            break;
        };
        if let Some(seen) = visited.get_mut(next) {
            *seen = true;
        }
        order.push(next);
        current = next + 1;
    }

    order
}

/// Deal `order` across `vehicle_count` vehicles by position modulo count.
pub fn partition_round_robin(order: &[usize], vehicle_count: usize) -> RoutePlan {
    let buckets = vehicle_count.max(1);
    let mut routes = vec![Vec::new(); buckets];
    for (position, stop) in order.iter().enumerate() {
        if let Some(route) = routes.get_mut(position % buckets) {
            route.push(*stop);
        }
    }
    RoutePlan::new(routes)
}
