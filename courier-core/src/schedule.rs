//! Replay a vehicle route against capacity and time windows.
//!
//! The simulation departs the depot at the opening of its window, adds
//! transit minutes from the scaled matrix and waits at a stop when it
//! arrives early. A route is feasible when the running load never exceeds
//! capacity, every arrival lies inside the stop's window and the vehicle is
//! back before the depot closes.

use crate::matrix::DistanceMatrix;
use crate::model::RoutingRequest;
use crate::router::RoutePlan;
use crate::time_window::Minutes;

/// One simulated stop visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Index into `request.stops`.
    pub stop: usize,
    /// Service start minute, after any waiting.
    pub arrival: Minutes,
    /// Cumulative demand delivered including this stop.
    pub load: u64,
}

/// Why a simulated route broke a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Load exceeded vehicle capacity at this stop.
    Capacity {
        /// Offending stop index.
        stop: usize,
        /// Load on arrival.
        load: u64,
    },
    /// The vehicle arrived after the stop's window closed.
    LateArrival {
        /// Offending stop index.
        stop: usize,
        /// Arrival minute.
        arrival: Minutes,
    },
    /// The vehicle returned after the depot closed.
    LateReturn {
        /// Return minute.
        arrival: Minutes,
    },
    /// A stop index did not exist in the request.
    UnknownStop(usize),
}

/// Timeline of a single route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteSchedule {
    /// Visits in route order.
    pub visits: Vec<Visit>,
    /// Minute the vehicle is back at the depot.
    pub return_at: Minutes,
    /// Every constraint the route breaks.
    pub violations: Vec<Violation>,
}

impl RouteSchedule {
    /// Whether the route honours capacity and every time window.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Simulate `route` (stop indices) for `request`.
///
/// # Examples
/// ```
/// use courier_core::{
///     Coordinate, Depot, DistanceMatrix, Fleet, RoutingRequest, Stop, simulate_route,
/// };
///
/// let request = RoutingRequest::new(
///     Depot::new(Coordinate::new(51.5072, -0.1276)),
///     vec![Stop::new("A", Coordinate::new(51.51, -0.12)).with_demand(3)],
///     Fleet::new(1, 2),
/// );
/// let matrix = DistanceMatrix::from_points(&request.points());
/// let schedule = simulate_route(&request, &matrix, &[0]);
/// assert!(!schedule.is_feasible());
/// ```
pub fn simulate_route(
    request: &RoutingRequest,
    matrix: &DistanceMatrix,
    route: &[usize],
) -> RouteSchedule {
    let capacity = u64::from(request.fleet.capacity());
    let depot_window = request.depot.window();
    let mut schedule = RouteSchedule::default();
    let mut clock = depot_window.start;
    let mut load = 0_u64;
    let mut previous = 0_usize;

    for &stop_index in route {
        let Some(stop) = request.stops.get(stop_index) else {
            schedule.violations.push(Violation::UnknownStop(stop_index));
            continue;
        };
        let node = stop_index + 1;
        let window = stop.window();
        let arrival = clock
            .saturating_add(matrix.transit_minutes(previous, node))
            .max(window.start);
        if arrival > window.end {
            schedule.violations.push(Violation::LateArrival {
                stop: stop_index,
                arrival,
            });
        }

        load += u64::from(stop.demand);
        if load > capacity {
            schedule.violations.push(Violation::Capacity {
                stop: stop_index,
                load,
            });
        }

        schedule.visits.push(Visit {
            stop: stop_index,
            arrival,
            load,
        });
        clock = arrival;
        previous = node;
    }

    schedule.return_at = clock.saturating_add(matrix.transit_minutes(previous, 0));
    if schedule.return_at > depot_window.end {
        schedule.violations.push(Violation::LateReturn {
            arrival: schedule.return_at,
        });
    }
    schedule
}

/// Simulate every route in `plan`.
pub fn simulate_plan(
    request: &RoutingRequest,
    matrix: &DistanceMatrix,
    plan: &RoutePlan,
) -> Vec<RouteSchedule> {
    plan.routes
        .iter()
        .map(|route| simulate_route(request, matrix, route))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::Coordinate;
    use crate::model::{Depot, Fleet, Stop};
    use crate::time_window::TimeWindow;
    use rstest::rstest;

    /// Stops one and two miles-ish north of the depot.
    fn request(windows: [Option<TimeWindow>; 2], capacity: i64) -> RoutingRequest {
        let mut near = Stop::new("near", Coordinate::new(0.0145, 0.0)).with_demand(2);
        let mut far = Stop::new("far", Coordinate::new(0.029, 0.0)).with_demand(3);
        near.time_window = windows[0];
        far.time_window = windows[1];
        RoutingRequest::new(
            Depot::new(Coordinate::new(0.0, 0.0))
                .with_time_window(TimeWindow::from_bounds(Some(480), Some(1080))),
            vec![near, far],
            Fleet::new(1, capacity),
        )
    }

    #[rstest]
    fn unconstrained_route_is_feasible() {
        let request = request([None, None], 10);
        let matrix = DistanceMatrix::from_points(&request.points());
        let schedule = simulate_route(&request, &matrix, &[0, 1]);
        assert!(schedule.is_feasible(), "{:?}", schedule.violations);
        assert_eq!(schedule.visits.len(), 2);
        assert_eq!(schedule.visits[1].load, 5);
        assert!(schedule.visits[0].arrival >= 480);
        assert!(schedule.visits[1].arrival >= schedule.visits[0].arrival);
    }

    #[rstest]
    fn early_arrival_waits_for_window() {
        let request = request([Some(TimeWindow::from_bounds(Some(600), None)), None], 10);
        let matrix = DistanceMatrix::from_points(&request.points());
        let schedule = simulate_route(&request, &matrix, &[0, 1]);
        assert!(schedule.is_feasible());
        assert_eq!(schedule.visits[0].arrival, 600);
    }

    #[rstest]
    fn closed_window_is_a_violation() {
        let request = request([None, Some(TimeWindow::from_bounds(None, Some(300)))], 10);
        let matrix = DistanceMatrix::from_points(&request.points());
        let schedule = simulate_route(&request, &matrix, &[0, 1]);
        assert!(matches!(
            schedule.violations.as_slice(),
            [Violation::LateArrival { stop: 1, .. }]
        ));
    }

    #[rstest]
    fn overload_is_a_violation() {
        let request = request([None, None], 4);
        let matrix = DistanceMatrix::from_points(&request.points());
        let schedule = simulate_route(&request, &matrix, &[0, 1]);
        assert_eq!(
            schedule.violations,
            vec![Violation::Capacity { stop: 1, load: 5 }]
        );
    }

    #[rstest]
    fn late_return_is_a_violation() {
        let request = request([Some(TimeWindow::from_bounds(Some(1080), None)), None], 10);
        let matrix = DistanceMatrix::from_points(&request.points());
        let schedule = simulate_route(&request, &matrix, &[0]);
        assert!(matches!(
            schedule.violations.as_slice(),
            [Violation::LateReturn { .. }]
        ));
    }

    #[rstest]
    fn unknown_stop_is_reported() {
        let request = request([None, None], 10);
        let matrix = DistanceMatrix::from_points(&request.points());
        let schedule = simulate_route(&request, &matrix, &[7]);
        assert_eq!(schedule.violations, vec![Violation::UnknownStop(7)]);
    }
}
