//! Tests for the `VrpRouter`.

use super::*;
use courier_core::test_support::{grid_stops, london_depot, stop, two_stop_request};
use courier_core::{Fleet, TimeWindow};
use rstest::{fixture, rstest};

#[fixture]
fn router() -> VrpRouter {
    VrpRouter::with_config(VrpRouterConfig {
        time_limit: Duration::from_secs(1),
        max_generations: 100,
    })
}

fn matrix_for(request: &RoutingRequest) -> DistanceMatrix {
    DistanceMatrix::from_points(&request.points())
}

#[rstest]
fn default_config_uses_five_second_budget() {
    let config = VrpRouterConfig::default();
    assert_eq!(config.time_limit, Duration::from_secs(5));
    assert!(config.max_generations > 0);
}

#[rstest]
fn reports_constrained_engine(router: VrpRouter) {
    assert_eq!(router.engine(), Engine::Constrained);
}

#[rstest]
fn empty_request_yields_empty_plan(router: VrpRouter) {
    let request = RoutingRequest::new(london_depot(), Vec::new(), Fleet::new(1, 10));
    let plan = router
        .route(&request, &matrix_for(&request))
        .expect("empty request routes trivially");
    assert!(plan.routes.is_empty());
}

#[rstest]
fn mismatched_matrix_is_a_model_error(router: VrpRouter) {
    let request = two_stop_request();
    let matrix = DistanceMatrix::from_points(&[request.depot.location]);
    let err = router
        .route(&request, &matrix)
        .expect_err("matrix without stops must be rejected");
    assert!(matches!(err, RouteError::Model(_)));
}

#[rstest]
fn routes_every_stop_within_capacity(router: VrpRouter) {
    let request = two_stop_request();
    let matrix = matrix_for(&request);
    let plan = router.route(&request, &matrix).expect("feasible request");

    let mut visited: Vec<usize> = plan.routes.iter().flatten().copied().collect();
    visited.sort_unstable();
    assert_eq!(visited, vec![0, 1]);
    assert!(
        simulate_plan(&request, &matrix, &plan)
            .iter()
            .all(courier_core::RouteSchedule::is_feasible)
    );
}

#[rstest]
fn splits_load_across_vehicles_when_capacity_requires(router: VrpRouter) {
    let request = RoutingRequest::new(london_depot(), grid_stops(4, 5), Fleet::new(2, 10));
    let matrix = matrix_for(&request);
    let plan = router.route(&request, &matrix).expect("two vehicles suffice");

    assert_eq!(plan.routes.len(), 2);
    assert_eq!(plan.visit_count(), 4);
    for route in &plan.routes {
        let load: u32 = route
            .iter()
            .filter_map(|idx| request.stops.get(*idx))
            .map(|stop| stop.demand)
            .sum();
        assert!(load <= 10, "route {route:?} carries {load}");
    }
}

#[rstest]
fn oversized_demand_is_infeasible(router: VrpRouter) {
    let request = RoutingRequest::new(
        london_depot(),
        vec![stop("big", 51.51, -0.12, 11)],
        Fleet::new(1, 10),
    );
    let err = router
        .route(&request, &matrix_for(&request))
        .expect_err("demand above capacity cannot be served");
    assert!(matches!(err, RouteError::Infeasible { .. }));
}

#[rstest]
fn closed_window_before_depot_opens_is_infeasible(router: VrpRouter) {
    let early = stop("early", 51.51, -0.12, 1)
        .with_time_window(TimeWindow::from_bounds(Some(0), Some(60)));
    let depot = london_depot().with_time_window(TimeWindow::from_bounds(Some(480), Some(1080)));
    let request = RoutingRequest::new(depot, vec![early], Fleet::new(1, 10));
    let err = router
        .route(&request, &matrix_for(&request))
        .expect_err("stop closes before the vehicle can leave");
    assert!(matches!(err, RouteError::Infeasible { .. }));
}

#[rstest]
fn windows_force_visit_order(router: VrpRouter) {
    let first = stop("first", 51.53, -0.13, 1)
        .with_time_window(TimeWindow::from_bounds(Some(0), Some(600)));
    let second = stop("second", 51.51, -0.13, 1)
        .with_time_window(TimeWindow::from_bounds(Some(900), Some(1000)));
    let request = RoutingRequest::new(london_depot(), vec![second, first], Fleet::new(1, 10));
    let matrix = matrix_for(&request);
    let plan = router.route(&request, &matrix).expect("windows are compatible");

    assert_eq!(plan.routes, vec![vec![1, 0]]);
}

#[rstest]
fn duplicate_stop_in_plan_is_rejected() {
    let request = two_stop_request();
    let plan = RoutePlan::new(vec![vec![0, 0]]);
    let err = ensure_every_stop_once(&request, &plan).expect_err("duplicate visit");
    assert!(matches!(err, RouteError::Model(_)));
}

#[rstest]
fn missing_stop_in_plan_counts_as_unassigned() {
    let request = two_stop_request();
    let plan = RoutePlan::new(vec![vec![1]]);
    let err = ensure_every_stop_once(&request, &plan).expect_err("stop 0 missing");
    assert_eq!(err, RouteError::Infeasible { unassigned: 1 });
}

#[rstest]
fn schedule_check_rejects_overloaded_route() {
    let request = RoutingRequest::new(
        london_depot(),
        vec![stop("A", 51.51, -0.12, 6), stop("B", 51.52, -0.13, 6)],
        Fleet::new(1, 10),
    );
    let matrix = matrix_for(&request);
    let plan = RoutePlan::new(vec![vec![0, 1]]);
    let err = ensure_schedules_feasible(&request, &matrix, &plan).expect_err("load 12 > 10");
    assert_eq!(err, RouteError::Infeasible { unassigned: 2 });
}
