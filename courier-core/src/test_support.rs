//! Test-only fixtures and stub routers used by unit and behaviour tests.

use crate::{
    Coordinate, Depot, DistanceMatrix, Engine, Fleet, RouteError, RoutePlan, Router,
    RoutingRequest, Stop,
};

/// Central London, the default depot of the upload form.
pub const LONDON: Coordinate = Coordinate::new(51.5072, -0.1276);

/// An unconstrained depot at [`LONDON`].
pub const fn london_depot() -> Depot {
    Depot::new(LONDON)
}

/// Construct a stop with the given demand.
pub fn stop(id: &str, lat: f64, lng: f64, demand: u32) -> Stop {
    Stop::new(id, Coordinate::new(lat, lng)).with_demand(demand)
}

/// Two stops near [`LONDON`] with one vehicle of capacity ten.
pub fn two_stop_request() -> RoutingRequest {
    RoutingRequest::new(
        london_depot(),
        vec![stop("A", 51.51, -0.12, 3), stop("B", 51.52, -0.13, 4)],
        Fleet::new(1, 10),
    )
}

/// `count` stops on a small grid around [`LONDON`], each with `demand`.
pub fn grid_stops(count: usize, demand: u32) -> Vec<Stop> {
    (0..count)
        .map(|i| {
            let row = f64::from(u32::try_from(i / 5).unwrap_or(u32::MAX));
            let col = f64::from(u32::try_from(i % 5).unwrap_or(u32::MAX));
            stop(
                &format!("S{i}"),
                LONDON.lat + 0.01 * (row + 1.0),
                LONDON.lng + 0.01 * (col - 2.0),
                demand,
            )
        })
        .collect()
}

/// A constrained-engine stand-in that always fails with a fixed error.
#[derive(Debug, Clone)]
pub struct FailingRouter(pub RouteError);

impl Router for FailingRouter {
    fn engine(&self) -> Engine {
        Engine::Constrained
    }

    fn route(
        &self,
        _request: &RoutingRequest,
        _matrix: &DistanceMatrix,
    ) -> Result<RoutePlan, RouteError> {
        Err(self.0.clone())
    }
}
