//! Core domain types and routing engine for Courier.
//!
//! The crate computes great-circle distances, normalises delivery requests,
//! and assigns stops to a fleet of vehicles from a shared depot. The
//! [`RoutingEngine`] prefers an optional constrained [`Router`] and always
//! has the [`GreedyRouter`] to fall back on, so every request produces a
//! [`RoutingResult`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod engine;
pub mod geodesy;
pub mod greedy;
pub mod input;
pub mod matrix;
pub mod model;
pub mod result;
pub mod router;
pub mod schedule;
pub mod time_window;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use engine::RoutingEngine;
pub use geodesy::{Coordinate, EARTH_RADIUS_KM, MILES_PER_KM, haversine_miles};
pub use greedy::{GreedyRouter, nearest_neighbour_order, partition_round_robin};
pub use input::{RoutingInput, StopInput};
pub use matrix::{AVERAGE_SPEED_MPH, DistanceMatrix, MILLI_MILES_PER_MILE, transit_minutes};
pub use model::{Depot, Fleet, RoutingRequest, Stop};
pub use result::{
    DEFAULT_MAP_CENTRE, RoutedStop, RoutingResult, baseline_miles, round2, savings_pct,
};
pub use router::{Engine, RouteError, RoutePlan, Router, depot_path};
pub use schedule::{RouteSchedule, Violation, Visit, simulate_plan, simulate_route};
pub use time_window::{
    HORIZON_MINUTES, Minutes, TimeWindow, TimeWindowFormatError, parse_hhmm, parse_hhmm_lenient,
};
