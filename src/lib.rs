//! Facade crate for the courier routing engine.
//!
//! This crate re-exports the core domain types and wires in the constrained
//! router when the `solver-vrp` feature is enabled. Without it every request
//! is served by the greedy fallback and results say so in their `note`.

#![forbid(unsafe_code)]

pub use courier_core::{
    Coordinate, Depot, DistanceMatrix, Engine, Fleet, GreedyRouter, RouteError, RoutePlan,
    RoutedStop, Router, RoutingEngine, RoutingInput, RoutingRequest, RoutingResult, Stop,
    StopInput, TimeWindow, TimeWindowFormatError, haversine_miles, parse_hhmm,
};

#[cfg(feature = "solver-vrp")]
pub use courier_solver_vrp::{VrpRouter, VrpRouterConfig};

/// Whether this build can honour capacity and time-window constraints.
///
/// # Examples
/// ```
/// let available = courier_engine::constrained_solver_available();
/// assert_eq!(available, cfg!(feature = "solver-vrp"));
/// ```
pub const fn constrained_solver_available() -> bool {
    cfg!(feature = "solver-vrp")
}

/// The engine for this build: constrained when available, greedy otherwise.
pub fn default_engine() -> RoutingEngine {
    #[cfg(feature = "solver-vrp")]
    {
        RoutingEngine::new(Some(Box::new(VrpRouter::default())))
    }
    #[cfg(not(feature = "solver-vrp"))]
    {
        RoutingEngine::greedy_only()
    }
}

/// Normalise `input` and route it with [`default_engine`].
///
/// # Examples
/// ```
/// use courier_engine::{Engine, RoutingInput, optimize_routes};
///
/// let result = optimize_routes(RoutingInput::default());
/// assert_eq!(result.engine, Engine::None);
/// assert_eq!(result.note.as_deref(), Some("no stops"));
/// ```
pub fn optimize_routes(input: RoutingInput) -> RoutingResult {
    default_engine().route(&input.into_request())
}
