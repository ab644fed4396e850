//! The routing strategy seam shared by every engine.
//!
//! A [`Router`] turns a [`RoutingRequest`] and its [`DistanceMatrix`] into a
//! [`RoutePlan`]: one ordered list of stop indices per used vehicle. The
//! orchestrator depends only on this trait, never on an implementation.

use std::fmt;

use thiserror::Error;

use crate::matrix::DistanceMatrix;
use crate::model::RoutingRequest;

/// Which engine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Engine {
    /// The capacity- and time-window-aware solver.
    Constrained,
    /// The nearest-neighbour heuristic.
    GreedyFallback,
    /// Nothing was routed.
    None,
}

impl Engine {
    /// Stable wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constrained => "constrained",
            Self::GreedyFallback => "greedy-fallback",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`Router::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The strategy is not available in this build or environment.
    #[error("routing strategy unavailable")]
    Unavailable,
    /// No assignment satisfying every constraint was found within budget.
    #[error("no feasible solution found ({unassigned} stops unassigned)")]
    Infeasible {
        /// Stops the search could not place.
        unassigned: usize,
    },
    /// The solver rejected the model it was given.
    #[error("failed to build routing model: {0}")]
    Model(String),
}

/// Per-vehicle stop orderings, excluding the depot.
///
/// Each inner vector holds indices into `request.stops`. Vehicles with no
/// stops are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutePlan {
    /// Ordered stop indices per used vehicle.
    pub routes: Vec<Vec<usize>>,
}

impl RoutePlan {
    /// Build a plan, dropping empty vehicle routes.
    pub fn new(routes: Vec<Vec<usize>>) -> Self {
        Self {
            routes: routes.into_iter().filter(|route| !route.is_empty()).collect(),
        }
    }

    /// Total miles driven, each route starting and ending at the depot.
    pub fn total_miles(&self, matrix: &DistanceMatrix) -> f64 {
        self.routes
            .iter()
            .map(|route| matrix.path_miles(&depot_path(route)))
            .sum()
    }

    /// Number of stop visits across all routes.
    pub fn visit_count(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }
}

/// Matrix indices for a depot-to-depot tour over `route`.
pub fn depot_path(route: &[usize]) -> Vec<usize> {
    std::iter::once(0)
        .chain(route.iter().map(|stop| stop + 1))
        .chain(std::iter::once(0))
        .collect()
}

/// Assign stops to vehicle routes.
///
/// Implementations must be `Send + Sync` so one engine can serve
/// concurrent requests; all routing state stays local to each call.
pub trait Router: Send + Sync {
    /// The engine label attached to results produced by this router.
    fn engine(&self) -> Engine;

    /// Route every stop in `request` using costs from `matrix`.
    fn route(
        &self,
        request: &RoutingRequest,
        matrix: &DistanceMatrix,
    ) -> Result<RoutePlan, RouteError>;
}
