//! Normalised routing inputs: stops, the depot and fleet parameters.
//!
//! These types carry already-validated values. Use
//! [`RoutingInput`](crate::RoutingInput) to build them from caller-supplied
//! payloads.

use crate::geodesy::Coordinate;
use crate::time_window::TimeWindow;

/// A delivery location with demand and an optional time window.
///
/// # Examples
/// ```
/// use courier_core::{Coordinate, Stop};
///
/// let stop = Stop::new("A", Coordinate::new(51.51, -0.12)).with_demand(3);
/// assert_eq!(stop.demand, 3);
/// assert!(stop.time_window.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Caller-supplied identifier. Expected to be unique but not checked.
    pub id: String,
    /// Stop position.
    pub location: Coordinate,
    /// Optional display name.
    pub name: Option<String>,
    /// Units of demand delivered at this stop.
    pub demand: u32,
    /// Allowed visit interval; `None` is unconstrained.
    pub time_window: Option<TimeWindow>,
}

impl Stop {
    /// Construct an unconstrained, zero-demand stop.
    pub fn new(id: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            location,
            name: None,
            demand: 0,
            time_window: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the demand.
    #[must_use]
    pub const fn with_demand(mut self, demand: u32) -> Self {
        self.demand = demand;
        self
    }

    /// Set the time window.
    #[must_use]
    pub const fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// The effective window, defaulting to the whole horizon.
    pub fn window(&self) -> TimeWindow {
        self.time_window.unwrap_or_default()
    }
}

/// The shared start and end point of every vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Depot {
    /// Depot position.
    pub location: Coordinate,
    /// Operating hours; `None` is unconstrained.
    pub time_window: Option<TimeWindow>,
}

impl Depot {
    /// Construct an unconstrained depot.
    pub const fn new(location: Coordinate) -> Self {
        Self {
            location,
            time_window: None,
        }
    }

    /// Set the operating hours.
    #[must_use]
    pub const fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// The effective window, defaulting to the whole horizon.
    pub fn window(&self) -> TimeWindow {
        self.time_window.unwrap_or_default()
    }
}

/// Vehicle count and per-vehicle capacity, both at least one.
///
/// # Examples
/// ```
/// use courier_core::Fleet;
///
/// let fleet = Fleet::new(0, -4);
/// assert_eq!(fleet.vehicle_count(), 1);
/// assert_eq!(fleet.capacity(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    vehicle_count: usize,
    capacity: u32,
}

impl Fleet {
    /// Build fleet parameters, clamping values below one up to one.
    pub fn new(vehicle_count: i64, capacity: i64) -> Self {
        Self {
            vehicle_count: usize::try_from(vehicle_count.max(1)).unwrap_or(usize::MAX),
            capacity: u32::try_from(capacity.max(1)).unwrap_or(u32::MAX),
        }
    }

    /// Number of vehicles available.
    pub const fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    /// Capacity of each vehicle in demand units.
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// A complete routing request: depot, stops in caller order and fleet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutingRequest {
    /// Shared start and end point.
    pub depot: Depot,
    /// Stops in caller-supplied order.
    pub stops: Vec<Stop>,
    /// Vehicle parameters.
    pub fleet: Fleet,
}

impl RoutingRequest {
    /// Construct a request.
    pub const fn new(depot: Depot, stops: Vec<Stop>, fleet: Fleet) -> Self {
        Self {
            depot,
            stops,
            fleet,
        }
    }

    /// Depot followed by every stop, in matrix order.
    pub fn points(&self) -> Vec<Coordinate> {
        std::iter::once(self.depot.location)
            .chain(self.stops.iter().map(|stop| stop.location))
            .collect()
    }

    /// Whether any stop or the depot narrows the routing problem.
    ///
    /// Any positive demand counts, as does any time window narrower than
    /// the horizon.
    pub fn declares_constraints(&self) -> bool {
        self.depot.window().is_constrained()
            || self
                .stops
                .iter()
                .any(|stop| stop.demand > 0 || stop.window().is_constrained())
    }
}
