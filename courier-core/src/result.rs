//! The routing outcome handed to rendering and export collaborators.

use geo::{Centroid, MultiPoint, Point};

use crate::geodesy::{Coordinate, haversine_miles};
use crate::model::{Depot, Stop};
use crate::router::Engine;

/// Map centre used when nothing was routed (central London).
pub const DEFAULT_MAP_CENTRE: Coordinate = Coordinate::new(51.5072, -0.1276);

/// A stop as it appears in an emitted route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutedStop {
    /// Stop identifier.
    pub id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Display name, if any.
    pub name: Option<String>,
    /// Demand delivered.
    pub demand: u32,
}

impl From<&Stop> for RoutedStop {
    fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.clone(),
            lat: stop.location.lat,
            lng: stop.location.lng,
            name: stop.name.clone(),
            demand: stop.demand,
        }
    }
}

/// Outcome of a routing request.
///
/// All distances are miles rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingResult {
    /// Engine that produced the routes.
    pub engine: Engine,
    /// Ordered stops per used vehicle, depot excluded.
    pub routes: Vec<Vec<RoutedStop>>,
    /// Miles driven across all routes.
    pub total_miles: f64,
    /// Miles for one vehicle visiting stops in input order.
    pub baseline_miles: f64,
    /// Percentage saved against the baseline.
    pub savings_pct: f64,
    /// Advisory message, e.g. why the fallback ran.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub note: Option<String>,
}

impl RoutingResult {
    /// The degenerate result for a request without stops.
    pub fn empty() -> Self {
        Self {
            engine: Engine::None,
            routes: Vec::new(),
            total_miles: 0.0,
            baseline_miles: 0.0,
            savings_pct: 0.0,
            note: Some("no stops".to_owned()),
        }
    }

    /// Mean position of every routed stop, for centring a map.
    ///
    /// Falls back to [`DEFAULT_MAP_CENTRE`] when no stop was routed.
    pub fn map_centre(&self) -> Coordinate {
        let points: MultiPoint<f64> = self
            .routes
            .iter()
            .flatten()
            .map(|stop| Point::new(stop.lng, stop.lat))
            .collect();
        points
            .centroid()
            .map_or(DEFAULT_MAP_CENTRE, |centre| Coordinate::from(centre.0))
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Single-pass baseline: depot, every stop in input order, depot.
///
/// Uses great-circle distances directly rather than the routing matrix.
pub fn baseline_miles(depot: &Depot, stops: &[Stop]) -> f64 {
    let mut total = 0.0;
    let mut current = depot.location;
    for stop in stops {
        total += haversine_miles(current, stop.location);
        current = stop.location;
    }
    total + haversine_miles(current, depot.location)
}

/// Percentage saved by `total` against `baseline`, rounded to two decimals.
///
/// # Examples
/// ```
/// use courier_core::savings_pct;
///
/// assert_eq!(savings_pct(10.0, 7.5), 25.0);
/// assert_eq!(savings_pct(0.0, 3.0), 0.0);
/// ```
pub fn savings_pct(baseline: f64, total: f64) -> f64 {
    if baseline > 0.0 {
        round2((baseline - total) / baseline * 100.0)
    } else {
        0.0
    }
}
