//! Caller-facing request payloads and their normalisation.
//!
//! The field names match the JSON accepted by the surrounding application.
//! [`RoutingInput::into_request`] applies every recovery rule: negative
//! demand becomes zero, fleet parameters clamp to one and malformed
//! "HH:MM" strings become unconstrained bounds.

use crate::geodesy::Coordinate;
use crate::model::{Depot, Fleet, RoutingRequest, Stop};
use crate::time_window::{TimeWindow, parse_hhmm_lenient};

/// A stop as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopInput {
    /// Stop identifier.
    pub id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Optional display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Demand; negative values clamp to zero.
    #[cfg_attr(feature = "serde", serde(default))]
    pub demand: i64,
    /// Window opening as "HH:MM".
    #[cfg_attr(feature = "serde", serde(default))]
    pub tw_start: Option<String>,
    /// Window closing as "HH:MM".
    #[cfg_attr(feature = "serde", serde(default))]
    pub tw_end: Option<String>,
}

impl StopInput {
    /// Normalise into a [`Stop`].
    pub fn into_stop(self) -> Stop {
        let context = format!("stop {}", self.id);
        let time_window = resolve_window(
            self.tw_start.as_deref(),
            self.tw_end.as_deref(),
            &context,
        );
        Stop {
            id: self.id,
            location: Coordinate::new(self.lat, self.lng),
            name: self.name,
            demand: u32::try_from(self.demand.max(0)).unwrap_or(u32::MAX),
            time_window,
        }
    }
}

/// Full routing payload.
///
/// # Examples
/// ```
/// use courier_core::{Coordinate, RoutingInput, StopInput};
///
/// let input = RoutingInput {
///     depot: Coordinate::new(51.5072, -0.1276),
///     stops: vec![StopInput {
///         id: "A".into(),
///         lat: 51.51,
///         lng: -0.12,
///         demand: -2,
///         tw_start: Some("bogus".into()),
///         ..StopInput::default()
///     }],
///     vehicle_count: 0,
///     ..RoutingInput::default()
/// };
/// let request = input.into_request();
/// assert_eq!(request.fleet.vehicle_count(), 1);
/// assert_eq!(request.stops[0].demand, 0);
/// assert!(request.stops[0].time_window.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingInput {
    /// Depot location.
    pub depot: Coordinate,
    /// Stops in visiting-baseline order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stops: Vec<StopInput>,
    /// Number of vehicles.
    #[cfg_attr(feature = "serde", serde(default = "default_vehicle_count"))]
    pub vehicle_count: i64,
    /// Capacity per vehicle.
    #[cfg_attr(feature = "serde", serde(default = "default_vehicle_capacity"))]
    pub vehicle_capacity: i64,
    /// Depot opening as "HH:MM".
    #[cfg_attr(feature = "serde", serde(default))]
    pub depot_tw_start: Option<String>,
    /// Depot closing as "HH:MM".
    #[cfg_attr(feature = "serde", serde(default))]
    pub depot_tw_end: Option<String>,
}

const fn default_vehicle_count() -> i64 {
    1
}

const fn default_vehicle_capacity() -> i64 {
    10
}

impl Default for RoutingInput {
    fn default() -> Self {
        Self {
            depot: Coordinate::default(),
            stops: Vec::new(),
            vehicle_count: default_vehicle_count(),
            vehicle_capacity: default_vehicle_capacity(),
            depot_tw_start: None,
            depot_tw_end: None,
        }
    }
}

impl RoutingInput {
    /// Normalise into a [`RoutingRequest`].
    pub fn into_request(self) -> RoutingRequest {
        let depot_window = resolve_window(
            self.depot_tw_start.as_deref(),
            self.depot_tw_end.as_deref(),
            "depot",
        );
        let depot = Depot {
            location: self.depot,
            time_window: depot_window,
        };
        let stops = self.stops.into_iter().map(StopInput::into_stop).collect();
        RoutingRequest::new(
            depot,
            stops,
            Fleet::new(self.vehicle_count, self.vehicle_capacity),
        )
    }
}

fn resolve_window(start: Option<&str>, end: Option<&str>, context: &str) -> Option<TimeWindow> {
    let start_minutes = parse_hhmm_lenient(start, context);
    let end_minutes = parse_hhmm_lenient(end, context);
    if start_minutes.is_none() && end_minutes.is_none() {
        return None;
    }
    Some(TimeWindow::from_bounds(start_minutes, end_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stop_input(tw_start: Option<&str>, tw_end: Option<&str>) -> StopInput {
        StopInput {
            id: "s1".into(),
            lat: 51.5,
            lng: -0.1,
            tw_start: tw_start.map(str::to_owned),
            tw_end: tw_end.map(str::to_owned),
            ..StopInput::default()
        }
    }

    #[rstest]
    #[case(None, None, None)]
    #[case(Some("nan"), Some(""), None)]
    #[case(Some("09:00"), None, Some(TimeWindow { start: 540, end: 1440 }))]
    #[case(None, Some("17:30"), Some(TimeWindow { start: 0, end: 1050 }))]
    #[case(Some("9am"), Some("17:00"), Some(TimeWindow { start: 0, end: 1020 }))]
    fn stop_windows_resolve_against_horizon(
        #[case] tw_start: Option<&str>,
        #[case] tw_end: Option<&str>,
        #[case] expected: Option<TimeWindow>,
    ) {
        let stop = stop_input(tw_start, tw_end).into_stop();
        assert_eq!(stop.time_window, expected);
    }

    #[rstest]
    fn negative_demand_clamps_to_zero() {
        let stop = StopInput {
            demand: -5,
            ..stop_input(None, None)
        }
        .into_stop();
        assert_eq!(stop.demand, 0);
    }

    #[rstest]
    fn depot_window_is_parsed() {
        let input = RoutingInput {
            depot_tw_start: Some("08:00".into()),
            depot_tw_end: Some("18:00".into()),
            ..RoutingInput::default()
        };
        let request = input.into_request();
        assert_eq!(
            request.depot.time_window,
            Some(TimeWindow {
                start: 480,
                end: 1080
            })
        );
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_with_defaults() {
        let json = serde_json::json!({
            "depot": { "lat": 51.5072, "lng": -0.1276 },
            "stops": [
                { "id": "A", "lat": 51.51, "lng": -0.12, "demand": 3 },
                { "id": "B", "lat": 51.52, "lng": -0.13, "tw_start": "09:00", "tw_end": null }
            ]
        });
        let input: RoutingInput = serde_json::from_value(json).expect("valid payload");
        assert_eq!(input.vehicle_count, 1);
        assert_eq!(input.vehicle_capacity, 10);
        let request = input.into_request();
        assert_eq!(request.stops.len(), 2);
        assert_eq!(request.stops[0].demand, 3);
        assert_eq!(
            request.stops[1].time_window,
            Some(TimeWindow {
                start: 540,
                end: 1440
            })
        );
    }
}
