//! Great-circle distance between geographic coordinates.
//!
//! Distances are computed with the haversine formula over a spherical Earth
//! and reported in statute miles. Inputs are not validated: `NaN` or
//! out-of-range degrees propagate into the result rather than raising.

use geo::Coord;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Conversion factor from kilometres to statute miles.
pub const MILES_PER_KM: f64 = 0.621_371;

/// A latitude/longitude pair in decimal degrees.
///
/// # Examples
/// ```
/// use courier_core::Coordinate;
///
/// let london = Coordinate::new(51.5072, -0.1276);
/// assert_eq!(london.lat, 51.5072);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

/// Haversine distance between `a` and `b` in miles.
///
/// The result is symmetric and zero when both points coincide.
///
/// # Examples
/// ```
/// use courier_core::{Coordinate, haversine_miles};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(1.0, 0.0);
/// let miles = haversine_miles(a, b);
/// assert!((miles - 69.09).abs() < 0.1);
/// ```
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let km = 2.0 * EARTH_RADIUS_KM * h.sqrt().asin();

    km * MILES_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_point_is_zero() {
        let point = Coordinate::new(51.5072, -0.1276);
        assert_eq!(haversine_miles(point, point), 0.0);
    }

    #[rstest]
    #[case(Coordinate::new(51.5072, -0.1276), Coordinate::new(48.8566, 2.3522))]
    #[case(Coordinate::new(36.17, -115.14), Coordinate::new(34.05, -118.24))]
    #[case(Coordinate::new(-33.87, 151.21), Coordinate::new(35.68, 139.69))]
    fn distance_is_symmetric(#[case] a: Coordinate, #[case] b: Coordinate) {
        assert_eq!(haversine_miles(a, b), haversine_miles(b, a));
    }

    #[rstest]
    fn one_degree_of_latitude_is_about_69_miles() {
        let miles = haversine_miles(Coordinate::new(10.0, 20.0), Coordinate::new(11.0, 20.0));
        assert!((miles - 69.0).abs() < 0.2, "got {miles}");
    }

    #[rstest]
    fn london_to_paris_is_about_213_miles() {
        let miles = haversine_miles(
            Coordinate::new(51.5072, -0.1276),
            Coordinate::new(48.8566, 2.3522),
        );
        assert!(miles > 205.0 && miles < 220.0, "got {miles}");
    }

    #[rstest]
    fn nan_propagates() {
        let miles = haversine_miles(Coordinate::new(f64::NAN, 0.0), Coordinate::new(1.0, 1.0));
        assert!(miles.is_nan());
    }

    #[rstest]
    fn converts_to_geo_coord_as_lng_lat() {
        let coord: Coord<f64> = Coordinate::new(51.0, -1.0).into();
        assert_eq!(coord, Coord { x: -1.0, y: 51.0 });
        assert_eq!(Coordinate::from(coord), Coordinate::new(51.0, -1.0));
    }
}
