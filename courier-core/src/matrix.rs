//! All-pairs distance matrix over the depot and stops.
//!
//! Row and column `0` is the depot; index `i + 1` is `request.stops[i]`.
//! Cells hold plain miles. Solvers that need integer costs read the scaled
//! view in thousandths of a mile.

use crate::geodesy::{Coordinate, haversine_miles};

/// Scaled distance units per mile.
pub const MILLI_MILES_PER_MILE: i64 = 1000;

/// Assumed average travel speed used to derive transit times.
pub const AVERAGE_SPEED_MPH: i64 = 20;

/// Square matrix of great-circle distances.
///
/// # Examples
/// ```
/// use courier_core::{Coordinate, DistanceMatrix};
///
/// let matrix = DistanceMatrix::from_points(&[
///     Coordinate::new(51.5072, -0.1276),
///     Coordinate::new(51.51, -0.12),
/// ]);
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.milli_miles(0, 0), 0);
/// assert_eq!(matrix.milli_miles(0, 1), matrix.milli_miles(1, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    miles: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build the matrix for `points` in the given order.
    pub fn from_points(points: &[Coordinate]) -> Self {
        let miles = points
            .iter()
            .enumerate()
            .map(|(i, from)| {
                points
                    .iter()
                    .enumerate()
                    .map(|(j, to)| if i == j { 0.0 } else { haversine_miles(*from, *to) })
                    .collect()
            })
            .collect();
        Self { miles }
    }

    /// Number of points (depot included).
    pub fn len(&self) -> usize {
        self.miles.len()
    }

    /// Whether the matrix has no points.
    pub fn is_empty(&self) -> bool {
        self.miles.is_empty()
    }

    /// Distance in miles from point `from` to point `to`.
    ///
    /// Out-of-range indices read as zero.
    pub fn miles(&self, from: usize, to: usize) -> f64 {
        self.miles
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0.0)
    }

    /// Distance in thousandths of a mile, rounded to the nearest unit.
    ///
    /// Non-finite distances read as zero.
    pub fn milli_miles(&self, from: usize, to: usize) -> i64 {
        let scaled = (self.miles(from, to) * 1000.0).round();
        if scaled.is_finite() { scaled as i64 } else { 0 }
    }

    /// Whole minutes needed to cover the scaled distance at
    /// [`AVERAGE_SPEED_MPH`], rounded down.
    pub fn transit_minutes(&self, from: usize, to: usize) -> u32 {
        transit_minutes(self.milli_miles(from, to))
    }

    /// Total miles along `path`, a sequence of matrix indices.
    pub fn path_miles(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .map(|leg| match leg {
                [from, to] => self.miles(*from, *to),
                _ => 0.0,
            })
            .sum()
    }
}

/// Minutes to travel `milli_miles` at [`AVERAGE_SPEED_MPH`], rounded down.
///
/// # Examples
/// ```
/// use courier_core::transit_minutes;
///
/// // Twenty miles at twenty miles per hour.
/// assert_eq!(transit_minutes(20_000), 60);
/// ```
pub fn transit_minutes(milli_miles: i64) -> u32 {
    let minutes = milli_miles.max(0).saturating_mul(60) / (MILLI_MILES_PER_MILE * AVERAGE_SPEED_MPH);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
