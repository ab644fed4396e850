//! "HH:MM" time-window parsing and the rolling 24-hour horizon.
//!
//! Times are minute offsets from midnight. An absent bound is unconstrained
//! and resolves against the horizon `[0, 1440]`.

use thiserror::Error;

/// Minutes since midnight.
pub type Minutes = u32;

/// Length of the planning horizon in minutes.
pub const HORIZON_MINUTES: Minutes = 24 * 60;

/// Errors from [`parse_hhmm`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeWindowFormatError {
    /// The text did not split into exactly two `:`-separated parts.
    #[error("expected HH:MM, found {0:?}")]
    MissingSeparator(String),
    /// A component was not a non-negative integer.
    #[error("{component} in {text:?} is not a number")]
    NotANumber {
        /// Which component failed (`hour` or `minute`).
        component: &'static str,
        /// The original input.
        text: String,
    },
    /// A component was outside its clock range.
    #[error("{0:?} is not a valid time of day")]
    OutOfRange(String),
}

/// Parse an optional "HH:MM" string into minutes since midnight.
///
/// Empty, whitespace-only and `nan` inputs mean "no constraint" and yield
/// `Ok(None)`. Single-digit components are accepted.
///
/// # Examples
/// ```
/// use courier_core::parse_hhmm;
///
/// assert_eq!(parse_hhmm(Some("08:00")), Ok(Some(480)));
/// assert_eq!(parse_hhmm(Some("8:5")), Ok(Some(485)));
/// assert_eq!(parse_hhmm(Some("nan")), Ok(None));
/// assert_eq!(parse_hhmm(None), Ok(None));
/// assert!(parse_hhmm(Some("noon")).is_err());
/// ```
pub fn parse_hhmm(text: Option<&str>) -> Result<Option<Minutes>, TimeWindowFormatError> {
    let Some(raw) = text else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    let mut parts = trimmed.split(':');
    let (Some(hour), Some(minute), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(TimeWindowFormatError::MissingSeparator(trimmed.to_owned()));
    };

    let hour = parse_component(hour, "hour", trimmed)?;
    let minute = parse_component(minute, "minute", trimmed)?;
    if hour >= 24 || minute >= 60 {
        return Err(TimeWindowFormatError::OutOfRange(trimmed.to_owned()));
    }
    Ok(Some(hour * 60 + minute))
}

fn parse_component(
    value: &str,
    component: &'static str,
    text: &str,
) -> Result<Minutes, TimeWindowFormatError> {
    value
        .trim()
        .parse::<Minutes>()
        .map_err(|_| TimeWindowFormatError::NotANumber {
            component,
            text: text.to_owned(),
        })
}

/// Parse a time bound, substituting "unconstrained" for malformed input.
///
/// The failure is logged at `warn` level with `context` so callers can trace
/// which field was discarded.
pub fn parse_hhmm_lenient(text: Option<&str>, context: &str) -> Option<Minutes> {
    match parse_hhmm(text) {
        Ok(minutes) => minutes,
        Err(err) => {
            log::warn!("ignoring time window for {context}: {err}");
            None
        }
    }
}

/// An allowed visit interval in minutes since midnight.
///
/// # Examples
/// ```
/// use courier_core::{HORIZON_MINUTES, TimeWindow};
///
/// let window = TimeWindow::from_bounds(Some(480), None);
/// assert_eq!(window.start, 480);
/// assert_eq!(window.end, HORIZON_MINUTES);
/// assert!(window.contains(600));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    /// Earliest visit minute.
    pub start: Minutes,
    /// Latest visit minute.
    pub end: Minutes,
}

impl TimeWindow {
    /// A window spanning the whole horizon.
    pub const UNCONSTRAINED: Self = Self {
        start: 0,
        end: HORIZON_MINUTES,
    };

    /// Build a window from optional bounds, filling gaps from the horizon.
    pub fn from_bounds(start: Option<Minutes>, end: Option<Minutes>) -> Self {
        Self {
            start: start.unwrap_or(0),
            end: end.unwrap_or(HORIZON_MINUTES),
        }
    }

    /// Whether `minute` falls inside the window, bounds included.
    pub const fn contains(&self, minute: Minutes) -> bool {
        self.start <= minute && minute <= self.end
    }

    /// Whether the window narrows the horizon at all.
    pub const fn is_constrained(&self) -> bool {
        self.start > 0 || self.end < HORIZON_MINUTES
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::UNCONSTRAINED
    }
}
