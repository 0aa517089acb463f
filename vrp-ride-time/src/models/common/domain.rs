use crate::models::common::Timestamp;
use crate::utils::compare_floats;
use std::cmp::Ordering;

/// An index of a location in routing data.
pub type Location = usize;

/// Selects routing data used by a vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    /// An index of routing matrix.
    pub index: usize,
    /// A multiplier applied to travel durations.
    pub scale: f64,
}

impl Profile {
    /// Creates a profile, scale defaults to one.
    pub fn new(index: usize, scale: Option<f64>) -> Profile {
        Self { index, scale: scale.unwrap_or(1.) }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new(0, None)
    }
}

/// A time interval, both ends inclusive.
#[derive(Clone, Debug)]
pub struct TimeWindow {
    /// Interval start.
    pub start: Timestamp,
    /// Interval end.
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a new [`TimeWindow`].
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns a window which does not restrict time.
    pub fn max() -> Self {
        Self::new(0., f64::MAX)
    }
}

impl PartialEq for TimeWindow {
    fn eq(&self, other: &TimeWindow) -> bool {
        compare_floats(self.start, other.start) == Ordering::Equal && compare_floats(self.end, other.end) == Ordering::Equal
    }
}

impl Eq for TimeWindow {}

/// Arrival and departure times at a stop.
#[derive(Clone, Debug)]
pub struct Schedule {
    /// Arrival time.
    pub arrival: Timestamp,
    /// Departure time.
    pub departure: Timestamp,
}

impl Schedule {
    /// Creates a new [`Schedule`].
    pub fn new(arrival: Timestamp, departure: Timestamp) -> Self {
        Self { arrival, departure }
    }
}
