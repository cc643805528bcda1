//! Wind speed value object
//!
//! Wind speeds are carried in knots throughout the domain; the forecast
//! provider delivers metres per second, so the conversion lives here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conversion factor from metres per second to knots
const KNOTS_PER_MPS: f64 = 1.943_844_49;

/// A wind speed in knots
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindSpeed(f64);

impl WindSpeed {
    /// Create a wind speed from knots
    #[must_use]
    pub const fn from_knots(knots: f64) -> Self {
        Self(knots)
    }

    /// Create a wind speed from metres per second
    #[must_use]
    pub fn from_meters_per_second(mps: f64) -> Self {
        Self(mps * KNOTS_PER_MPS)
    }

    /// Get the speed in knots
    #[must_use]
    pub const fn knots(&self) -> f64 {
        self.0
    }

    /// Whether this speed lies within the inclusive range [min, max]
    #[must_use]
    pub fn is_within(&self, min: Self, max: Self) -> bool {
        self.0 >= min.0 && self.0 <= max.0
    }
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} kn", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mps_conversion_matches_factor() {
        let speed = WindSpeed::from_meters_per_second(10.0);
        assert!((speed.knots() - 19.438_444_9).abs() < 1e-6);
    }

    #[test]
    fn zero_converts_to_zero() {
        assert!(WindSpeed::from_meters_per_second(0.0).knots().abs() < f64::EPSILON);
    }

    #[test]
    fn range_check_is_inclusive_on_both_bounds() {
        let min = WindSpeed::from_knots(12.0);
        let max = WindSpeed::from_knots(30.0);

        assert!(WindSpeed::from_knots(12.0).is_within(min, max));
        assert!(WindSpeed::from_knots(30.0).is_within(min, max));
        assert!(WindSpeed::from_knots(20.0).is_within(min, max));
        assert!(!WindSpeed::from_knots(11.999).is_within(min, max));
        assert!(!WindSpeed::from_knots(30.001).is_within(min, max));
    }

    #[test]
    fn display_shows_knots() {
        assert_eq!(format!("{}", WindSpeed::from_knots(14.25)), "14.2 kn");
    }

    #[test]
    fn ordering_works() {
        assert!(WindSpeed::from_knots(10.0) < WindSpeed::from_knots(11.0));
    }
}
