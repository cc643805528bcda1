//! Hourly forecast sample

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::WindSpeed;

/// One hourly wind-speed observation from the forecast provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Forecast hour (UTC)
    pub time: DateTime<Utc>,
    /// Predicted wind speed
    pub wind: WindSpeed,
}

impl HourlySample {
    /// Create a new sample
    #[must_use]
    pub const fn new(time: DateTime<Utc>, wind: WindSpeed) -> Self {
        Self { time, wind }
    }
}
