//! Alert criteria
//!
//! The user-configured thresholds read once at startup. All fields are
//! validated together in `new` so a bad configuration is caught before
//! any network call.

use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{GeoLocation, Timezone, WindSpeed},
};

/// Open-Meteo serves at most 16 forecast days
pub const MAX_FORECAST_DAYS: u8 = 16;

/// User-configured thresholds for judging forecast days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCriteria {
    /// Lower wind bound (inclusive)
    pub min_wind: WindSpeed,
    /// Upper wind bound (inclusive)
    pub max_wind: WindSpeed,
    /// Hours inside the wind range a day needs to be good
    pub min_hours_per_day: u32,
    /// Good days in a row required to trigger an alert
    pub required_consecutive_days: u32,
    /// Forecast window length in days
    pub forecast_days: u8,
    /// Forecast point
    pub location: GeoLocation,
    /// Timezone used to group hourly samples into calendar days
    pub timezone: Timezone,
}

impl AlertCriteria {
    /// Create validated criteria
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCriteria` when the wind range is
    /// inverted, the forecast window is outside 1..=16 days, or the
    /// required run length is zero.
    pub fn new(
        min_wind: WindSpeed,
        max_wind: WindSpeed,
        min_hours_per_day: u32,
        required_consecutive_days: u32,
        forecast_days: u8,
        location: GeoLocation,
        timezone: Timezone,
    ) -> Result<Self, DomainError> {
        if min_wind > max_wind {
            return Err(DomainError::InvalidCriteria(format!(
                "min_wind ({min_wind}) is above max_wind ({max_wind})"
            )));
        }
        if forecast_days == 0 || forecast_days > MAX_FORECAST_DAYS {
            return Err(DomainError::InvalidCriteria(format!(
                "forecast_days must be 1-{MAX_FORECAST_DAYS}, got {forecast_days}"
            )));
        }
        if required_consecutive_days == 0 {
            return Err(DomainError::InvalidCriteria(
                "required_consecutive_days must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            min_wind,
            max_wind,
            min_hours_per_day,
            required_consecutive_days,
            forecast_days,
            location,
            timezone,
        })
    }
}
