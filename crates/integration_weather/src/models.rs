//! Raw Open-Meteo response models

use serde::Deserialize;

/// Raw hourly data block
///
/// `time` and `wind_speed_10m` are parallel arrays; a null wind entry
/// means the provider has no value for that hour.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    pub wind_speed_10m: Vec<Option<f64>>,
}

/// Raw API response
///
/// Only the hourly block is read; echo fields such as `latitude` and
/// `generationtime_ms` are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub hourly: Option<HourlyData>,
}
