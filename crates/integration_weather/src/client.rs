//! Open-Meteo client
//!
//! HTTP client for the Open-Meteo forecast API. One request per pipeline
//! invocation; wind is requested in m/s and converted to knots at the
//! domain boundary.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use domain::{GeoLocation, HourlySample, WindSpeed};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use application::ports::{ForecastError, ForecastPort};

use crate::models::{ApiResponse, HourlyData};

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    15
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Open-Meteo HTTP client
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, ForecastError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ForecastError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ForecastError> {
        Self::new(WeatherConfig::default())
    }

    /// Build the API URL for an hourly wind request
    ///
    /// Timestamps are requested in UTC so day grouping stays an explicit
    /// domain-side conversion.
    fn build_hourly_url(&self, location: GeoLocation, days: u8) -> String {
        let days = days.clamp(1, 16);
        format!(
            "{}/forecast?latitude={}&longitude={}&hourly=wind_speed_10m&wind_speed_unit=ms&timezone=UTC&forecast_days={days}",
            self.config.base_url,
            location.latitude(),
            location.longitude(),
        )
    }

    /// Turn the raw hourly block into ordered samples
    ///
    /// Null wind entries are skipped; mismatched array lengths or an
    /// empty block are malformed responses.
    fn parse_samples(hourly: &HourlyData) -> Result<Vec<HourlySample>, ForecastError> {
        if hourly.time.is_empty() {
            return Err(ForecastError::ParseError(
                "no hourly wind data available".to_string(),
            ));
        }
        if hourly.time.len() != hourly.wind_speed_10m.len() {
            return Err(ForecastError::ParseError(format!(
                "hourly arrays disagree: {} times vs {} wind values",
                hourly.time.len(),
                hourly.wind_speed_10m.len()
            )));
        }

        let mut samples = Vec::with_capacity(hourly.time.len());
        for (time_str, wind) in hourly.time.iter().zip(&hourly.wind_speed_10m) {
            let Some(mps) = wind else { continue };
            let time = Self::parse_datetime(time_str)?;
            samples.push(HourlySample::new(
                time,
                WindSpeed::from_meters_per_second(*mps),
            ));
        }

        if samples.is_empty() {
            return Err(ForecastError::ParseError(
                "no hourly wind data available".to_string(),
            ));
        }

        Ok(samples)
    }

    /// Parse an Open-Meteo timestamp (UTC, because we requested UTC)
    fn parse_datetime(s: &str) -> Result<DateTime<Utc>, ForecastError> {
        // Open-Meteo serves minute precision (2026-08-25T14:00)
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Utc.from_utc_datetime(&dt));
        }

        Err(ForecastError::ParseError(format!(
            "invalid datetime format: {s}"
        )))
    }
}

#[async_trait]
impl ForecastPort for OpenMeteoClient {
    #[instrument(skip(self), fields(location = %location, days = %days))]
    async fn hourly_wind(
        &self,
        location: GeoLocation,
        days: u8,
    ) -> Result<Vec<HourlySample>, ForecastError> {
        let url = self.build_hourly_url(location, days);
        debug!(url = %url, "Fetching hourly wind forecast");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ForecastError::ConnectionFailed(e.to_string())
                } else {
                    ForecastError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ForecastError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(ForecastError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(ForecastError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ForecastError::ParseError(e.to_string()))?;

        let hourly = api_response.hourly.ok_or_else(|| {
            ForecastError::ParseError("no hourly block in response".to_string())
        })?;

        let samples = Self::parse_samples(&hourly)?;
        debug!(samples = samples.len(), "Forecast parsed");
        Ok(samples)
    }
}
