//! Forecast port
//!
//! Interface for fetching the hourly wind forecast. Implemented by the
//! Open-Meteo client in `integration_weather`.

use async_trait::async_trait;
use domain::{GeoLocation, HourlySample};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Forecast fetch errors
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Connection to the forecast service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request reached the service but came back non-success
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body was malformed or missing expected fields
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable (5xx)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Forecast provider port
///
/// One implementation call performs one outbound HTTP request; failures
/// surface to the caller without retries.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Fetch hourly wind samples for the next `days` days at `location`
    ///
    /// Samples are returned ordered by time ascending, timestamps in UTC.
    async fn hourly_wind(
        &self,
        location: GeoLocation,
        days: u8,
    ) -> Result<Vec<HourlySample>, ForecastError>;
}
