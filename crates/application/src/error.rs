//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::ports::{DeliveryError, ForecastError};

/// Errors that can occur while running the alert pipeline
///
/// All of these are terminal for the current invocation: nothing is
/// retried internally, the external scheduler re-runs on its next tick.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Missing or invalid configuration, detected before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Forecast fetch or parse failed
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Alert email could not be delivered
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}
