//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Latitude or longitude outside valid bounds
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Timezone name not found in the IANA database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Alert criteria are internally inconsistent
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),
}
