//! Timezone value object
//!
//! An IANA timezone name validated against the chrono-tz database. Day
//! grouping depends on this being a real zone, so unknown names are
//! rejected at construction rather than at analysis time.

use std::{fmt, str::FromStr};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated IANA timezone identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(Tz);

impl Timezone {
    /// Create a new timezone from an IANA name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownTimezone` if the name is not in the
    /// IANA database.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Tz::from_str(name)
            .map(Self)
            .map_err(|_| DomainError::UnknownTimezone(name.to_string()))
    }

    /// Get the underlying chrono-tz timezone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Get the timezone name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }

    /// UTC timezone
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }

    /// Europe/Warsaw, the default zone for the Hel Peninsula spot
    #[must_use]
    pub const fn warsaw() -> Self {
        Self(Tz::Europe__Warsaw)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for Timezone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        tz.as_str().to_string()
    }
}
