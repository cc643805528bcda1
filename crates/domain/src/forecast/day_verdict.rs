//! Per-day judgment of forecast conditions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Judgment of one calendar day: how many forecast hours fell inside the
/// configured wind range, and whether that was enough
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayVerdict {
    /// Calendar day in the configured timezone
    pub date: NaiveDate,
    /// Count of hours with wind inside [min_wind, max_wind]
    pub hours_in_range: u32,
    /// Whether `hours_in_range` met the configured minimum
    pub is_good: bool,
}

impl DayVerdict {
    /// Create a verdict
    #[must_use]
    pub const fn new(date: NaiveDate, hours_in_range: u32, is_good: bool) -> Self {
        Self {
            date,
            hours_in_range,
            is_good,
        }
    }
}
