//! Consecutive good-day run

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A maximal span of consecutive good days
///
/// Invariant: `start_date <= end_date`, and every day in the span was
/// judged good by the analyzer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveRun {
    /// First good day of the run
    pub start_date: NaiveDate,
    /// Last good day of the run (inclusive)
    pub end_date: NaiveDate,
}

impl ConsecutiveRun {
    /// Create a run spanning `start_date..=end_date`
    #[must_use]
    pub const fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Number of days in the run (`end - start + 1`)
    #[must_use]
    pub fn len(&self) -> u32 {
        u32::try_from((self.end_date - self.start_date).num_days() + 1).unwrap_or(0)
    }

    /// Whether the run is empty (never true for a well-formed run)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end_date < self.start_date
    }
}

impl std::fmt::Display for ConsecutiveRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {} ({} days)",
            self.start_date,
            self.end_date,
            self.len()
        )
    }
}
