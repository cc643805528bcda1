//! Forecast analysis core
//!
//! Types and pure functions for judging forecast days and finding runs of
//! consecutive good days.

mod analysis;
mod consecutive_run;
mod criteria;
mod day_verdict;
mod sample;

pub use analysis::{find_runs, judge_days, local_date};
pub use consecutive_run::ConsecutiveRun;
pub use criteria::{AlertCriteria, MAX_FORECAST_DAYS};
pub use day_verdict::DayVerdict;
pub use sample::HourlySample;
