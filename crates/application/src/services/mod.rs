//! Application services - the alert pipeline

mod alert_service;
mod report;

pub use alert_service::{AlertOutcome, AlertService};
pub use report::{render_report, subject};
