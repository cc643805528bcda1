//! Alert report formatting
//!
//! Renders the per-day summary and qualifying runs into the plain-text
//! body used both for the alert email and for `--dry-run` output.

use domain::{AlertCriteria, ConsecutiveRun, DayVerdict};

/// Subject line for the alert email
#[must_use]
pub fn subject(criteria: &AlertCriteria) -> String {
    format!("Wind alert: good forecast at {}", criteria.location)
}

/// Render the forecast report
///
/// Lists every judged day with its good-hour count, the configured
/// thresholds, and the qualifying runs (or a note that none were found).
#[must_use]
pub fn render_report(
    verdicts: &[DayVerdict],
    runs: &[ConsecutiveRun],
    criteria: &AlertCriteria,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Wind forecast for {} ({})",
        criteria.location, criteria.timezone
    ));
    lines.push(String::new());
    lines.push("Forecast summary (date: good hours):".to_string());
    for verdict in verdicts {
        let marker = if verdict.is_good { " *" } else { "" };
        lines.push(format!(
            " - {}: {}h{marker}",
            verdict.date, verdict.hours_in_range
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Thresholds: {:.0}-{:.0} knots, min {}h/day, {} consecutive days",
        criteria.min_wind.knots(),
        criteria.max_wind.knots(),
        criteria.min_hours_per_day,
        criteria.required_consecutive_days
    ));
    lines.push(String::new());

    if runs.is_empty() {
        lines.push("No qualifying runs found.".to_string());
    } else {
        lines.push("Matching runs:".to_string());
        for run in runs {
            lines.push(format!(" - {run}"));
        }
    }

    lines.join("\n")
}
