//! Alert service
//!
//! Orchestrates the pipeline: fetch hourly wind, judge days, find runs,
//! and send one alert email when a run is long enough. Stateless across
//! invocations; a day judged good today may be judged differently
//! tomorrow as the forecast updates.

use std::sync::Arc;

use domain::{AlertCriteria, ConsecutiveRun, EmailAddress, find_runs, judge_days};
use tracing::{debug, info, instrument};

use super::report;
use crate::{
    error::ApplicationError,
    ports::{AlertMessage, ForecastPort, MailerPort},
};

/// Terminal outcome of one pipeline invocation
#[derive(Debug, Clone)]
pub enum AlertOutcome {
    /// Qualifying runs found and the alert email was dispatched
    Notified {
        runs: Vec<ConsecutiveRun>,
        report: String,
    },
    /// Qualifying runs found, but dry-run suppressed the send
    DryRun {
        runs: Vec<ConsecutiveRun>,
        report: String,
    },
    /// No qualifying runs; nothing was sent
    NoQualifyingRuns { report: String },
}

impl AlertOutcome {
    /// The rendered forecast report for this invocation
    #[must_use]
    pub fn report(&self) -> &str {
        match self {
            Self::Notified { report, .. }
            | Self::DryRun { report, .. }
            | Self::NoQualifyingRuns { report } => report,
        }
    }

    /// Whether an email was actually dispatched
    #[must_use]
    pub const fn notified(&self) -> bool {
        matches!(self, Self::Notified { .. })
    }
}

/// The fetch-analyze-notify pipeline
pub struct AlertService {
    forecast: Arc<dyn ForecastPort>,
    mailer: Arc<dyn MailerPort>,
    criteria: AlertCriteria,
    recipient: EmailAddress,
}

impl std::fmt::Debug for AlertService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertService")
            .field("criteria", &self.criteria)
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

impl AlertService {
    /// Create a new service over the given ports
    #[must_use]
    pub fn new(
        forecast: Arc<dyn ForecastPort>,
        mailer: Arc<dyn MailerPort>,
        criteria: AlertCriteria,
        recipient: EmailAddress,
    ) -> Self {
        Self {
            forecast,
            mailer,
            criteria,
            recipient,
        }
    }

    /// Run the pipeline once
    ///
    /// Performs at most one forecast fetch and at most one email send.
    /// With `dry_run` set, the send is suppressed and the report is
    /// returned for printing instead.
    ///
    /// # Errors
    ///
    /// Propagates fetch, parse, and delivery failures; none are retried.
    #[instrument(skip(self), fields(location = %self.criteria.location))]
    pub async fn run(&self, dry_run: bool) -> Result<AlertOutcome, ApplicationError> {
        let samples = self
            .forecast
            .hourly_wind(self.criteria.location, self.criteria.forecast_days)
            .await?;
        debug!(samples = samples.len(), "Forecast fetched");

        let verdicts = judge_days(&samples, &self.criteria);
        let runs = find_runs(&verdicts, self.criteria.required_consecutive_days);
        let report = report::render_report(&verdicts, &runs, &self.criteria);

        if runs.is_empty() {
            info!(days = verdicts.len(), "No qualifying runs in forecast window");
            return Ok(AlertOutcome::NoQualifyingRuns { report });
        }

        info!(runs = runs.len(), "Qualifying runs found");

        if dry_run {
            return Ok(AlertOutcome::DryRun { runs, report });
        }

        let message = AlertMessage::new(
            self.recipient.clone(),
            report::subject(&self.criteria),
            report.clone(),
        );
        self.mailer.send(&message).await?;
        info!(recipient = %self.recipient, "Alert email sent");

        Ok(AlertOutcome::Notified { runs, report })
    }
}
