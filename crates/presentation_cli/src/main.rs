//! WindWatch CLI
//!
//! One invocation runs the whole pipeline: fetch the hourly wind
//! forecast, judge each day, look for consecutive good-day runs, and
//! send (or, with `--dry-run`, print) the alert. Scheduling is left to
//! cron or a similar external scheduler.

#![allow(clippy::print_stdout)]

mod config;

use std::sync::Arc;

use anyhow::Context;
use application::{
    AlertOutcome, AlertService,
    ports::{AlertMessage, DeliveryError, ForecastPort, MailerPort},
};
use async_trait::async_trait;
use clap::Parser;
use domain::EmailAddress;
use integration_smtp::SmtpMailer;
use integration_weather::OpenMeteoClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

/// WindWatch CLI
#[derive(Parser)]
#[command(name = "windwatch")]
#[command(author, version, about = "Wind forecast alert pipeline", long_about = None)]
struct Cli {
    /// Print the forecast report instead of sending the alert email
    #[arg(long)]
    dry_run: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (extension inferred; missing file is fine)
    #[arg(short, long, default_value = "config")]
    config: String,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Stand-in mailer for dry-run mode; the service never invokes it
#[derive(Debug)]
struct DryRunMailer;

#[async_trait]
impl MailerPort for DryRunMailer {
    async fn send(&self, _message: &AlertMessage) -> Result<(), DeliveryError> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = log_filter_from_verbosity(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_config = AppConfig::load(&cli.config).context("loading configuration")?;
    let criteria = app_config.criteria()?;
    tracing::debug!(location = %criteria.location, timezone = %criteria.timezone, "Configuration loaded");

    let forecast: Arc<dyn ForecastPort> =
        Arc::new(OpenMeteoClient::new(app_config.weather.clone())?);

    let (mailer, recipient): (Arc<dyn MailerPort>, EmailAddress) = if cli.dry_run {
        // A configured recipient is shown in dry-run output when present,
        // but is not required to preview the forecast.
        let recipient = app_config
            .recipient()
            .or_else(|_| EmailAddress::new("dry-run@example.invalid"))?;
        (Arc::new(DryRunMailer), recipient)
    } else {
        let (smtp_config, recipient) = app_config.delivery()?;
        (Arc::new(SmtpMailer::new(smtp_config)), recipient)
    };

    let service = AlertService::new(forecast, mailer, criteria, recipient.clone());
    let outcome = service.run(cli.dry_run).await?;

    match &outcome {
        AlertOutcome::Notified { runs, .. } => {
            println!(
                "Alert email sent to {recipient} ({} matching run{}).",
                runs.len(),
                if runs.len() == 1 { "" } else { "s" }
            );
        },
        AlertOutcome::DryRun { .. } | AlertOutcome::NoQualifyingRuns { .. } => {
            println!("{}", outcome.report());
        },
    }

    Ok(())
}
