//! Application layer for WindWatch
//!
//! Defines the ports the pipeline needs (forecast provider, mailer) and
//! the alert service that orchestrates fetch, analysis, and notification.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{AlertMessage, DeliveryError, ForecastError, ForecastPort, MailerPort};
pub use services::{AlertOutcome, AlertService};
