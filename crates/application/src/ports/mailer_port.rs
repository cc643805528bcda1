//! Mailer port
//!
//! Interface for dispatching the alert email. Implemented by the SMTP
//! mailer in `integration_smtp`.

use async_trait::async_trait;
use domain::EmailAddress;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mail delivery errors
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// TCP/TLS connection to the mail server failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Server rejected the configured credentials
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Server rejected the message or the SMTP dialogue failed
    #[error("Delivery rejected: {0}")]
    Rejected(String),
}

/// A composed alert message ready for dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertMessage {
    /// Recipient address
    pub to: EmailAddress,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl AlertMessage {
    /// Create a new message
    pub fn new(to: EmailAddress, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Mail transport port
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MailerPort: Send + Sync {
    /// Send one message; no internal retries
    async fn send(&self, message: &AlertMessage) -> Result<(), DeliveryError>;
}
