//! SMTP integration
//!
//! Raw-protocol SMTP mailer for alert delivery. Supports implicit TLS
//! (port 465) and STARTTLS, with optional AUTH PLAIN.

mod client;

use domain::EmailAddress;
use serde::{Deserialize, Serialize};

pub use client::SmtpMailer;

/// SMTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Mail server hostname
    pub host: String,

    /// Mail server port (default: 587, STARTTLS; 465 switches to implicit TLS)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Username for AUTH PLAIN; authentication is skipped when absent
    #[serde(default)]
    pub username: Option<String>,

    /// Password for AUTH PLAIN
    #[serde(default)]
    pub password: Option<String>,

    /// Sender address
    pub from: EmailAddress,
}

const fn default_port() -> u16 {
    587
}

impl SmtpConfig {
    /// Whether this configuration carries credentials
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(username: Option<&str>, password: Option<&str>) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: username.map(String::from),
            password: password.map(String::from),
            from: EmailAddress::new("alerts@example.com").expect("valid email"),
        }
    }

    #[test]
    fn credentials_require_both_fields() {
        assert!(config(Some("user"), Some("pass")).has_credentials());
        assert!(!config(Some("user"), None).has_credentials());
        assert!(!config(None, Some("pass")).has_credentials());
        assert!(!config(None, None).has_credentials());
    }

    #[test]
    fn port_defaults_to_587() {
        let json = serde_json::json!({
            "host": "smtp.example.com",
            "from": "alerts@example.com"
        });
        let parsed: SmtpConfig = serde_json::from_value(json).expect("parse");
        assert_eq!(parsed.port, 587);
        assert!(parsed.username.is_none());
    }
}
