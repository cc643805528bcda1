//! Application configuration
//!
//! Layered configuration: built-in defaults (the Hel Peninsula spot and
//! its usual alert thresholds), an optional `config.toml`, then
//! `WINDWATCH__*` environment overrides. Everything is validated here,
//! before any network call.

use application::ApplicationError;
use domain::{AlertCriteria, EmailAddress, GeoLocation, Timezone, WindSpeed};
use integration_smtp::SmtpConfig;
use integration_weather::WeatherConfig;
use serde::Deserialize;

/// Forecast point coordinates
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

/// Alert thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    pub min_wind_knots: f64,
    pub max_wind_knots: f64,
    pub min_hours_per_day: u32,
    pub required_consecutive_days: u32,
    pub forecast_days: u8,
}

/// SMTP transport settings; only required when actually sending
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSection {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub from: String,
}

const fn default_smtp_port() -> u16 {
    587
}

/// Alert recipient
#[derive(Debug, Clone, Deserialize)]
pub struct EmailSection {
    pub to: String,
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub location: LocationConfig,
    pub alert: AlertConfig,
    pub timezone: String,

    /// Open-Meteo client settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// SMTP settings (optional in dry-run mode)
    #[serde(default)]
    pub smtp: Option<SmtpSection>,

    /// Recipient settings (optional in dry-run mode)
    #[serde(default)]
    pub email: Option<EmailSection>,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file, and environment
    ///
    /// Environment variables use the `WINDWATCH` prefix with `__` as the
    /// nesting separator, e.g. `WINDWATCH__SMTP__HOST` or
    /// `WINDWATCH__ALERT__MIN_WIND_KNOTS`.
    pub fn load(file: &str) -> Result<Self, config::ConfigError> {
        let builder = Self::defaults()?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("WINDWATCH")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Built-in defaults for the Hel Peninsula spot
    fn defaults() -> Result<
        config::builder::ConfigBuilder<config::builder::DefaultState>,
        config::ConfigError,
    > {
        config::Config::builder()
            .set_default("location.latitude", 54.6806)?
            .set_default("location.longitude", 18.5591)?
            .set_default("alert.min_wind_knots", 12.0)?
            .set_default("alert.max_wind_knots", 30.0)?
            .set_default("alert.min_hours_per_day", 6)?
            .set_default("alert.required_consecutive_days", 2)?
            .set_default("alert.forecast_days", 7)?
            .set_default("timezone", "Europe/Warsaw")
    }

    /// Build validated alert criteria
    ///
    /// # Errors
    ///
    /// Returns a domain error for out-of-range coordinates, an unknown
    /// timezone, or inconsistent thresholds.
    pub fn criteria(&self) -> Result<AlertCriteria, ApplicationError> {
        let location = GeoLocation::new(self.location.latitude, self.location.longitude)?;
        let timezone = Timezone::new(&self.timezone)?;

        let criteria = AlertCriteria::new(
            WindSpeed::from_knots(self.alert.min_wind_knots),
            WindSpeed::from_knots(self.alert.max_wind_knots),
            self.alert.min_hours_per_day,
            self.alert.required_consecutive_days,
            self.alert.forecast_days,
            location,
            timezone,
        )?;

        Ok(criteria)
    }

    /// Recipient address, if configured
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the recipient is missing or
    /// malformed.
    pub fn recipient(&self) -> Result<EmailAddress, ApplicationError> {
        let section = self.email.as_ref().ok_or_else(|| {
            ApplicationError::Configuration(
                "recipient not configured (set WINDWATCH__EMAIL__TO)".to_string(),
            )
        })?;
        EmailAddress::new(&section.to).map_err(ApplicationError::from)
    }

    /// Build the SMTP transport configuration and recipient
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the SMTP section or recipient
    /// is missing, or when an address fails validation.
    pub fn delivery(&self) -> Result<(SmtpConfig, EmailAddress), ApplicationError> {
        let smtp = self.smtp.as_ref().ok_or_else(|| {
            ApplicationError::Configuration(
                "SMTP not configured (set WINDWATCH__SMTP__HOST and WINDWATCH__SMTP__FROM)"
                    .to_string(),
            )
        })?;

        let from = EmailAddress::new(&smtp.from)?;
        let recipient = self.recipient()?;

        let config = SmtpConfig {
            host: smtp.host.clone(),
            port: smtp.port,
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            from,
        };

        Ok((config, recipient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> AppConfig {
        AppConfig::defaults()
            .and_then(|b| {
                b.add_source(config::File::from_str(toml, config::FileFormat::Toml))
                    .build()
            })
            .and_then(config::Config::try_deserialize)
            .expect("valid config")
    }

    #[test]
    fn built_in_defaults_cover_the_hel_spot() {
        let app = from_toml("");
        assert!((app.location.latitude - 54.6806).abs() < f64::EPSILON);
        assert!((app.alert.min_wind_knots - 12.0).abs() < f64::EPSILON);
        assert!((app.alert.max_wind_knots - 30.0).abs() < f64::EPSILON);
        assert_eq!(app.alert.min_hours_per_day, 6);
        assert_eq!(app.alert.required_consecutive_days, 2);
        assert_eq!(app.alert.forecast_days, 7);
        assert_eq!(app.timezone, "Europe/Warsaw");
        assert!(app.smtp.is_none());
        assert!(app.email.is_none());
    }

    #[test]
    fn default_criteria_are_valid() {
        let criteria = from_toml("").criteria().expect("valid criteria");
        assert_eq!(criteria.timezone.as_str(), "Europe/Warsaw");
        assert!((criteria.location.latitude() - 54.6806).abs() < f64::EPSILON);
    }

    #[test]
    fn file_values_override_defaults() {
        let app = from_toml(
            r#"
            timezone = "Europe/Lisbon"

            [alert]
            min_wind_knots = 14.0
            max_wind_knots = 22.0
            min_hours_per_day = 4
            required_consecutive_days = 3
            forecast_days = 10
            "#,
        );
        assert_eq!(app.timezone, "Europe/Lisbon");
        let criteria = app.criteria().expect("valid criteria");
        assert_eq!(criteria.required_consecutive_days, 3);
        assert_eq!(criteria.forecast_days, 10);
    }

    #[test]
    fn unknown_timezone_fails_before_any_network_call() {
        let app = from_toml("timezone = \"Atlantis/Lost\"");
        assert!(app.criteria().is_err());
    }

    #[test]
    fn inverted_wind_range_is_rejected() {
        let app = from_toml(
            r#"
            [alert]
            min_wind_knots = 30.0
            max_wind_knots = 12.0
            min_hours_per_day = 6
            required_consecutive_days = 2
            forecast_days = 7
            "#,
        );
        assert!(app.criteria().is_err());
    }

    #[test]
    fn delivery_requires_smtp_section() {
        let err = from_toml("").delivery().expect_err("missing smtp");
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn delivery_requires_recipient() {
        let app = from_toml(
            r#"
            [smtp]
            host = "smtp.example.com"
            from = "alerts@example.com"
            "#,
        );
        let err = app.delivery().expect_err("missing recipient");
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn full_delivery_config_is_accepted() {
        let app = from_toml(
            r#"
            [smtp]
            host = "smtp.example.com"
            username = "alerts"
            password = "secret"
            from = "alerts@example.com"

            [email]
            to = "rider@example.com"
            "#,
        );
        let (smtp, recipient) = app.delivery().expect("valid delivery config");
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 587);
        assert!(smtp.has_credentials());
        assert_eq!(recipient.as_str(), "rider@example.com");
    }

    #[test]
    fn malformed_recipient_is_rejected() {
        let app = from_toml(
            r#"
            [email]
            to = "not-an-address"
            "#,
        );
        assert!(app.recipient().is_err());
    }
}
