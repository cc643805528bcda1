//! Port definitions for the application layer
//!
//! Ports are the interfaces through which the pipeline reaches external
//! systems. Integration crates implement them.

mod forecast_port;
mod mailer_port;

pub use forecast_port::{ForecastError, ForecastPort};
#[cfg(test)]
pub use forecast_port::MockForecastPort;
pub use mailer_port::{AlertMessage, DeliveryError, MailerPort};
#[cfg(test)]
pub use mailer_port::MockMailerPort;
