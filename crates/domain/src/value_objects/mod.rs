//! Value Objects - Immutable, identity-less domain primitives

mod email_address;
mod geo_location;
mod timezone;
mod wind_speed;

pub use email_address::EmailAddress;
pub use geo_location::GeoLocation;
pub use timezone::Timezone;
pub use wind_speed::WindSpeed;
