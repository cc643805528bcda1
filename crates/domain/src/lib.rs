//! Domain layer for WindWatch
//!
//! Contains the forecast-analysis core, value objects, and domain errors.
//! This layer performs no I/O; everything here is a pure function of its
//! inputs.

pub mod errors;
pub mod forecast;
pub mod value_objects;

pub use errors::DomainError;
pub use forecast::*;
pub use value_objects::*;
