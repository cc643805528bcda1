//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Weather API (<https://open-meteo.com>).
//! Fetches hourly wind-speed forecasts without requiring an API key.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherConfig};
pub use models::{ApiResponse, HourlyData};
