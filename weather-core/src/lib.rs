//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration for the Open-Meteo endpoints
//! - The geocode -> current weather -> forecast fetch pipeline
//! - WMO weather-code classification for display
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or
//! frontends.

pub mod classify;
pub mod config;
pub mod model;
pub mod provider;
pub mod session;

pub use classify::{Condition, Gradient};
pub use config::Config;
pub use model::{CurrentWeather, ForecastDay, GeoResult, RequestState};
pub use provider::{FetchError, WeatherProvider};
pub use session::WeatherSession;
