use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single match from the geocoding search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoResult {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Instantaneous conditions for a resolved city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    /// °C
    pub temperature: f64,
    /// km/h
    pub windspeed: f64,
    /// Degrees, meteorological convention.
    pub winddirection: f64,
    /// WMO weather code.
    pub weathercode: i32,
}

/// One day of the daily forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub weathercode: i32,
    pub temperature_min: f64,
    pub temperature_max: f64,
}

/// Lifecycle of a single fetch cycle.
///
/// Weather and forecast results are only populated alongside `Success`;
/// every failure clears both and carries its message here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Loading,
    Success,
    Error(String),
}
