use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::model::{CurrentWeather, ForecastDay, GeoResult};

pub mod openmeteo;

/// Errors a fetch cycle can end with. Both variants are terminal for the
/// cycle; the session reduces them to a user-visible message string.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The geocoding search returned no matches for the query.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Any transport, HTTP-status or parsing failure from the upstream
    /// services.
    #[error("{0}")]
    RequestFailed(String),
}

impl FetchError {
    /// Collapse an internal error into `RequestFailed`, keeping the full
    /// context chain in the message.
    pub(crate) fn request(err: anyhow::Error) -> Self {
        Self::RequestFailed(format!("{err:#}"))
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text city name to its best geocoding match.
    async fn geocode(&self, query: &str) -> Result<GeoResult, FetchError>;

    /// Instantaneous conditions at the resolved coordinates.
    async fn current_weather(&self, place: &GeoResult) -> Result<CurrentWeather, FetchError>;

    /// Daily min/max temperatures and weather code, one entry per day.
    async fn daily_forecast(
        &self,
        place: &GeoResult,
        days: u8,
    ) -> Result<Vec<ForecastDay>, FetchError>;
}
