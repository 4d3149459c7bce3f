use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    model::{CurrentWeather, ForecastDay, GeoResult},
};

use super::{FetchError, WeatherProvider};

/// Client for the two public Open-Meteo services: geocoding search and
/// weather forecast. Neither requires an API key.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        }
    }

    async fn search(&self, name: &str) -> Result<Vec<GeoResult>> {
        let url = format!("{}/search", self.geocoding_url);
        debug!(%url, name, "geocoding lookup");

        let res = self
            .http
            .get(&url)
            .query(&[("name", name)])
            .send()
            .await
            .context("Failed to send request to Open-Meteo geocoding")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read geocoding response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: GeoSearchResponse =
            serde_json::from_str(&body).context("Failed to parse geocoding JSON")?;

        // An absent `results` key means no matches, same as an empty list.
        Ok(parsed.results.unwrap_or_default())
    }

    async fn fetch_current(&self, place: &GeoResult) -> Result<CurrentWeather> {
        let url = format!("{}/forecast", self.forecast_url);
        debug!(%url, lat = place.latitude, lon = place.longitude, "current weather lookup");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read current weather response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Current weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: CurrentResponse =
            serde_json::from_str(&body).context("Failed to parse current weather JSON")?;

        let current = parsed.current_weather;

        Ok(CurrentWeather {
            city: place.name.clone(),
            country: place.country.clone(),
            temperature: current.temperature,
            windspeed: current.windspeed,
            winddirection: current.winddirection,
            weathercode: current.weathercode,
        })
    }

    async fn fetch_daily(&self, place: &GeoResult, days: u8) -> Result<Vec<ForecastDay>> {
        let url = format!("{}/forecast", self.forecast_url);
        debug!(%url, lat = place.latitude, lon = place.longitude, days, "daily forecast lookup");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
                ),
                ("forecast_days", days.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .context("Failed to send request to Open-Meteo (daily forecast)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read daily forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Daily forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: DailyResponse =
            serde_json::from_str(&body).context("Failed to parse daily forecast JSON")?;

        let daily = parsed.daily;
        let n = daily.time.len();

        if daily.weathercode.len() != n
            || daily.temperature_2m_min.len() != n
            || daily.temperature_2m_max.len() != n
        {
            return Err(anyhow!(
                "Daily forecast series have mismatched lengths ({} dates)",
                n
            ));
        }

        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(ForecastDay {
                date: daily.time[i],
                weathercode: daily.weathercode[i],
                temperature_min: daily.temperature_2m_min[i],
                temperature_max: daily.temperature_2m_max[i],
            });
        }

        Ok(out)
    }
}

#[derive(Debug, Deserialize)]
struct GeoSearchResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current_weather: CurrentWeatherBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: i32,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    weathercode: Vec<i32>,
    temperature_2m_min: Vec<f64>,
    temperature_2m_max: Vec<f64>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, query: &str) -> Result<GeoResult, FetchError> {
        let hits = self.search(query).await.map_err(FetchError::request)?;

        hits.into_iter()
            .next()
            .ok_or_else(|| FetchError::CityNotFound(query.to_string()))
    }

    async fn current_weather(&self, place: &GeoResult) -> Result<CurrentWeather, FetchError> {
        self.fetch_current(place).await.map_err(FetchError::request)
    }

    async fn daily_forecast(
        &self,
        place: &GeoResult,
        days: u8,
    ) -> Result<Vec<ForecastDay>, FetchError> {
        self.fetch_daily(place, days)
            .await
            .map_err(FetchError::request)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
