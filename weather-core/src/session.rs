use crate::model::{CurrentWeather, ForecastDay, RequestState};
use crate::provider::{FetchError, WeatherProvider};

/// Drives one fetch cycle at a time: geocode the query, then fan out the
/// current-weather and forecast lookups for the resolved coordinates.
///
/// `run` takes `&mut self`, so two cycles on the same session cannot
/// overlap; a stale cycle can never clobber a newer one.
#[derive(Debug)]
pub struct WeatherSession {
    provider: Box<dyn WeatherProvider>,
    forecast_days: u8,
    state: RequestState,
    weather: Option<CurrentWeather>,
    forecast: Option<Vec<ForecastDay>>,
}

impl WeatherSession {
    pub fn new(provider: Box<dyn WeatherProvider>, forecast_days: u8) -> Self {
        Self {
            provider,
            forecast_days,
            state: RequestState::Idle,
            weather: None,
            forecast: None,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn weather(&self) -> Option<&CurrentWeather> {
        self.weather.as_ref()
    }

    pub fn forecast(&self) -> Option<&[ForecastDay]> {
        self.forecast.as_deref()
    }

    /// Run a full fetch cycle for `query`.
    ///
    /// A blank query leaves the session untouched. Every other outcome ends
    /// in `Success` or `Error`; `Loading` never outlives the call.
    pub async fn run(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        self.state = RequestState::Loading;
        self.weather = None;
        self.forecast = None;

        match self.fetch(query).await {
            Ok((weather, forecast)) => {
                self.weather = Some(weather);
                self.forecast = Some(forecast);
                self.state = RequestState::Success;
            }
            Err(err) => {
                self.state = RequestState::Error(err.to_string());
            }
        }
    }

    async fn fetch(&self, query: &str) -> Result<(CurrentWeather, Vec<ForecastDay>), FetchError> {
        let place = self.provider.geocode(query).await?;

        // The two lookups only depend on the resolved coordinates.
        tokio::try_join!(
            self.provider.current_weather(&place),
            self.provider.daily_forecast(&place, self.forecast_days),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeoResult;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    #[derive(Debug, Default)]
    struct StubProvider {
        no_match: Arc<AtomicBool>,
        fail_current: Arc<AtomicBool>,
        fail_forecast: Arc<AtomicBool>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn geocode(&self, query: &str) -> Result<GeoResult, FetchError> {
            if self.no_match.load(Ordering::SeqCst) {
                return Err(FetchError::CityNotFound(query.to_string()));
            }

            Ok(GeoResult {
                name: "Paris".to_string(),
                country: "France".to_string(),
                latitude: 48.85,
                longitude: 2.35,
            })
        }

        async fn current_weather(&self, place: &GeoResult) -> Result<CurrentWeather, FetchError> {
            if self.fail_current.load(Ordering::SeqCst) {
                return Err(FetchError::RequestFailed("connection reset".to_string()));
            }

            Ok(CurrentWeather {
                city: place.name.clone(),
                country: place.country.clone(),
                temperature: 18.2,
                windspeed: 10.1,
                winddirection: 200.0,
                weathercode: 1,
            })
        }

        async fn daily_forecast(
            &self,
            _place: &GeoResult,
            days: u8,
        ) -> Result<Vec<ForecastDay>, FetchError> {
            if self.fail_forecast.load(Ordering::SeqCst) {
                return Err(FetchError::RequestFailed("connection reset".to_string()));
            }

            let start = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
            Ok((0..i64::from(days))
                .map(|i| ForecastDay {
                    date: start + chrono::Duration::days(i),
                    weathercode: 61,
                    temperature_min: 12.0,
                    temperature_max: 18.0,
                })
                .collect())
        }
    }

    fn session() -> WeatherSession {
        WeatherSession::new(Box::new(StubProvider::default()), 5)
    }

    #[tokio::test]
    async fn blank_query_is_a_no_op() {
        let mut session = session();

        session.run("").await;
        assert_eq!(*session.state(), RequestState::Idle);

        session.run("   ").await;
        assert_eq!(*session.state(), RequestState::Idle);
        assert!(session.weather().is_none());
        assert!(session.forecast().is_none());
    }

    #[tokio::test]
    async fn successful_cycle_populates_weather_and_forecast() {
        let mut session = session();
        session.run("Paris").await;

        assert_eq!(*session.state(), RequestState::Success);

        let weather = session.weather().expect("weather must be set");
        assert_eq!(weather.city, "Paris");
        assert_eq!(weather.country, "France");
        assert_eq!(weather.weathercode, 1);

        let forecast = session.forecast().expect("forecast must be set");
        assert_eq!(forecast.len(), 5);
    }

    #[tokio::test]
    async fn city_not_found_ends_in_error_with_nothing_set() {
        let stub = StubProvider::default();
        stub.no_match.store(true, Ordering::SeqCst);

        let mut session = WeatherSession::new(Box::new(stub), 5);
        session.run("Atlantis").await;

        match session.state() {
            RequestState::Error(msg) => assert!(msg.contains("City not found")),
            other => panic!("expected error state, got {other:?}"),
        }
        assert!(session.weather().is_none());
        assert!(session.forecast().is_none());
    }

    #[tokio::test]
    async fn failed_lookup_clears_previous_results() {
        let fail_forecast = Arc::new(AtomicBool::new(false));
        let stub = StubProvider {
            fail_forecast: fail_forecast.clone(),
            ..StubProvider::default()
        };

        let mut session = WeatherSession::new(Box::new(stub), 5);
        session.run("Paris").await;
        assert_eq!(*session.state(), RequestState::Success);

        fail_forecast.store(true, Ordering::SeqCst);
        session.run("Paris").await;

        assert!(matches!(session.state(), RequestState::Error(_)));
        assert!(session.weather().is_none());
        assert!(session.forecast().is_none());
    }

    #[tokio::test]
    async fn failed_current_weather_discards_forecast_too() {
        let stub = StubProvider::default();
        stub.fail_current.store(true, Ordering::SeqCst);

        let mut session = WeatherSession::new(Box::new(stub), 5);
        session.run("Paris").await;

        match session.state() {
            RequestState::Error(msg) => assert!(msg.contains("connection reset")),
            other => panic!("expected error state, got {other:?}"),
        }
        assert!(session.weather().is_none());
        assert!(session.forecast().is_none());
    }
}
