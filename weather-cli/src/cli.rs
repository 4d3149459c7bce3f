use anyhow::bail;
use clap::{Parser, Subcommand};
use weather_core::{
    classify::Condition, config::Config, model::RequestState,
    provider::openmeteo::OpenMeteoProvider, session::WeatherSession,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather Now CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Adjust service endpoints and forecast length.
    Configure,

    /// Show current weather and a daily forecast for a city.
    Show {
        /// City name; prompts interactively when omitted.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let current = Config::load()?;

    let geocoding_url = inquire::Text::new("Geocoding endpoint:")
        .with_default(&current.geocoding_url)
        .prompt()?;

    let forecast_url = inquire::Text::new("Forecast endpoint:")
        .with_default(&current.forecast_url)
        .prompt()?;

    let forecast_days = inquire::CustomType::<u8>::new("Forecast days (1-16):")
        .with_default(current.forecast_days)
        .prompt()?;

    let config = Config { geocoding_url, forecast_url, forecast_days };
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;

    let city = match city {
        Some(city) => city,
        None => inquire::Text::new("City name:").prompt()?,
    };

    let provider = OpenMeteoProvider::new(&config);
    let mut session = WeatherSession::new(Box::new(provider), config.forecast_days);

    println!("Fetching weather...");
    session.run(&city).await;

    match session.state() {
        RequestState::Success => {}
        RequestState::Error(message) => bail!("{message}"),
        // run() only leaves these for a blank query.
        RequestState::Idle | RequestState::Loading => bail!("No city name given"),
    }

    if let Some(weather) = session.weather() {
        let condition = Condition::from_code(Some(weather.weathercode));

        println!();
        println!("{}  {}, {}", condition.icon(), weather.city, weather.country);
        println!(
            "🌡 Temp: {:.1}°C   💨 Wind: {:.1} km/h",
            weather.temperature, weather.windspeed
        );
        println!("{}, wind direction {:.0}°", condition.label(), weather.winddirection);
    }

    if let Some(forecast) = session.forecast() {
        println!();
        for day in forecast {
            let condition = Condition::from_code(Some(day.weathercode));
            println!(
                "{}  {}  {:.1}°C / {:.1}°C",
                day.date.format("%a"),
                condition.icon(),
                day.temperature_min,
                day.temperature_max,
            );
        }
    }

    Ok(())
}
