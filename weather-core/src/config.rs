use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Both Open-Meteo services are keyless, so there are no credentials here;
/// only the service endpoints and the forecast length. Overriding the base
/// URLs also lets tests point the client at a local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the geocoding service.
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Base URL of the weather/forecast service.
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Days requested from the daily forecast endpoint (Open-Meteo accepts
    /// 1-16).
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_forecast_days() -> u8 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-now", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();
        assert_eq!(cfg.geocoding_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(cfg.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(cfg.forecast_days, 5);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("forecast_days = 7").expect("partial config must parse");

        assert_eq!(cfg.forecast_days, 7);
        assert_eq!(cfg.geocoding_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(cfg.forecast_url, "https://api.open-meteo.com/v1");
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config {
            geocoding_url: "http://localhost:9000".to_string(),
            forecast_url: "http://localhost:9001".to_string(),
            forecast_days: 3,
        };

        let toml = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&toml).expect("serialized config must parse");

        assert_eq!(parsed.geocoding_url, cfg.geocoding_url);
        assert_eq!(parsed.forecast_url, cfg.forecast_url);
        assert_eq!(parsed.forecast_days, cfg.forecast_days);
    }
}
