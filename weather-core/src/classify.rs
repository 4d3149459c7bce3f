//! WMO weather-code classification for display.
//!
//! Maps the numeric codes returned by Open-Meteo onto a small closed set of
//! display conditions plus a fallback. The table deliberately covers only a
//! subset of the WMO standard; anything outside it (e.g. the thunderstorm
//! range 95-99) lands on `Unknown`.

/// Display condition derived from a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Unknown,
}

/// Background gradient selected by a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gradient {
    Sunny,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Default,
}

impl Condition {
    /// Classify a weather code. Total: absent and unlisted codes map to
    /// `Unknown`.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Clear,
            Some(1..=3) => Self::Cloudy,
            Some(45 | 48) => Self::Fog,
            Some(51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82) => Self::Rain,
            Some(71 | 73 | 75 | 77 | 85 | 86) => Self::Snow,
            _ => Self::Unknown,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::Cloudy => "☁️",
            Self::Fog => "🌫️",
            Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Unknown => "🌍",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Unknown => "Unknown",
        }
    }

    pub fn gradient(self) -> Gradient {
        match self {
            Self::Clear => Gradient::Sunny,
            Self::Cloudy => Gradient::Cloudy,
            Self::Fog => Gradient::Fog,
            Self::Rain => Gradient::Rain,
            Self::Snow => Gradient::Snow,
            Self::Unknown => Gradient::Default,
        }
    }
}

impl Gradient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gradient::Sunny => "sunny",
            Gradient::Cloudy => "cloudy",
            Gradient::Fog => "fog",
            Gradient::Rain => "rain",
            Gradient::Snow => "snow",
            Gradient::Default => "default",
        }
    }

    /// Gradient color stops for web frontends reusing this crate.
    pub fn css_stops(self) -> &'static str {
        match self {
            Self::Sunny => "from-yellow-300 via-orange-400 to-pink-500",
            Self::Cloudy => "from-gray-300 via-gray-500 to-gray-700",
            Self::Fog => "from-gray-400 via-slate-600 to-slate-800",
            Self::Rain => "from-blue-400 via-blue-600 to-indigo-800",
            Self::Snow => "from-blue-100 via-sky-200 to-white",
            Self::Default => "from-indigo-400 via-sky-400 to-cyan-300",
        }
    }
}

impl std::fmt::Display for Gradient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
