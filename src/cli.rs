use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::weather::Units;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

impl From<UnitsArg> for Units {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Celsius => Units::Celsius,
            UnitsArg::Fahrenheit => Units::Fahrenheit,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "skyscope",
    version,
    about = "Command-line weather dashboard with AI-assisted suggestions"
)]
pub struct Cli {
    /// City name to look up
    pub city: Option<String>,

    /// Display units
    #[arg(long, value_enum, default_value_t = UnitsArg::Celsius)]
    pub units: UnitsArg,

    /// Direct latitude (requires --lon)
    #[arg(long)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long)]
    pub lon: Option<f64>,

    /// Forecast days to show (the provider serves at most 5)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub days: u8,

    /// Hourly window size, in 3-hour steps
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=40))]
    pub hours: u8,

    /// Write a plain-text report to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Skip the AI clothing/travel suggestions
    #[arg(long)]
    pub no_suggestions: bool,

    /// OpenWeather API key (falls back to OPENWEATHER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Gemini API key (falls back to GEMINI_API_KEY)
    #[arg(long)]
    pub gemini_api_key: Option<String>,

    /// Override the OpenWeather base URL
    #[arg(long)]
    pub weather_url: Option<String>,

    /// Override the Gemini base URL
    #[arg(long)]
    pub gemini_url: Option<String>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (None, None) if self.city.is_none() => {
                anyhow::bail!("provide a city name or --lat/--lon")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn display_units(&self) -> Units {
        self.units.into()
    }

    pub fn openweather_key(&self) -> anyhow::Result<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok())
            .ok_or_else(|| {
                anyhow::anyhow!("missing OpenWeather API key: pass --api-key or set OPENWEATHER_API_KEY")
            })
    }

    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        self.gemini_api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
    }
}
