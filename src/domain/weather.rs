use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod bands;
pub mod conversions;


pub use aggregate::{chart_points, group_by_local_day, select_hourly_window};
pub use bands::{Band, aqi_band, uv_band};
pub use conversions::{
    compass_direction, convert_temp, dew_point_c, display_temp, parse_sample_timestamp,
    round_temp, wind_speed_kmh,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Celsius,
    Fahrenheit,
}

impl Units {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// One 3-hour forecast point. `timestamp` is the UTC instant; the location's
/// fixed offset is applied at aggregation time, never stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub icon: String,
    pub description: String,
    /// Precipitation probability as a fraction in [0, 1].
    pub precipitation_probability: Option<f64>,
}

/// Summary of all samples falling on one local calendar date. Temperatures
/// are rounded Celsius extrema; unit conversion happens at display time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub min_temp_c: i32,
    pub max_temp_c: i32,
    pub icon: String,
    pub description: String,
}

/// A forecast query result: the ordered 3-hour samples plus the queried
/// location's offset from UTC, applied uniformly to every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub samples: Vec<WeatherSample>,
    pub utc_offset_seconds: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: f64,
    pub pressure_hpa: u32,
    pub visibility_m: Option<u32>,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
    pub utc_offset_seconds: i32,
}

impl CurrentConditions {
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.city, country),
            None => self.city.clone(),
        }
    }

    #[must_use]
    pub fn sunrise_local(&self) -> Option<NaiveDateTime> {
        self.to_local(self.sunrise_unix)
    }

    #[must_use]
    pub fn sunset_local(&self) -> Option<NaiveDateTime> {
        self.to_local(self.sunset_unix)
    }

    fn to_local(&self, unix: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(unix + i64::from(self.utc_offset_seconds), 0)
            .map(|instant| instant.naive_utc())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQuality {
    /// OpenWeather scale, 1 (good) through 5 (very poor).
    pub index: u8,
}

/// Everything one dashboard run renders from.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub days: Vec<DaySummary>,
    pub hourly: Vec<WeatherSample>,
    pub utc_offset_seconds: i32,
    pub air_quality: Option<AirQuality>,
    pub clothing_suggestion: Option<String>,
    pub travel_advice: Option<String>,
    pub fetched_at: DateTime<Utc>,
}
