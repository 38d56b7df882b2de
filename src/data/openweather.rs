use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::weather::{
    AirQuality, CurrentConditions, ForecastSeries, WeatherSample, parse_sample_timestamp,
};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("location not found: {0}")]
    LocationNotFound(String),
    #[error("openweather request failed with status {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("openweather request failed")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode openweather response")]
    Decode(#[from] serde_json::Error),
    #[error("openweather response contained no {0} data")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(OPENWEATHER_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn current_by_city(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let query = [
            ("q", city.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        match self.get_json::<CurrentPayload>("weather", &query).await {
            Ok(payload) => Ok(payload.into_conditions()),
            Err(FetchError::Upstream { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(FetchError::LocationNotFound(city.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    pub async fn current_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, FetchError> {
        let query = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        let payload: CurrentPayload = self.get_json("weather", &query).await?;
        Ok(payload.into_conditions())
    }

    /// 5-day / 3-hour forecast. Entries whose timestamp fails to parse are
    /// skipped here so the aggregator only ever sees valid instants.
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastSeries, FetchError> {
        let query = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ];
        let payload: ForecastPayload = self.get_json("forecast", &query).await?;

        let mut samples = Vec::with_capacity(payload.list.len());
        for entry in payload.list {
            let Some(timestamp) = parse_sample_timestamp(&entry.dt_txt) else {
                tracing::warn!(dt_txt = %entry.dt_txt, "skipping forecast entry with bad timestamp");
                continue;
            };
            let (description, icon) = first_condition(entry.weather);
            samples.push(WeatherSample {
                timestamp,
                temperature_c: entry.main.temp,
                icon,
                description,
                precipitation_probability: entry.pop,
            });
        }

        Ok(ForecastSeries {
            samples,
            utc_offset_seconds: payload.city.timezone,
        })
    }

    pub async fn air_quality(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AirQuality, FetchError> {
        let query = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("appid", self.api_key.clone()),
        ];
        let payload: AirPollutionPayload = self.get_json("air_pollution", &query).await?;
        payload
            .list
            .into_iter()
            .next()
            .map(|entry| AirQuality {
                index: entry.main.aqi,
            })
            .ok_or(FetchError::Missing("air quality"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Upstream {
                status,
                body: truncate_body(&body),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn first_condition(conditions: Vec<ConditionBlock>) -> (String, String) {
    conditions
        .into_iter()
        .next()
        .map(|condition| (condition.description, condition.icon))
        .unwrap_or_else(|| ("unknown".to_string(), String::new()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = body
            .char_indices()
            .take_while(|(idx, _)| *idx < MAX)
            .last()
            .map_or(0, |(idx, ch)| idx + ch.len_utf8());
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    name: String,
    timezone: i32,
    visibility: Option<u32>,
    coord: CoordBlock,
    main: MainBlock,
    weather: Vec<ConditionBlock>,
    wind: WindBlock,
    sys: SysBlock,
}

impl CurrentPayload {
    fn into_conditions(self) -> CurrentConditions {
        let (description, icon) = first_condition(self.weather);
        CurrentConditions {
            city: self.name,
            country: self.sys.country,
            latitude: self.coord.lat,
            longitude: self.coord.lon,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            temp_min_c: self.main.temp_min,
            temp_max_c: self.main.temp_max,
            description,
            icon,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            wind_speed_mps: self.wind.speed,
            wind_direction_deg: self.wind.deg,
            sunrise_unix: self.sys.sunrise,
            sunset_unix: self.sys.sunset,
            utc_offset_seconds: self.timezone,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoordBlock {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct SysBlock {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    list: Vec<ForecastEntry>,
    city: CityBlock,
}

#[derive(Debug, Deserialize)]
struct CityBlock {
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: ForecastMain,
    weather: Vec<ConditionBlock>,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct AirPollutionPayload {
    list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    main: AirPollutionIndex,
}

#[derive(Debug, Deserialize)]
struct AirPollutionIndex {
    aqi: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies_intact() {
        assert_eq!(truncate_body("{}"), "{}");
        let long = "x".repeat(300);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn first_condition_falls_back_when_block_missing() {
        let (description, icon) = first_condition(Vec::new());
        assert_eq!(description, "unknown");
        assert!(icon.is_empty());
    }
}
