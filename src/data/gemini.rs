use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::weather::{
    CurrentConditions, Units, WeatherSample, display_temp, wind_speed_kmh,
};

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.0-flash";

/// Thin wrapper over the generative-language text endpoint. One prompt in,
/// one block of prose out; the caller decides what to do with failures.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SuggestionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(GEMINI_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(20))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1beta/models/{MODEL}:generateContent", self.base_url);
        let payload = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .context("suggestion request failed")?
            .error_for_status()
            .context("suggestion request returned non-success status")?;

        let body: GenerateResponse = response
            .json()
            .await
            .context("failed to decode suggestion response")?;

        body.first_text()
            .ok_or_else(|| anyhow!("suggestion response contained no candidates"))
    }
}

pub fn clothing_prompt(current: &CurrentConditions, units: Units) -> String {
    format!(
        "Based on the following weather conditions in {city}: \
         Current temperature: {temp}°{unit}, Feels like: {feels}°{unit}, \
         Description: {description}, Humidity: {humidity:.0}%, \
         Wind speed: {wind} km/h. \
         Provide a concise clothing suggestion (1-2 sentences).",
        city = current.city,
        temp = display_temp(current.temperature_c, units),
        unit = units.symbol(),
        feels = display_temp(current.feels_like_c, units),
        description = current.description,
        humidity = current.humidity_pct,
        wind = wind_speed_kmh(current.wind_speed_mps),
    )
}

pub fn travel_prompt(current: &CurrentConditions, units: Units, window: &[WeatherSample]) -> String {
    format!(
        "Given the current and forecast weather conditions in {city}, \
         provide concise travel advice (1-2 sentences). \
         Current weather: {description}, Temperature: {temp}°{unit}. \
         Forecast for next 24 hours: {summary} \
         Consider visibility, precipitation, and general comfort for outdoor activities.",
        city = current.city,
        description = current.description,
        temp = display_temp(current.temperature_c, units),
        unit = units.symbol(),
        summary = hourly_summary(window, units),
    )
}

/// One-line digest of the hourly window: all temperatures, then the distinct
/// conditions in first-seen order.
fn hourly_summary(window: &[WeatherSample], units: Units) -> String {
    if window.is_empty() {
        return "No forecast data available.".to_string();
    }

    let temps = window
        .iter()
        .map(|sample| display_temp(sample.temperature_c, units).to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut conditions: Vec<&str> = Vec::new();
    for sample in window {
        if !conditions.contains(&sample.description.as_str()) {
            conditions.push(&sample.description);
        }
    }

    format!(
        "Hourly temperatures: {temps}°{unit}. Hourly conditions: {}.",
        conditions.join(", "),
        unit = units.symbol(),
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
