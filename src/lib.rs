pub mod cli;
pub mod data;
pub mod domain;
pub mod report;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};

use cli::Cli;
use data::gemini::{self, SuggestionClient};
use data::openweather::WeatherClient;
use domain::weather::{
    CurrentConditions, Units, WeatherReport, WeatherSample, group_by_local_day,
    select_hourly_window,
};

/// One dashboard run: fetch, aggregate, render, optionally export.
pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let units = cli.display_units();

    let weather = match cli.weather_url.clone() {
        Some(url) => WeatherClient::with_base_url(url, cli.openweather_key()?),
        None => WeatherClient::new(cli.openweather_key()?),
    };

    let current = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => weather.current_by_coords(lat, lon).await?,
        _ => {
            let city = cli.city.as_deref().context("city name is required")?;
            weather.current_by_city(city).await?
        }
    };
    tracing::debug!(city = %current.city, lat = current.latitude, lon = current.longitude, "resolved location");

    let (forecast, air_quality) = tokio::join!(
        weather.forecast(current.latitude, current.longitude),
        weather.air_quality(current.latitude, current.longitude),
    );
    let forecast = forecast?;
    let air_quality = match air_quality {
        Ok(aqi) => Some(aqi),
        Err(err) => {
            tracing::warn!(error = %err, "air quality unavailable");
            None
        }
    };

    let days = group_by_local_day(&forecast.samples, forecast.utc_offset_seconds);
    let local_now =
        Utc::now().naive_utc() + Duration::seconds(i64::from(forecast.utc_offset_seconds));
    let hourly = select_hourly_window(
        &forecast.samples,
        forecast.utc_offset_seconds,
        local_now,
        usize::from(cli.hours),
    );

    let (clothing_suggestion, travel_advice) =
        fetch_suggestions(&cli, &current, units, &hourly).await;

    let report = WeatherReport {
        days: days.into_iter().take(usize::from(cli.days)).collect(),
        hourly,
        utc_offset_seconds: forecast.utc_offset_seconds,
        air_quality,
        clothing_suggestion,
        travel_advice,
        fetched_at: Utc::now(),
        current,
    };

    println!("{}", report::render_dashboard(&report, units));

    if let Some(path) = cli.export.as_ref() {
        std::fs::write(path, report::export_report(&report, units))
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report exported");
    }

    Ok(())
}

/// Both prompts go out concurrently; each degrades independently to `None`
/// so the weather cards never depend on the language provider.
async fn fetch_suggestions(
    cli: &Cli,
    current: &CurrentConditions,
    units: Units,
    hourly: &[WeatherSample],
) -> (Option<String>, Option<String>) {
    if cli.no_suggestions {
        return (None, None);
    }
    let Some(key) = cli.gemini_key() else {
        tracing::warn!("no Gemini API key configured, skipping suggestions");
        return (None, None);
    };

    let client = match cli.gemini_url.clone() {
        Some(url) => SuggestionClient::with_base_url(url, key),
        None => SuggestionClient::new(key),
    };

    let (clothing, travel) = futures::future::join(
        client.generate(&gemini::clothing_prompt(current, units)),
        client.generate(&gemini::travel_prompt(current, units, hourly)),
    )
    .await;

    (
        suggestion_or_log(clothing, "clothing suggestion"),
        suggestion_or_log(travel, "travel advice"),
    )
}

fn suggestion_or_log(result: Result<String>, label: &str) -> Option<String> {
    match result {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::warn!(error = %err, "{} unavailable", label);
            None
        }
    }
}
