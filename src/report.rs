//! Text rendering of the dashboard cards and the plain-text export.
//!
//! The export layout is a stable contract for downstream consumers; change
//! it only together with the locked test in `tests/export_format.rs`.

use std::fmt::Write;

use chrono::{Datelike, Duration, NaiveDateTime};

use crate::domain::weather::{
    DaySummary, Units, WeatherReport, WeatherSample, aqi_band, compass_direction, dew_point_c,
    display_temp, wind_speed_kmh,
};

pub fn render_dashboard(report: &WeatherReport, units: Units) -> String {
    let current = &report.current;
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", current.display_name());
    let _ = writeln!(
        out,
        "{}{}  {}  (feels like {}{}, H {}° / L {}°)",
        display_temp(current.temperature_c, units),
        units.suffix(),
        current.description,
        display_temp(current.feels_like_c, units),
        units.suffix(),
        display_temp(current.temp_max_c, units),
        display_temp(current.temp_min_c, units),
    );

    if !report.days.is_empty() {
        let _ = writeln!(out, "\nDaily forecast");
        for (idx, day) in report.days.iter().enumerate() {
            let _ = writeln!(out, "  {}", daily_line(day, idx, units));
        }
    }

    if !report.hourly.is_empty() {
        let _ = writeln!(out, "\nHourly forecast");
        for sample in &report.hourly {
            let _ = writeln!(out, "  {}", hourly_line(sample, report.utc_offset_seconds, units));
        }
    }

    let _ = writeln!(out, "\nDetails");
    let _ = write!(out, "  Humidity: {:.0}%", current.humidity_pct);
    if let Some(dew) = dew_point_c(current.temperature_c, current.humidity_pct) {
        let _ = write!(out, " (dew point {dew}°C)");
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "  Wind: {} km/h {}",
        wind_speed_kmh(current.wind_speed_mps),
        compass_direction(current.wind_direction_deg),
    );
    let _ = writeln!(
        out,
        "  Pressure: {} hPa ({})",
        current.pressure_hpa,
        pressure_trend(current.pressure_hpa),
    );
    if let Some(visibility) = current.visibility_m {
        let _ = writeln!(out, "  Visibility: {:.1} km", f64::from(visibility) / 1000.0);
    }
    match report.air_quality.and_then(|aqi| aqi_band(aqi.index).map(|band| (aqi.index, band))) {
        Some((index, band)) => {
            let _ = writeln!(out, "  Air quality: {index} - {}", band.label);
        }
        None => {
            let _ = writeln!(out, "  Air quality: no data");
        }
    }
    let _ = writeln!(
        out,
        "  Sunrise: {}   Sunset: {}",
        clock_or_na(current.sunrise_local()),
        clock_or_na(current.sunset_local()),
    );

    if report.clothing_suggestion.is_some() || report.travel_advice.is_some() {
        let _ = writeln!(out, "\nSuggestions");
        if let Some(text) = &report.clothing_suggestion {
            let _ = writeln!(out, "  Clothing: {text}");
        }
        if let Some(text) = &report.travel_advice {
            let _ = writeln!(out, "  Travel: {text}");
        }
    }

    out
}

/// The fixed export template: header, labeled lines, optional suggestion
/// blocks, then an enumerated day-by-day section.
pub fn export_report(report: &WeatherReport, units: Units) -> String {
    let current = &report.current;
    let mut out = String::new();

    let _ = writeln!(out, "SkyScope weather report: {}", current.display_name());
    let _ = writeln!(
        out,
        "Temperature: {}{}",
        display_temp(current.temperature_c, units),
        units.suffix(),
    );
    let _ = writeln!(
        out,
        "Feels like: {}{}",
        display_temp(current.feels_like_c, units),
        units.suffix(),
    );
    let _ = writeln!(out, "Conditions: {}", current.description);
    let _ = writeln!(out, "Humidity: {:.0}%", current.humidity_pct);
    let _ = writeln!(
        out,
        "Wind: {} km/h {}",
        wind_speed_kmh(current.wind_speed_mps),
        compass_direction(current.wind_direction_deg),
    );
    let _ = writeln!(out, "Pressure: {} hPa", current.pressure_hpa);
    let _ = writeln!(out, "Sunrise: {}", clock_or_na(current.sunrise_local()));
    let _ = writeln!(out, "Sunset: {}", clock_or_na(current.sunset_local()));

    if let Some(text) = &report.clothing_suggestion {
        let _ = writeln!(out, "\nClothing suggestion:\n{text}");
    }
    if let Some(text) = &report.travel_advice {
        let _ = writeln!(out, "\nTravel advice:\n{text}");
    }

    let _ = writeln!(out, "\nDaily forecast:");
    for (idx, day) in report.days.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}: {}, {}{} / {}{}",
            idx + 1,
            day.date,
            day.description,
            display_temp(f64::from(day.max_temp_c), units),
            units.suffix(),
            display_temp(f64::from(day.min_temp_c), units),
            units.suffix(),
        );
    }

    out
}

fn daily_line(day: &DaySummary, index: usize, units: Units) -> String {
    let label = if index == 0 {
        "Today".to_string()
    } else {
        day.date.weekday().to_string()
    };
    format!(
        "{label:<5}  {}° / {}°  {}",
        display_temp(f64::from(day.max_temp_c), units),
        display_temp(f64::from(day.min_temp_c), units),
        day.description,
    )
}

fn hourly_line(sample: &WeatherSample, utc_offset_seconds: i32, units: Units) -> String {
    let local = sample.timestamp + Duration::seconds(i64::from(utc_offset_seconds));
    let mut line = format!(
        "{}  {}°  {}",
        local.format("%I %p"),
        display_temp(sample.temperature_c, units),
        sample.description,
    );
    let precipitation = sample
        .precipitation_probability
        .map_or(0, |pop| (pop * 100.0).round() as i32);
    if precipitation > 0 {
        let _ = write!(line, "  (pop {precipitation}%)");
    }
    line
}

fn pressure_trend(pressure_hpa: u32) -> &'static str {
    if pressure_hpa > 1_015 {
        "Rising"
    } else if pressure_hpa < 1_005 {
        "Falling"
    } else {
        "Steady"
    }
}

fn clock_or_na(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(|| "n/a".to_string(), |t| t.format("%I:%M %p").to_string())
}
