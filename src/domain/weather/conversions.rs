use chrono::NaiveDateTime;

use super::Units;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

#[must_use]
pub fn convert_temp(celsius: f64, units: Units) -> f64 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}

/// Display temperatures are always whole degrees, rounded half away from
/// zero.
#[must_use]
pub fn round_temp(value: f64) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn display_temp(celsius: f64, units: Units) -> i32 {
    round_temp(convert_temp(celsius, units))
}

#[must_use]
pub fn wind_speed_kmh(meters_per_second: f64) -> i32 {
    (meters_per_second * 3.6).round() as i32
}

/// Magnus-Tetens approximation. `None` when humidity is not a positive
/// percentage, since ln(h/100) is undefined there.
#[must_use]
pub fn dew_point_c(temperature_c: f64, humidity_pct: f64) -> Option<i32> {
    if humidity_pct <= 0.0 {
        return None;
    }
    const A: f64 = 17.27;
    const B: f64 = 237.7;
    let alpha = (A * temperature_c) / (B + temperature_c) + (humidity_pct / 100.0).ln();
    Some(((B * alpha) / (A - alpha)).round() as i32)
}

/// 45°-wide buckets, rounding first and wrapping after, so 370° lands on N.
#[must_use]
pub fn compass_direction(degrees: f64) -> &'static str {
    let index = ((degrees / 45.0).round() as i64).rem_euclid(8) as usize;
    COMPASS_POINTS[index]
}

/// Forecast samples carry naive `YYYY-MM-DD HH:MM:SS` timestamps that denote
/// UTC instants.
#[must_use]
pub fn parse_sample_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").ok()
}
