//! Categorical display bands for air quality and UV index.
//!
//! Bands are ordered threshold tables with an inclusive lower bound: a value
//! belongs to the last band whose lower bound it reaches. Boundary behavior
//! is a rule of the table, not of code order.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub label: &'static str,
    /// Hex color the dashboard renders the band with.
    pub color: &'static str,
}

/// OpenWeather air-quality index is discrete, 1 through 5.
const AQI_BANDS: [Band; 5] = [
    Band { label: "Good", color: "#00E676" },
    Band { label: "Fair", color: "#FFEB3B" },
    Band { label: "Moderate", color: "#FF9800" },
    Band { label: "Poor", color: "#FF5722" },
    Band { label: "Very Poor", color: "#D32F2F" },
];

/// Ascending (inclusive lower bound, band) thresholds for the continuous
/// UV index.
const UV_BANDS: [(f64, Band); 5] = [
    (0.0, Band { label: "Low", color: "#00C853" }),
    (3.0, Band { label: "Moderate", color: "#FFD600" }),
    (6.0, Band { label: "High", color: "#FF6F00" }),
    (8.0, Band { label: "Very High", color: "#D50000" }),
    (11.0, Band { label: "Extreme", color: "#880E4F" }),
];

/// `None` for anything outside the provider's 1..=5 scale; the caller
/// renders that as missing data.
#[must_use]
pub fn aqi_band(index: u8) -> Option<Band> {
    match index {
        1..=5 => Some(AQI_BANDS[usize::from(index) - 1]),
        _ => None,
    }
}

/// Values below the first threshold clamp to the lowest band.
#[must_use]
pub fn uv_band(value: f64) -> Band {
    UV_BANDS
        .iter()
        .rev()
        .find(|(lower, _)| value >= *lower)
        .map_or(UV_BANDS[0].1, |(_, band)| *band)
}
