use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use super::conversions::display_temp;
use super::{DaySummary, Units, WeatherSample};

/// Hours whose sample, when present, stands in for the whole day.
/// Checked in order; falls back to the day's first sample.
const REPRESENTATIVE_HOURS: [u32; 2] = [12, 15];

/// Buckets 3-hour samples into per-day summaries under the location's fixed
/// UTC offset. Groups form in input order; the returned sequence is sorted
/// ascending by local date so callers can rely on the order regardless of
/// how the input arrived.
#[must_use]
pub fn group_by_local_day(samples: &[WeatherSample], utc_offset_seconds: i32) -> Vec<DaySummary> {
    let offset = Duration::seconds(i64::from(utc_offset_seconds));
    let mut buckets: Vec<DayBucket> = Vec::new();

    for sample in samples {
        let date = (sample.timestamp + offset).date();
        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => bucket.absorb(sample),
            None => buckets.push(DayBucket::new(date, sample)),
        }
    }

    let mut days: Vec<DaySummary> = buckets
        .into_iter()
        .map(|bucket| bucket.into_summary(samples, offset))
        .collect();
    days.sort_by_key(|day| day.date);
    days
}

struct DayBucket<'a> {
    date: NaiveDate,
    min_c: f64,
    max_c: f64,
    first: &'a WeatherSample,
}

impl<'a> DayBucket<'a> {
    fn new(date: NaiveDate, sample: &'a WeatherSample) -> Self {
        Self {
            date,
            min_c: sample.temperature_c,
            max_c: sample.temperature_c,
            first: sample,
        }
    }

    fn absorb(&mut self, sample: &WeatherSample) {
        self.min_c = self.min_c.min(sample.temperature_c);
        self.max_c = self.max_c.max(sample.temperature_c);
    }

    fn into_summary(self, samples: &[WeatherSample], offset: Duration) -> DaySummary {
        let representative =
            representative_sample(samples, offset, self.date).unwrap_or(self.first);
        DaySummary {
            date: self.date,
            min_temp_c: display_temp(self.min_c, Units::Celsius),
            max_temp_c: display_temp(self.max_c, Units::Celsius),
            icon: representative.icon.clone(),
            description: representative.description.clone(),
        }
    }
}

/// Scans the original, ungrouped sequence so that duplicate timestamps
/// resolve to the first sample in input order.
fn representative_sample<'a>(
    samples: &'a [WeatherSample],
    offset: Duration,
    date: NaiveDate,
) -> Option<&'a WeatherSample> {
    REPRESENTATIVE_HOURS.iter().find_map(|&hour| {
        samples.iter().find(|sample| {
            let local = sample.timestamp + offset;
            local.date() == date && local.hour() == hour
        })
    })
}

/// The near-term slice used for hourly charting: samples whose adjusted
/// instant is strictly after `reference`, in input order, at most
/// `window_size` of them. `reference` is injected by the caller; this
/// function never reads a clock.
#[must_use]
pub fn select_hourly_window(
    samples: &[WeatherSample],
    utc_offset_seconds: i32,
    reference: NaiveDateTime,
    window_size: usize,
) -> Vec<WeatherSample> {
    let offset = Duration::seconds(i64::from(utc_offset_seconds));
    samples
        .iter()
        .filter(|sample| sample.timestamp + offset > reference)
        .take(window_size)
        .cloned()
        .collect()
}

/// Plot coordinates for an hourly window: x spread evenly across `width`,
/// y mapped from the rounded display temperatures into the band between
/// 10% and 90% of `height` (larger y is lower on screen). A flat series
/// sits on the bottom of the band; the range is treated as one degree to
/// avoid dividing by zero.
#[must_use]
pub fn chart_points(
    window: &[WeatherSample],
    units: Units,
    width: f64,
    height: f64,
) -> Vec<(f64, f64)> {
    if window.is_empty() {
        return Vec::new();
    }

    let temps: Vec<i32> = window
        .iter()
        .map(|sample| display_temp(sample.temperature_c, units))
        .collect();
    let min = temps.iter().copied().fold(i32::MAX, i32::min);
    let max = temps.iter().copied().fold(i32::MIN, i32::max);
    let range = f64::from(max - min).max(1.0);
    let last_index = window.len().saturating_sub(1).max(1) as f64;

    temps
        .iter()
        .enumerate()
        .map(|(idx, &temp)| {
            let x = idx as f64 / last_index * width;
            let y = 0.9 * height - (f64::from(temp - min) / range) * 0.8 * height;
            (x, y)
        })
        .collect()
}
