use chrono::{NaiveDate, NaiveDateTime, Utc};
use skyscope::domain::weather::{
    AirQuality, CurrentConditions, DaySummary, Units, WeatherReport, WeatherSample,
};
use skyscope::report::export_report;

fn fixture() -> WeatherReport {
    let current = CurrentConditions {
        city: "London".to_string(),
        country: Some("GB".to_string()),
        latitude: 51.51,
        longitude: -0.13,
        temperature_c: 18.3,
        feels_like_c: 17.2,
        temp_min_c: 15.4,
        temp_max_c: 21.1,
        description: "light rain".to_string(),
        icon: "10d".to_string(),
        humidity_pct: 72.0,
        pressure_hpa: 1_012,
        visibility_m: Some(10_000),
        wind_speed_mps: 4.0,
        wind_direction_deg: 310.0,
        sunrise_unix: 1_719_812_520,
        sunset_unix: 1_719_864_900,
        utc_offset_seconds: 0,
    };

    let days = vec![
        DaySummary {
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            min_temp_c: 16,
            max_temp_c: 22,
            icon: "10d".to_string(),
            description: "light rain".to_string(),
        },
        DaySummary {
            date: NaiveDate::from_ymd_opt(2024, 7, 2).unwrap(),
            min_temp_c: 17,
            max_temp_c: 24,
            icon: "04d".to_string(),
            description: "overcast clouds".to_string(),
        },
    ];

    let hourly = vec![WeatherSample {
        timestamp: NaiveDateTime::parse_from_str("2024-07-01 12:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap(),
        temperature_c: 18.6,
        icon: "10d".to_string(),
        description: "light rain".to_string(),
        precipitation_probability: Some(0.4),
    }];

    WeatherReport {
        current,
        days,
        hourly,
        utc_offset_seconds: 0,
        air_quality: Some(AirQuality { index: 2 }),
        clothing_suggestion: Some("Bring a light jacket.".to_string()),
        travel_advice: Some("Carry an umbrella.".to_string()),
        fetched_at: Utc::now(),
    }
}

#[test]
fn export_matches_the_locked_template() {
    let expected = "SkyScope weather report: London, GB\n\
        Temperature: 18°C\n\
        Feels like: 17°C\n\
        Conditions: light rain\n\
        Humidity: 72%\n\
        Wind: 14 km/h NW\n\
        Pressure: 1012 hPa\n\
        Sunrise: 05:42 AM\n\
        Sunset: 08:15 PM\n\
        \n\
        Clothing suggestion:\n\
        Bring a light jacket.\n\
        \n\
        Travel advice:\n\
        Carry an umbrella.\n\
        \n\
        Daily forecast:\n\
        1. 2024-07-01: light rain, 22°C / 16°C\n\
        2. 2024-07-02: overcast clouds, 24°C / 17°C\n";

    assert_eq!(export_report(&fixture(), Units::Celsius), expected);
}

#[test]
fn export_omits_absent_suggestion_blocks() {
    let mut report = fixture();
    report.clothing_suggestion = None;
    report.travel_advice = None;

    let text = export_report(&report, Units::Celsius);
    assert!(!text.contains("Clothing suggestion:"));
    assert!(!text.contains("Travel advice:"));
    assert!(text.contains("Sunset: 08:15 PM\n\nDaily forecast:\n"));
}

#[test]
fn export_converts_to_fahrenheit() {
    let text = export_report(&fixture(), Units::Fahrenheit);
    assert!(text.contains("Temperature: 65°F\n"));
    assert!(text.contains("1. 2024-07-01: light rain, 72°F / 61°F\n"));
}

#[test]
fn export_writes_to_disk_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.txt");
    let rendered = export_report(&fixture(), Units::Celsius);

    std::fs::write(&path, &rendered).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
}
