use serde_json::json;
use skyscope::data::gemini::SuggestionClient;
use skyscope::data::openweather::{FetchError, WeatherClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_payload() -> serde_json::Value {
    json!({
        "coord": { "lat": 51.51, "lon": -0.13 },
        "weather": [ { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" } ],
        "main": {
            "temp": 18.3,
            "feels_like": 17.2,
            "temp_min": 15.4,
            "temp_max": 21.1,
            "pressure": 1012,
            "humidity": 72
        },
        "visibility": 10000,
        "wind": { "speed": 4.0, "deg": 310 },
        "dt": 1_719_830_000i64,
        "sys": { "country": "GB", "sunrise": 1_719_812_520i64, "sunset": 1_719_864_900i64 },
        "timezone": 3600,
        "name": "London"
    })
}

fn forecast_payload() -> serde_json::Value {
    json!({
        "list": [
            {
                "dt_txt": "2024-07-01 12:00:00",
                "main": { "temp": 18.2 },
                "weather": [ { "description": "light rain", "icon": "10d" } ],
                "pop": 0.4
            },
            {
                "dt_txt": "not a timestamp",
                "main": { "temp": 19.0 },
                "weather": [ { "description": "light rain", "icon": "10d" } ],
                "pop": 0.2
            },
            {
                "dt_txt": "2024-07-01 15:00:00",
                "main": { "temp": 21.9 },
                "weather": [ { "description": "overcast clouds", "icon": "04d" } ]
            }
        ],
        "city": { "name": "London", "country": "GB", "timezone": 3600 }
    })
}

#[tokio::test]
async fn current_by_city_maps_the_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .mount(&server)
        .await;

    let client = WeatherClient::with_base_url(server.uri(), "test-key");
    let current = client.current_by_city("London").await.unwrap();

    assert_eq!(current.city, "London");
    assert_eq!(current.country.as_deref(), Some("GB"));
    assert_eq!(current.description, "light rain");
    assert_eq!(current.icon, "10d");
    assert_eq!(current.pressure_hpa, 1_012);
    assert_eq!(current.visibility_m, Some(10_000));
    assert_eq!(current.utc_offset_seconds, 3_600);
}

#[tokio::test]
async fn unknown_city_becomes_location_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let client = WeatherClient::with_base_url(server.uri(), "test-key");
    let err = client.current_by_city("Atlantis").await.unwrap_err();
    assert!(matches!(err, FetchError::LocationNotFound(city) if city == "Atlantis"));
}

#[tokio::test]
async fn server_errors_carry_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = WeatherClient::with_base_url(server.uri(), "test-key");
    let err = client.current_by_coords(51.51, -0.13).await.unwrap_err();
    match err {
        FetchError::Upstream { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn forecast_skips_bad_timestamps_and_keeps_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", "51.51"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .mount(&server)
        .await;

    let client = WeatherClient::with_base_url(server.uri(), "test-key");
    let series = client.forecast(51.51, -0.13).await.unwrap();

    assert_eq!(series.utc_offset_seconds, 3_600);
    assert_eq!(series.samples.len(), 2);
    assert_eq!(series.samples[0].precipitation_probability, Some(0.4));
    assert_eq!(series.samples[1].description, "overcast clouds");
    assert_eq!(series.samples[1].precipitation_probability, None);
}

#[tokio::test]
async fn air_quality_takes_first_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [
                { "main": { "aqi": 2 }, "components": { "pm2_5": 8.2 } },
                { "main": { "aqi": 3 }, "components": { "pm2_5": 9.0 } }
            ]
        })))
        .mount(&server)
        .await;

    let client = WeatherClient::with_base_url(server.uri(), "test-key");
    let aqi = client.air_quality(51.51, -0.13).await.unwrap();
    assert_eq!(aqi.index, 2);
}

#[tokio::test]
async fn empty_air_quality_list_is_missing_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [] })))
        .mount(&server)
        .await;

    let client = WeatherClient::with_base_url(server.uri(), "test-key");
    let err = client.air_quality(51.51, -0.13).await.unwrap_err();
    assert!(matches!(err, FetchError::Missing(_)));
}

#[tokio::test]
async fn suggestion_client_extracts_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .and(query_param("key", "gem-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Wear a light jacket." } ] } }
            ]
        })))
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(server.uri(), "gem-key");
    let text = client.generate("What should I wear?").await.unwrap();
    assert_eq!(text, "Wear a light jacket.");
}

#[tokio::test]
async fn suggestion_without_candidates_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = SuggestionClient::with_base_url(server.uri(), "gem-key");
    let err = client.generate("What should I wear?").await.unwrap_err();
    assert!(err.to_string().contains("no candidates"));
}
