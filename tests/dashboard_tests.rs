//! End-to-end tests for the dashboard against mocked providers

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commuteos::recommendation::CommuteKind;
use commuteos::{CommuteConfig, DashboardService, Location, Slot, TravelMode};

fn test_config(server: &MockServer, data_dir: &TempDir) -> CommuteConfig {
    let mut config = CommuteConfig::default();
    config.providers.weather_base_url = server.uri();
    config.providers.routing_base_url = server.uri();
    config.providers.geocoding_base_url = server.uri();
    config.providers.max_retries = 0;
    config.providers.timeout_seconds = 5;
    config.storage.location = data_dir.path().to_string_lossy().into_owned();
    config
}

fn forecast_body(temperature: f32, weather_code: u8, precipitation: f32) -> Value {
    json!({
        "current": {
            "temperature_2m": temperature,
            "precipitation": precipitation,
            "weather_code": weather_code,
            "precipitation_probability": 40
        },
        "daily": {
            "time": ["2026-10-19", "2026-10-20"],
            "weather_code": [weather_code, 3],
            "temperature_2m_max": [temperature + 3.0, 14.0],
            "temperature_2m_min": [temperature - 4.0, 6.0]
        }
    })
}

fn route_body(distance: f64, duration: f64) -> Value {
    json!({
        "code": "Ok",
        "routes": [{
            "distance": distance,
            "duration": duration,
            "geometry": {
                "type": "LineString",
                "coordinates": [[-74.006, 40.7128], [-73.9855, 40.758]]
            }
        }]
    })
}

async fn mock_weather(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mock_route(server: &MockServer, mode: TravelMode, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path_regex(format!("^/route/v1/{mode}/")))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_refresh_on_a_dry_day() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mock_weather(&server, forecast_body(18.0, 1, 0.0)).await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(&server, TravelMode::Cycling, 200, route_body(9_500.0, 2_280.0)).await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let snapshot = service.refresh().await.unwrap();

    assert!(!snapshot.loading);
    let weather = snapshot.weather.as_ref().unwrap();
    assert_eq!(weather.temperature, 18.0);
    assert!(!weather.is_precipitating);
    assert_eq!(weather.daily.len(), 2);

    let outfit = snapshot.outfit.as_ref().unwrap();
    assert_eq!(outfit.text, "Hoodie or T-Shirt");
    assert_eq!(outfit.notes, vec!["Sunglasses needed."]);

    assert_eq!(snapshot.options.len(), 2);
    let rideshare = &snapshot.options[0];
    assert_eq!(rideshare.kind, CommuteKind::Rideshare);
    assert_eq!(rideshare.price, Some(20.37));
    assert!(!rideshare.recommended);
    let bike = &snapshot.options[1];
    assert_eq!(bike.minutes, Some(38));
    assert!(bike.recommended);
}

#[tokio::test]
async fn test_rain_surges_rideshare() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mock_weather(&server, forecast_body(20.0, 61, 1.2)).await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(&server, TravelMode::Cycling, 200, route_body(9_500.0, 2_280.0)).await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let snapshot = service.refresh().await.unwrap();

    assert_eq!(snapshot.options[0].price, Some(28.52));
    assert!(snapshot.options[0].recommended);
    assert!(!snapshot.options[1].recommended);
    assert_eq!(
        snapshot.outfit.as_ref().map(|o| o.notes.clone()),
        Some(vec!["Don't forget an umbrella!"])
    );
}

#[tokio::test]
async fn test_missing_route_is_unknown_not_zero() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mock_weather(&server, forecast_body(18.0, 0, 0.0)).await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(
        &server,
        TravelMode::Cycling,
        400,
        json!({"code": "NoRoute", "message": "Impossible route between points"}),
    )
    .await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let snapshot = service.refresh().await.unwrap();

    let commute = snapshot.commute.as_ref().unwrap();
    assert!(commute.driving.is_some());
    assert!(commute.cycling.is_none());

    let bike = &snapshot.options[1];
    assert_eq!(bike.price, None);
    assert_eq!(bike.minutes, None);
    assert!(!bike.recommended);
}

#[tokio::test]
async fn test_weather_failure_from_empty_state() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(&server, TravelMode::Cycling, 200, route_body(9_500.0, 2_280.0)).await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let snapshot = service.refresh().await.unwrap();

    assert!(snapshot.weather.is_none());
    assert!(snapshot.commute.is_none());
    assert!(snapshot.outfit.is_none());
    assert!(snapshot.options.is_empty());
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_weather_failure_keeps_previous_reading() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(18.0, 1, 0.0)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(&server, TravelMode::Cycling, 200, route_body(9_500.0, 2_280.0)).await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let first = service.refresh().await.unwrap();
    assert!(first.weather.is_some());
    assert!(first.commute.is_some());

    let second = service.refresh().await.unwrap();
    assert_eq!(second.weather, first.weather);
    assert_eq!(second.commute, first.commute);
    assert_eq!(second.options, first.options);
    assert!(!second.loading);
}

#[tokio::test]
async fn test_loading_while_refresh_in_flight() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(18.0, 1, 0.0))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(&server, TravelMode::Cycling, 200, route_body(9_500.0, 2_280.0)).await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let background = service.clone();
    let handle = tokio::spawn(async move { background.refresh().await });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(service.snapshot().await.unwrap().loading);

    let finished = handle.await.unwrap().unwrap();
    assert!(!finished.loading);
    assert!(!service.snapshot().await.unwrap().loading);
}

#[tokio::test]
async fn test_cancelled_refresh_clears_loading() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body(18.0, 1, 0.0))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let cancelled = tokio::time::timeout(Duration::from_millis(200), service.refresh()).await;
    assert!(cancelled.is_err());

    let snapshot = service.snapshot().await.unwrap();
    assert!(!snapshot.loading);
    assert!(snapshot.weather.is_none());
}

#[tokio::test]
async fn test_set_location_persists_and_refreshes() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mock_weather(&server, forecast_body(18.0, 0, 0.0)).await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(&server, TravelMode::Cycling, 200, route_body(9_500.0, 2_280.0)).await;
    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();

    let defaults = service.locations().await.unwrap();
    assert_eq!(defaults.home.latitude, 40.7128);
    assert_eq!(defaults.work.longitude, -73.9855);

    let snapshot = service
        .set_location(Slot::Work, DashboardService::pin(51.5072, -0.1276))
        .await
        .unwrap();
    assert_eq!(snapshot.work.label.as_deref(), Some("Custom Pin"));
    assert!(snapshot.weather.is_some());

    let locations = service.locations().await.unwrap();
    assert_eq!(locations.work, Location::pin(51.5072, -0.1276));
    assert_eq!(locations.home.latitude, 40.7128);
}

#[tokio::test]
async fn test_search_and_choose_result() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Empire State"))
        .and(query_param("format", "json"))
        .and(header("user-agent", "CommuteOS/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "lat": "40.7484",
                "lon": "-73.9857",
                "display_name": "Empire State Building, 350, 5th Avenue, Manhattan, New York"
            },
            {"lat": "not a number", "lon": "-73.9", "display_name": "Broken"}
        ])))
        .mount(&server)
        .await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    let results = service.search("Empire State").await;
    assert_eq!(results.len(), 1);

    let location = DashboardService::choose_result(&results[0]);
    assert_eq!(location.label.as_deref(), Some("Empire State Building"));
    assert_eq!(location.latitude, 40.7484);
}

#[tokio::test]
async fn test_search_failure_yields_no_results() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = DashboardService::from_config(&test_config(&server, &data_dir)).unwrap();
    assert!(service.search("Somewhere").await.is_empty());
    assert!(service.search("   ").await.is_empty());
}

#[tokio::test]
async fn test_api_routes() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mock_weather(&server, forecast_body(3.0, 0, 0.0)).await;
    mock_route(&server, TravelMode::Driving, 200, route_body(10_000.0, 1_200.0)).await;
    mock_route(&server, TravelMode::Cycling, 200, route_body(9_500.0, 2_280.0)).await;
    let config = test_config(&server, &data_dir);

    let service = Arc::new(DashboardService::from_config(&config).unwrap());
    let app = commuteos::web::app(service, &config.server);

    let health = app
        .clone()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    let body = axum::body::to_bytes(health.into_body(), usize::MAX).await.unwrap();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], commuteos::VERSION);

    let refresh = app
        .clone()
        .oneshot(Request::post("/api/refresh").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(refresh.status(), StatusCode::OK);
    let body = axum::body::to_bytes(refresh.into_body(), usize::MAX).await.unwrap();
    let snapshot: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(snapshot["outfit"]["text"], "Heavy Coat + Scarf");
    assert_eq!(snapshot["home"]["lat"], 40.7128);

    let invalid = app
        .clone()
        .oneshot(
            Request::put("/api/locations/home")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"lat": 91.0, "lon": 0.0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let unknown_slot = app
        .oneshot(
            Request::put("/api/locations/gym")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"lat": 1.0, "lon": 1.0}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unknown_slot.status(), StatusCode::NOT_FOUND);
}
