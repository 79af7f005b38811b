use crate::helpers::{kinabalu_cache, spawn_app};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use climatecast_core::Cache;
use hyper::{header, Method};
use serde_json::{from_slice, json, Value};
use tower::ServiceExt;

async fn post_analyze(app: axum::Router, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.expect("Failed to execute request.");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let test_app = spawn_app(kinabalu_cache());

    let (status, body) = post_analyze(
        test_app.app.clone(),
        json!({"lat": 6.0, "lon": 116.5, "year": 2025}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    // present but empty variable list is also not answerable
    let (status, _) = post_analyze(
        test_app.app.clone(),
        json!({"lat": 6.0, "lon": 116.5, "year": 2025, "month": "Jun", "variables": []}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearby_point_resolves_to_known_location() {
    let test_app = spawn_app(kinabalu_cache());

    let (status, body) = post_analyze(
        test_app.app,
        json!({
            "lat": 6.0, "lon": 116.5, "year": 2025, "month": "Jun",
            "variables": ["Temperature"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Kinabalu");
    assert_eq!(body["year"], "2025");
    assert_eq!(body["month"], "Jun");
    // closest location exists, so the forecast must never degrade to "N/A"
    assert!(body["pred_values"]["Temperature"].is_f64());
    assert_eq!(body["units"]["Temperature"], "°C");
    assert_eq!(body["threshold_desc"]["Temperature"], "Below Threshold");
    assert_eq!(body["anomalies"]["Temperature"]["Jun"], "Within normal range");
    assert_eq!(body["seasonal_trends"]["Temperature"]["Jun"], "Normal range");
    assert_eq!(body["historical_10y"]["Temperature"].as_array().unwrap().len(), 10);
    assert_eq!(body["travel_tips"], "Pack light rain gear");
}

#[tokio::test]
async fn aliased_names_resolve_but_keep_request_spelling() {
    let test_app = spawn_app(kinabalu_cache());

    let (status, body) = post_analyze(
        test_app.app,
        json!({
            "lat": 6.0, "lon": 116.5, "year": 2025, "month": "Jun",
            "variables": ["Air quality"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // the cache key is "AirQuality" but the response echoes the client's name
    assert_eq!(body["units"]["Air quality"], "AOD");
    assert!(body["pred_values"]["Air quality"].is_f64());
    assert!(body["units"].get("AirQuality").is_none());
}

#[tokio::test]
async fn unknown_variable_degrades_to_sentinels() {
    let test_app = spawn_app(kinabalu_cache());

    let (status, body) = post_analyze(
        test_app.app,
        json!({
            "lat": 6.0, "lon": 116.5, "year": 2025, "month": "Jun",
            "variables": ["Snowfall"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pred_values"]["Snowfall"], "N/A");
    assert_eq!(body["threshold_desc"]["Snowfall"], "No data");
    assert_eq!(body["anomalies"]["Snowfall"], "No data");
    assert_eq!(body["units"]["Snowfall"], "");
    assert_eq!(body["seasonal_trends"]["Snowfall"], json!({}));
    assert_eq!(body["historical_10y"]["Snowfall"], json!([]));
}

#[tokio::test]
async fn out_of_range_month_degrades_but_location_holds() {
    let test_app = spawn_app(kinabalu_cache());

    let (status, body) = post_analyze(
        test_app.app,
        json!({
            "lat": 6.0, "lon": 116.5, "year": 2030, "month": "Jun",
            "variables": ["Temperature"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Kinabalu");
    assert_eq!(body["pred_values"]["Temperature"], "N/A");
    assert_eq!(body["threshold_desc"]["Temperature"], "No data");
    assert_eq!(body["travel_tips"], "No data");
    // series and units do not depend on the requested year
    assert_eq!(body["units"]["Temperature"], "°C");
    assert_eq!(body["historical_10y"]["Temperature"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn preflight_options_is_accepted() {
    let test_app = spawn_app(kinabalu_cache());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/analyze")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::OK);
    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(allowed.contains("POST"), "allowed methods: {}", allowed);
}

#[tokio::test]
async fn empty_cache_yields_not_found() {
    let test_app = spawn_app(Cache::new());

    let (status, body) = post_analyze(
        test_app.app,
        json!({
            "lat": 6.0, "lon": 116.5, "year": 2025, "month": "Jun",
            "variables": ["Temperature"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No matching location in cache");
}
