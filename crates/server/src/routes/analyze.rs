use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::{canonical_variable, AppState};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub year: Option<i32>,
    pub month: Option<String>,
    #[serde(default)]
    pub variables: Vec<String>,
}

/// Per-variable maps keyed by the names exactly as the client sent them,
/// aliases and all. Fields that hold whole-year or whole-report slices use
/// untyped JSON so absent data can degrade to sentinel strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    pub location: String,
    pub year: String,
    pub month: String,
    pub variables: Vec<String>,
    pub units: BTreeMap<String, String>,
    /// variable -> projected value, or "N/A"
    #[schema(value_type = Object)]
    pub pred_values: BTreeMap<String, Value>,
    pub threshold_desc: BTreeMap<String, String>,
    /// variable -> month-to-label map for the year, or "No data"
    #[schema(value_type = Object)]
    pub anomalies: BTreeMap<String, Value>,
    pub seasonal_trends: BTreeMap<String, BTreeMap<String, String>>,
    /// variable -> full annual series, empty when unknown
    #[schema(value_type = Object)]
    pub historical_10y: BTreeMap<String, Value>,
    /// Opaque tip for the requested year and month, or "No data"
    pub travel_tips: String,
}

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = OK, description = "Analysis for the nearest known location", body = AnalyzeResponse),
        (status = BAD_REQUEST, description = "Missing required fields"),
        (status = NOT_FOUND, description = "No location with coordinates in the cache")
    ))]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<Value>)> {
    let (Some(lat), Some(lon), Some(year), Some(month)) =
        (payload.lat, payload.lon, payload.year, payload.month)
    else {
        return Err(bad_request());
    };
    if payload.variables.is_empty() {
        return Err(bad_request());
    }
    let year = year.to_string();

    let (location, entry) = state.snapshot.nearest_location(lat, lon).ok_or_else(|| {
        error!("no location with coordinates in cache");
        (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "No matching location in cache"})),
        )
    })?;

    let mut units = BTreeMap::new();
    let mut pred_values = BTreeMap::new();
    let mut threshold_desc = BTreeMap::new();
    let mut anomalies = BTreeMap::new();
    let mut seasonal_trends = BTreeMap::new();
    let mut historical_10y = BTreeMap::new();

    for requested in &payload.variables {
        let report = entry.variables.get(canonical_variable(requested));

        let pred = report
            .and_then(|r| r.pred_values.get(&year))
            .and_then(|months| months.get(&month))
            .map(|v| json!(v))
            .unwrap_or_else(|| json!("N/A"));
        let threshold = report
            .and_then(|r| r.threshold_statuses.get(&year))
            .and_then(|months| months.get(&month))
            .cloned()
            .unwrap_or_else(|| "No data".to_string());
        let anomaly = report
            .and_then(|r| r.anomalies.get(&year))
            .map(|months| json!(months))
            .unwrap_or_else(|| json!("No data"));
        let seasonal = report
            .map(|r| r.seasonal_trends.clone())
            .unwrap_or_default();
        let historical = report
            .map(|r| json!(r.historical_10y))
            .unwrap_or_else(|| json!([]));
        let unit = report.map(|r| r.unit.clone()).unwrap_or_default();

        debug!(
            "{}: pred={}, threshold={}, anomaly={}",
            requested, pred, threshold, anomaly
        );

        units.insert(requested.clone(), unit);
        pred_values.insert(requested.clone(), pred);
        threshold_desc.insert(requested.clone(), threshold);
        anomalies.insert(requested.clone(), anomaly);
        seasonal_trends.insert(requested.clone(), seasonal);
        historical_10y.insert(requested.clone(), historical);
    }

    let travel_tips = entry
        .travel_tips
        .as_ref()
        .and_then(|tips| tips.get(&year))
        .and_then(|months| months.get(&month))
        .cloned()
        .unwrap_or_else(|| "No data".to_string());

    Ok(Json(AnalyzeResponse {
        location: location.to_string(),
        year,
        month,
        variables: payload.variables,
        units,
        pred_values,
        threshold_desc,
        anomalies,
        seasonal_trends,
        historical_10y,
        travel_tips,
    }))
}

fn bad_request() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "Missing required fields"})),
    )
}
