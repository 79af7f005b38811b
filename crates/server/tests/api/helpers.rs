use axum::Router;
use climatecast_core::{AnnualValue, Cache, LocationEntry, VariableReport, MONTHS};
use server::{app, build_app_state};
use std::collections::BTreeMap;
use tempfile::TempDir;

pub struct TestApp {
    pub app: Router,
    // Keeps the cache file alive for the duration of the test
    _tmp: TempDir,
}

/// Spins up the router against a cache file written to a temp dir, going
/// through the same startup path as the binary.
pub fn spawn_app(cache: Cache) -> TestApp {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let cache_file = tmp.path().join("full_analysed_cache.json");
    std::fs::write(
        &cache_file,
        serde_json::to_string_pretty(&cache).expect("failed to serialize cache"),
    )
    .expect("failed to write cache file");

    let app_state =
        build_app_state(cache_file.to_str().expect("utf-8 path")).expect("failed to build app");

    TestApp {
        app: app(app_state),
        _tmp: tmp,
    }
}

fn year_months<T: Clone>(year: &str, value: T) -> BTreeMap<String, BTreeMap<String, T>> {
    let months = MONTHS
        .iter()
        .map(|&m| (m.to_string(), value.clone()))
        .collect::<BTreeMap<_, _>>();
    BTreeMap::from([(year.to_string(), months)])
}

pub fn temperature_report(lat: f64, lon: f64) -> VariableReport {
    VariableReport {
        unit: "°C".to_string(),
        lat,
        lon,
        historical_10y: (2015..=2024)
            .map(|year| AnnualValue { year, value: 25.0 })
            .collect(),
        mean: 25.0,
        std: 1.0,
        pred_values: year_months("2025", 26.4),
        threshold_statuses: year_months("2025", "Below Threshold".to_string()),
        anomalies: year_months("2025", "Within normal range".to_string()),
        annual_anomaly: BTreeMap::from([("2025".to_string(), "Within Normal Range".to_string())]),
        seasonal_trends: MONTHS
            .iter()
            .map(|&m| (m.to_string(), "Normal range".to_string()))
            .collect(),
    }
}

pub fn air_quality_report(lat: f64, lon: f64) -> VariableReport {
    VariableReport {
        unit: "AOD".to_string(),
        historical_10y: (2015..=2024)
            .map(|year| AnnualValue { year, value: 0.12 })
            .collect(),
        mean: 0.12,
        std: 0.02,
        pred_values: year_months("2025", 0.13),
        ..temperature_report(lat, lon)
    }
}

/// A single-location cache centered on Mount Kinabalu, with travel tips.
pub fn kinabalu_cache() -> Cache {
    let (lat, lon) = (6.074, 116.558);
    let mut entry = LocationEntry {
        travel_tips: Some(BTreeMap::from([(
            "2025".to_string(),
            BTreeMap::from([("Jun".to_string(), "Pack light rain gear".to_string())]),
        )])),
        ..LocationEntry::default()
    };
    entry
        .variables
        .insert("Temperature".to_string(), temperature_report(lat, lon));
    entry
        .variables
        .insert("AirQuality".to_string(), air_quality_report(lat, lon));

    Cache::from([("Kinabalu".to_string(), entry)])
}
