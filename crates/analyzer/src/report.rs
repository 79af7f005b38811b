//! Cache assembly: regroups the flat forecast records into the nested
//! lookup artifact the query server consumes.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use climatecast_core::{
    ensure_dir_exists, AnnualValue, Cache, LocationEntry, VariableReport, MONTHS,
};
use slog::{info, Logger};

use crate::{
    annual_forecast, annual_means, load_series, monthly_forecasts, monthly_means,
    seasonal_labels, summarize, Cli, LocationConfig, VariableSpec, VARIABLES,
};

/// Build the report for one (location, variable) pair, or `None` when no
/// complete year of data exists (the variable is then omitted from the
/// cache entirely).
pub fn build_report(
    logger: &Logger,
    location: &LocationConfig,
    spec: &VariableSpec,
    years: std::ops::RangeInclusive<i32>,
    target_years: &[i32],
) -> Option<VariableReport> {
    let series = load_series(logger, spec, Path::new(&location.folder), years);
    let stats = summarize(&series)?;
    let annual = annual_means(&series);
    let per_month = monthly_means(&series)?;
    let seasonal = seasonal_labels(&per_month, &stats);

    let records = monthly_forecasts(&series, &stats, &seasonal, spec, target_years);

    // year -> month -> field, keyed by decimal year strings and month names
    let mut pred_values: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut threshold_statuses: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    let mut anomalies: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for record in &records {
        let year = record.year.to_string();
        let month = record.month_name().to_string();
        pred_values
            .entry(year.clone())
            .or_default()
            .insert(month.clone(), record.value);
        threshold_statuses
            .entry(year.clone())
            .or_default()
            .insert(month.clone(), record.threshold_status.to_string());
        anomalies
            .entry(year)
            .or_default()
            .insert(month, record.anomaly.to_string());
    }

    let annual_anomaly: BTreeMap<String, String> = annual_forecast(&annual, &stats, target_years)
        .into_iter()
        .map(|(year, _, flag)| (year.to_string(), flag.to_string()))
        .collect();

    let seasonal_trends: BTreeMap<String, String> = MONTHS
        .iter()
        .zip(seasonal)
        .map(|(&month, label)| (month.to_string(), label.to_string()))
        .collect();

    Some(VariableReport {
        unit: spec.unit.to_string(),
        lat: location.lat,
        lon: location.lon,
        historical_10y: annual
            .into_iter()
            .map(|(year, value)| AnnualValue { year, value })
            .collect(),
        mean: stats.mean,
        std: stats.std,
        pred_values,
        threshold_statuses,
        anomalies,
        annual_anomaly,
        seasonal_trends,
    })
}

/// Run the whole pipeline: every configured location crossed with the
/// static variable table, one independent chain per pair.
pub fn build_cache(logger: &Logger, cli: &Cli) -> Cache {
    let years = cli.start_year()..=cli.end_year();
    let target_years = cli.target_years();

    let mut cache = Cache::new();
    for location in &cli.locations {
        info!(logger, "building cache"; "location" => &location.name);
        let mut entry = LocationEntry::default();
        for spec in &VARIABLES {
            info!(logger, "processing variable"; "variable" => spec.name);
            match build_report(logger, location, spec, years.clone(), &target_years) {
                Some(report) => {
                    entry.variables.insert(spec.name.to_string(), report);
                }
                None => {
                    info!(
                        logger,
                        "no data for variable, omitting";
                        "location" => &location.name,
                        "variable" => spec.name,
                    );
                }
            }
        }
        cache.insert(location.name.clone(), entry);
    }
    cache
}

/// Serialize the finished artifact. A failed write aborts the run; no
/// partial cache is left behind for the server to pick up.
pub fn write_cache(cache: &Cache, path: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent().and_then(|p| p.to_str()) {
        if !parent.is_empty() && !ensure_dir_exists(parent) {
            anyhow::bail!("could not create output directory {}", parent);
        }
    }
    let json = serde_json::to_string_pretty(cache)?;
    fs::write(path, json).with_context(|| format!("writing cache to {}", path))?;
    Ok(())
}
