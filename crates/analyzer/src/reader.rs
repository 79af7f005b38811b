//! Raw variable extraction from the per-month gridded source records.
//!
//! Each location's dataset is a folder of per-year subfolders, each holding
//! one NetCDF record per month for every MERRA-2 collection. A record's
//! field values are masked against the `_FillValue` / `missing_value`
//! attributes before averaging over the temporal dimension.
//!
//! Failure policy: a single unreadable month is substituted with 0.0 at the
//! call site (and logged) rather than aborting the year; a year that does
//! not yield exactly 12 monthly values is dropped whole.

use std::fs;
use std::path::Path;

use slog::{debug, warn, Logger};

use crate::{
    convert_scalar, kelvin_to_celsius, relative_humidity, relative_humidity_approx,
    wind_speed_kmh, VariableSpec, YearlySeries,
};

/// Paired temperature field used for the humidity derivation.
const TEMPERATURE_FIELD: &str = "T2M";

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("failed to read record: {0}")]
    Netcdf(#[from] netcdf::Error),
    #[error("field {0} has no unmasked values")]
    AllMasked(String),
    #[error("failed to list records: {0}")]
    Io(#[from] std::io::Error),
}

/// Masked mean of one field over all its elements (the temporal dimension,
/// for a single-cell subset). `None` when the record lacks the field.
fn masked_mean(file: &netcdf::File, field: &str) -> Result<Option<f64>, ReadError> {
    let Some(var) = file.variable(field) else {
        return Ok(None);
    };

    let fill = attr_f64(&var, "_FillValue");
    let missing = attr_f64(&var, "missing_value");
    let raw: Vec<f64> = var.get_values(..)?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for value in raw {
        if !value.is_finite() {
            continue;
        }
        if fill.is_some_and(|f| value == f) || missing.is_some_and(|m| value == m) {
            continue;
        }
        sum += value;
        count += 1;
    }

    if count == 0 {
        return Err(ReadError::AllMasked(field.to_string()));
    }
    Ok(Some(sum / count as f64))
}

fn attr_f64(var: &netcdf::Variable, name: &str) -> Option<f64> {
    var.attribute_value(name)
        .and_then(|r| r.ok())
        .and_then(|v| match v {
            netcdf::AttributeValue::Double(d) => Some(d),
            netcdf::AttributeValue::Float(f) => Some(f as f64),
            _ => None,
        })
}

/// Extract one month's converted value for a variable from a single record.
pub fn read_month(path: &Path, spec: &VariableSpec) -> Result<f64, ReadError> {
    let file = netcdf::open(path)?;

    // Two orthogonal components: magnitude of the component-wise means,
    // then m/s -> km/h. A record missing either component reads as calm.
    if spec.is_vector() {
        let u = masked_mean(&file, spec.fields[0])?;
        let v = masked_mean(&file, spec.fields[1])?;
        return Ok(match (u, v) {
            (Some(u), Some(v)) => wind_speed_kmh(u, v),
            _ => 0.0,
        });
    }

    let mut values = Vec::with_capacity(spec.fields.len());
    for field in spec.fields {
        values.push(masked_mean(&file, field)?.unwrap_or(0.0));
    }
    let raw = values.iter().sum::<f64>() / values.len() as f64;

    if spec.name == "Humidity" {
        return Ok(match masked_mean(&file, TEMPERATURE_FIELD)? {
            Some(t_kelvin) => relative_humidity(raw, kelvin_to_celsius(t_kelvin)),
            None => relative_humidity_approx(raw),
        });
    }

    Ok(convert_scalar(spec.name, raw))
}

/// Read one year's records for a variable. Returns the 12 monthly values,
/// or `None` when the year is incomplete and must be dropped.
pub fn read_year(
    logger: &Logger,
    spec: &VariableSpec,
    year_dir: &Path,
) -> Result<Option<[f64; 12]>, ReadError> {
    let mut record_paths: Vec<_> = fs::read_dir(year_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.contains(spec.file_prefix))
        })
        .collect();
    record_paths.sort();

    let mut monthly = Vec::with_capacity(12);
    for path in &record_paths {
        match read_month(path, spec) {
            Ok(value) => monthly.push(value),
            Err(err) => {
                // Lenient degradation: keep the month with a zero value
                warn!(
                    logger,
                    "substituting 0.0 for unreadable record";
                    "record" => %path.display(),
                    "variable" => spec.name,
                    "error" => %err,
                );
                monthly.push(0.0);
            }
        }
    }

    match <[f64; 12]>::try_from(monthly) {
        Ok(year) => Ok(Some(year)),
        Err(partial) => {
            debug!(
                logger,
                "dropping incomplete year";
                "dir" => %year_dir.display(),
                "variable" => spec.name,
                "months" => partial.len(),
            );
            Ok(None)
        }
    }
}

/// Assemble the yearly series for one location+variable across the
/// historical window. Years without a folder are skipped silently.
pub fn load_series(
    logger: &Logger,
    spec: &VariableSpec,
    folder: &Path,
    years: std::ops::RangeInclusive<i32>,
) -> YearlySeries {
    let mut series = YearlySeries::new();
    for year in years {
        let year_dir = folder.join(year.to_string());
        if !year_dir.is_dir() {
            continue;
        }
        match read_year(logger, spec, &year_dir) {
            Ok(Some(monthly)) => {
                series.insert(year, monthly);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(
                    logger,
                    "skipping unreadable year";
                    "dir" => %year_dir.display(),
                    "variable" => spec.name,
                    "error" => %err,
                );
            }
        }
    }
    series
}
