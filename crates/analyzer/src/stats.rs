//! Statistical summarization of a retained yearly series.

use std::collections::BTreeMap;

/// Year -> its 12 monthly values, for one location+variable. The reader
/// drops partial years whole, so completeness is carried in the type.
pub type YearlySeries = BTreeMap<i32, [f64; 12]>;

/// Population mean and standard deviation over all flattened monthly values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
}

/// Summarize the whole series. `None` when no years were retained, which
/// propagates upward as "no data for this variable at this location".
pub fn summarize(series: &YearlySeries) -> Option<SummaryStats> {
    let all: Vec<f64> = series.values().flatten().copied().collect();
    if all.is_empty() {
        return None;
    }
    let mean = mean(&all);
    let variance = all.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / all.len() as f64;
    Some(SummaryStats {
        mean,
        std: variance.sqrt(),
    })
}

/// Arithmetic mean of each year's 12 values, in year order.
pub fn annual_means(series: &YearlySeries) -> Vec<(i32, f64)> {
    series
        .iter()
        .map(|(&year, values)| (year, mean(values)))
        .collect()
}

/// Historical mean of each calendar month across all retained years.
pub fn monthly_means(series: &YearlySeries) -> Option<[f64; 12]> {
    if series.is_empty() {
        return None;
    }
    let mut out = [0.0; 12];
    for values in series.values() {
        for (slot, value) in out.iter_mut().zip(values) {
            *slot += value;
        }
    }
    let n = series.len() as f64;
    for slot in &mut out {
        *slot /= n;
    }
    Some(out)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
