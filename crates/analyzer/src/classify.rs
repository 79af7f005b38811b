//! Labeling of forecasts and observations against historical statistics
//! and fixed thresholds.
//!
//! Each function is total: exactly one label fires for any real input,
//! including zero, negatives, and values exactly on a boundary. Band checks
//! run in a fixed order, with the ±2σ comparisons evaluated before ±1σ.

use crate::SummaryStats;

/// Coarse two-tier anomaly flag, used for the annual-level projection.
pub fn anomaly_flag(value: f64, stats: &SummaryStats) -> &'static str {
    if value > stats.mean + 2.0 * stats.std {
        "Anomalously High"
    } else if value < stats.mean - 2.0 * stats.std {
        "Anomalously Low"
    } else if value <= 0.0 {
        "Zero value"
    } else {
        "Within Normal Range"
    }
}

/// Fine-grained four-tier anomaly band, used per monthly forecast.
pub fn anomaly_band(value: f64, stats: &SummaryStats) -> &'static str {
    if value > stats.mean + 2.0 * stats.std {
        "Much higher than usual"
    } else if value > stats.mean + stats.std {
        "Slightly above normal"
    } else if value < stats.mean - 2.0 * stats.std {
        "Much lower than usual"
    } else if value < stats.mean - stats.std {
        "Slightly below normal"
    } else if value <= 0.0 {
        "Zero value"
    } else {
        "Within normal range"
    }
}

/// Comparison against the variable's fixed reference level. Equality is
/// exact, no epsilon.
pub fn threshold_status(value: f64, threshold: f64) -> &'static str {
    if value > threshold {
        "Above Threshold"
    } else if value == threshold {
        "Equal to Threshold"
    } else if value <= 0.0 {
        "Zero value"
    } else {
        "Below Threshold"
    }
}

/// Seasonal label for one calendar month: that month's historical mean
/// against the variable's global mean ± one standard deviation.
pub fn seasonal_label(month_mean: f64, stats: &SummaryStats) -> &'static str {
    if month_mean > stats.mean + stats.std {
        "Usually high"
    } else if month_mean < stats.mean - stats.std {
        "Usually low"
    } else {
        "Normal range"
    }
}
