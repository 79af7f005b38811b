//! Linear-trend forecasting.
//!
//! One ordinary least-squares degree-1 fit per calendar month across the
//! retained years, evaluated at each target year; plus a single coarse fit
//! on the annual means. Cross-month correlation is deliberately ignored.
//! Everything here is a pure function of the series, so repeated runs over
//! the same input produce bit-for-bit identical records.

use climatecast_core::month_name;

use crate::{
    anomaly_band, seasonal_label, threshold_status, SummaryStats, VariableSpec, YearlySeries,
};

/// Slope and intercept of an OLS degree-1 fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    /// Fit y = slope*x + intercept through the given points. Degenerate
    /// inputs (fewer than two points, or zero spread in x) yield a flat
    /// trend through the mean.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Trend {
        let n = xs.len().min(ys.len()) as f64;
        if n < 1.0 {
            return Trend {
                slope: 0.0,
                intercept: 0.0,
            };
        }
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;
        let sxx: f64 = xs.iter().map(|x| (x - x_mean) * (x - x_mean)).sum();
        if sxx == 0.0 {
            return Trend {
                slope: 0.0,
                intercept: y_mean,
            };
        }
        let sxy: f64 = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum();
        let slope = sxy / sxx;
        Trend {
            slope,
            intercept: y_mean - slope * x_mean,
        }
    }

    pub fn project(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// One classified monthly projection for a target year.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRecord {
    pub year: i32,
    /// Zero-based calendar month index
    pub month: usize,
    pub value: f64,
    pub threshold_status: &'static str,
    pub anomaly: &'static str,
    pub seasonal_trend: &'static str,
}

impl ForecastRecord {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

/// Fit each calendar month independently and evaluate at every target year.
/// Produces `target_years.len() * 12` records in (year, month) order.
pub fn monthly_forecasts(
    series: &YearlySeries,
    stats: &SummaryStats,
    seasonal: &[&'static str; 12],
    spec: &VariableSpec,
    target_years: &[i32],
) -> Vec<ForecastRecord> {
    let xs: Vec<f64> = series.keys().map(|&y| y as f64).collect();

    let trends: Vec<Trend> = (0..12)
        .map(|month| {
            let ys: Vec<f64> = series.values().map(|values| values[month]).collect();
            Trend::fit(&xs, &ys)
        })
        .collect();

    let mut records = Vec::with_capacity(target_years.len() * 12);
    for &year in target_years {
        for (month, trend) in trends.iter().enumerate() {
            let value = trend.project(year as f64);
            records.push(ForecastRecord {
                year,
                month,
                value,
                threshold_status: threshold_status(value, spec.threshold),
                anomaly: anomaly_band(value, stats),
                seasonal_trend: seasonal[month],
            });
        }
    }
    records
}

/// The seasonal labels are a property of the historical series alone and
/// are reused identically for every forecast year.
pub fn seasonal_labels(monthly_means: &[f64; 12], stats: &SummaryStats) -> [&'static str; 12] {
    std::array::from_fn(|month| seasonal_label(monthly_means[month], stats))
}

/// One coarse projection per target year from a degree-1 fit on the annual
/// means, flagged with the two-tier anomaly classifier.
pub fn annual_forecast(
    annual_means: &[(i32, f64)],
    stats: &SummaryStats,
    target_years: &[i32],
) -> Vec<(i32, f64, &'static str)> {
    let xs: Vec<f64> = annual_means.iter().map(|&(y, _)| y as f64).collect();
    let ys: Vec<f64> = annual_means.iter().map(|&(_, v)| v).collect();
    let trend = Trend::fit(&xs, &ys);

    target_years
        .iter()
        .map(|&year| {
            let value = trend.project(year as f64);
            (year, value, crate::anomaly_flag(value, stats))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VARIABLES;

    fn temperature_spec() -> VariableSpec {
        *VARIABLES.iter().find(|v| v.name == "Temperature").unwrap()
    }

    fn flat_series(value: f64) -> YearlySeries {
        (2015..=2024).map(|y| (y, [value; 12])).collect()
    }

    #[test]
    fn test_fit_recovers_exact_line() {
        let xs: Vec<f64> = (2015..=2024).map(|y| y as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 0.5 * x - 900.0).collect();
        let trend = Trend::fit(&xs, &ys);
        assert!((trend.slope - 0.5).abs() < 1e-9);
        assert!((trend.project(2026.0) - (0.5 * 2026.0 - 900.0)).abs() < 1e-6);
    }

    #[test]
    fn test_flat_series_projects_flat() {
        let series = flat_series(25.0);
        let stats = crate::summarize(&series).unwrap();
        let seasonal = seasonal_labels(&crate::monthly_means(&series).unwrap(), &stats);
        let records =
            monthly_forecasts(&series, &stats, &seasonal, &temperature_spec(), &[2025, 2026]);

        assert_eq!(records.len(), 24);
        for record in &records {
            assert!((record.value - 25.0).abs() < 1e-9);
            assert_eq!(record.threshold_status, "Below Threshold");
            assert_eq!(record.seasonal_trend, "Normal range");
        }
    }

    #[test]
    fn test_forecast_determinism() {
        let mut series = flat_series(25.0);
        series.insert(2019, std::array::from_fn(|m| 20.0 + m as f64));
        let stats = crate::summarize(&series).unwrap();
        let seasonal = seasonal_labels(&crate::monthly_means(&series).unwrap(), &stats);
        let spec = temperature_spec();

        let first = monthly_forecasts(&series, &stats, &seasonal, &spec, &[2025, 2026]);
        let second = monthly_forecasts(&series, &stats, &seasonal, &spec, &[2025, 2026]);
        // Bit-for-bit identical, not merely approximately equal
        assert_eq!(first, second);
    }

    #[test]
    fn test_anomalous_year_pulls_trend() {
        // Nine flat years at 25°C and one at 35°C: the projections stay close
        // to the flat level extrapolated through the outlier.
        let mut series = flat_series(25.0);
        series.insert(2020, [35.0; 12]);
        let stats = crate::summarize(&series).unwrap();
        assert!(stats.mean > 25.0 && stats.mean < 26.5);
        assert!(stats.std > 0.0);

        let seasonal = seasonal_labels(&crate::monthly_means(&series).unwrap(), &stats);
        let records =
            monthly_forecasts(&series, &stats, &seasonal, &temperature_spec(), &[2025, 2026]);
        for record in records {
            assert!(
                record.value > 22.0 && record.value < 30.0,
                "projection diverged: {}",
                record.value
            );
        }
    }

    #[test]
    fn test_annual_forecast_flags() {
        let series = flat_series(25.0);
        let stats = crate::summarize(&series).unwrap();
        let annual = crate::annual_means(&series);
        let forecasts = annual_forecast(&annual, &stats, &[2025, 2026]);

        assert_eq!(forecasts.len(), 2);
        for (year, value, flag) in forecasts {
            assert!(year == 2025 || year == 2026);
            assert!((value - 25.0).abs() < 1e-9);
            // Flat series: σ = 0, so the projection sits exactly on the mean
            assert_eq!(flag, "Within Normal Range");
        }
    }
}
