//! Typed model of the precomputed cache artifact.
//!
//! The analyzer writes this structure as pretty-printed JSON; the query
//! server deserializes it once at startup and treats it as an immutable
//! snapshot. The wire shape is a nested document:
//! `location -> variable -> report`, with month keys as three-letter
//! English abbreviations and year keys as decimal strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Calendar month names used as JSON keys, in calendar order.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month name for a zero-based month index.
pub fn month_name(index: usize) -> &'static str {
    MONTHS[index]
}

/// One year of the historical annual series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualValue {
    pub year: i32,
    pub value: f64,
}

/// Opaque per-location travel tips, keyed year -> month. The analyzer never
/// produces these; they are merged into the artifact out-of-band and passed
/// through by the query server verbatim.
pub type TravelTips = BTreeMap<String, BTreeMap<String, String>>;

/// Everything precomputed for one (location, variable) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableReport {
    pub unit: String,
    pub lat: f64,
    pub lon: f64,
    pub historical_10y: Vec<AnnualValue>,
    pub mean: f64,
    pub std: f64,
    /// year -> month -> projected value
    pub pred_values: BTreeMap<String, BTreeMap<String, f64>>,
    /// year -> month -> threshold label
    pub threshold_statuses: BTreeMap<String, BTreeMap<String, String>>,
    /// year -> month -> fine-grained anomaly label
    pub anomalies: BTreeMap<String, BTreeMap<String, String>>,
    /// year -> coarse annual anomaly flag
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annual_anomaly: BTreeMap<String, String>,
    /// month -> seasonal label, identical for every forecast year
    pub seasonal_trends: BTreeMap<String, String>,
}

/// One location's slice of the cache: its per-variable reports plus the
/// optional opaque travel-tips entry that shares the same JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    #[serde(rename = "TravelTips", default, skip_serializing_if = "Option::is_none")]
    pub travel_tips: Option<TravelTips>,
    #[serde(flatten)]
    pub variables: BTreeMap<String, VariableReport>,
}

impl LocationEntry {
    /// Coordinates of this location, taken from any variable report.
    /// All reports for a location carry the same lat/lon.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.variables.values().next().map(|v| (v.lat, v.lon))
    }
}

/// The terminal, persisted artifact: location -> entry.
pub type Cache = BTreeMap<String, LocationEntry>;
