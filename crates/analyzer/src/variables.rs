//! Static configuration of the tracked physical quantities.
//!
//! One `VariableSpec` per quantity, mapping the public variable name to the
//! MERRA-2 collection its records come from, the source field name(s) inside
//! those records, the output unit, and the fixed threshold the classifier
//! compares projections against.

/// A tracked physical quantity and how to extract it from the source records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableSpec {
    /// Public name, used as the cache key
    pub name: &'static str,
    /// Substring identifying this variable's source files (MERRA-2 collection)
    pub file_prefix: &'static str,
    /// Source field name(s); two entries mean orthogonal vector components
    pub fields: &'static [&'static str],
    /// Output unit after conversion
    pub unit: &'static str,
    /// Fixed reference level for threshold classification
    pub threshold: f64,
}

impl VariableSpec {
    /// Wind speed is the only variable derived from two orthogonal components.
    pub fn is_vector(&self) -> bool {
        self.fields.len() == 2
    }
}

pub const VARIABLES: [VariableSpec; 6] = [
    VariableSpec {
        name: "AirQuality",
        file_prefix: "M2TMNXAER",
        fields: &["TOTEXTTAU"],
        unit: "AOD",
        threshold: 0.25,
    },
    VariableSpec {
        name: "Rainfall",
        file_prefix: "M2TMNXFLX",
        fields: &["PRECCON"],
        unit: "mm/day",
        threshold: 5.0,
    },
    VariableSpec {
        name: "Snowfall",
        file_prefix: "M2TMNXFLX",
        fields: &["PRECSNO"],
        unit: "cm/day",
        threshold: 5.0,
    },
    VariableSpec {
        name: "Humidity",
        file_prefix: "M2TMNXSLV",
        fields: &["QV2M"],
        unit: "%",
        threshold: 75.0,
    },
    VariableSpec {
        name: "Temperature",
        file_prefix: "M2TMNXSLV",
        fields: &["T2M"],
        unit: "°C",
        threshold: 30.0,
    },
    VariableSpec {
        name: "Windspeed",
        file_prefix: "M2TMNXSLV",
        fields: &["U10M", "V10M"],
        unit: "km/h",
        threshold: 50.0,
    },
];
