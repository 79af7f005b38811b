//! Immutable view over the analyzer's cache artifact.
//!
//! The whole artifact is read once at startup. A missing or malformed file
//! is fatal; the server has nothing to serve without it.

use std::fs;

use climatecast_core::{path_exists, Cache, LocationEntry};
use log::info;

#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("cache file not found: {0}")]
    NotFound(String),
    #[error("failed to read cache file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse cache file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Requested variable names are mapped through a fixed alias table before
/// lookup, absorbing spellings used by existing clients. Unknown names pass
/// through unchanged and degrade to sentinels downstream.
pub fn canonical_variable(requested: &str) -> &str {
    match requested {
        "Humiditiy" => "Humidity",
        "Air quality" => "AirQuality",
        other => other,
    }
}

#[derive(Debug)]
pub struct Snapshot {
    cache: Cache,
}

impl Snapshot {
    pub fn load(path: &str) -> Result<Snapshot, SnapshotError> {
        if !path_exists(path) {
            return Err(SnapshotError::NotFound(path.to_string()));
        }
        let raw = fs::read_to_string(path)?;
        let cache: Cache = serde_json::from_str(&raw)?;
        info!("loaded cache with {} locations from {}", cache.len(), path);
        Ok(Snapshot { cache })
    }

    pub fn from_cache(cache: Cache) -> Snapshot {
        Snapshot { cache }
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Nearest known location by squared distance on raw lat/lon degrees.
    /// Valid only while the candidate set stays tiny and well-separated;
    /// a larger set needs a geodesic metric. Locations without any variable
    /// report carry no coordinates and are skipped.
    pub fn nearest_location(&self, lat: f64, lon: f64) -> Option<(&str, &LocationEntry)> {
        let mut best: Option<(&str, &LocationEntry)> = None;
        let mut min_dist = f64::INFINITY;
        for (name, entry) in &self.cache {
            let Some((loc_lat, loc_lon)) = entry.coordinates() else {
                continue;
            };
            let dist = (lat - loc_lat).powi(2) + (lon - loc_lon).powi(2);
            if dist < min_dist {
                min_dist = dist;
                best = Some((name.as_str(), entry));
            }
        }
        best
    }
}
