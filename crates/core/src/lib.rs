//! Climatecast Core Library
//!
//! Shared pieces for the analyzer batch job and the query server:
//! - Configuration loading (XDG-compliant)
//! - Filesystem utilities
//! - The typed cache artifact both services agree on

mod cache;
mod config;
pub mod fs;

pub use cache::{
    month_name, AnnualValue, Cache, LocationEntry, TravelTips, VariableReport, MONTHS,
};
pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::{ensure_dir_exists, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climatecast";

/// Default query server port
pub const DEFAULT_SERVER_PORT: u16 = 9300;

/// Default historical window (inclusive)
pub const DEFAULT_HISTORY_START: i32 = 2015;
pub const DEFAULT_HISTORY_END: i32 = 2024;

/// Number of years projected past the historical window
pub const FORECAST_SPAN: i32 = 2;
