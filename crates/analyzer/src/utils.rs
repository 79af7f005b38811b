use clap::Parser;
use climatecast_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_HISTORY_END, DEFAULT_HISTORY_START,
    FORECAST_SPAN,
};
use serde::Deserialize;
use slog::{o, Drain, Level, Logger};
use std::env;

/// One geographic point and the folder holding its per-year source records.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub folder: String,
}

#[derive(Parser, Clone, Debug, Deserialize, Default)]
#[command(
    author,
    version,
    about = "Climatecast Analyzer - precomputes statistics and forecasts from gridded records"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CLIMATECAST_ANALYZER_CONFIG, ./analyzer.toml,
    /// $XDG_CONFIG_HOME/climatecast/analyzer.toml, /etc/climatecast/analyzer.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CLIMATECAST_ANALYZER_LEVEL")]
    pub level: Option<String>,

    /// Output path for the cache artifact
    #[arg(short, long, env = "CLIMATECAST_ANALYZER_OUTPUT")]
    pub output: Option<String>,

    /// First year of the historical window (inclusive)
    #[arg(long, env = "CLIMATECAST_ANALYZER_START_YEAR")]
    pub start_year: Option<i32>,

    /// Last year of the historical window (inclusive)
    #[arg(long, env = "CLIMATECAST_ANALYZER_END_YEAR")]
    pub end_year: Option<i32>,

    /// Locations to analyze; config file only
    #[arg(skip)]
    #[serde(default)]
    pub locations: Vec<LocationConfig>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn output(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| "./full_analysed_cache.json".to_string())
    }

    pub fn start_year(&self) -> i32 {
        self.start_year.unwrap_or(DEFAULT_HISTORY_START)
    }

    pub fn end_year(&self) -> i32 {
        self.end_year.unwrap_or(DEFAULT_HISTORY_END)
    }

    /// The forecast horizon: the years immediately following the window.
    pub fn target_years(&self) -> Vec<i32> {
        let end = self.end_year();
        (end + 1..=end + FORECAST_SPAN).collect()
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Cli {
    let cli_args = Cli::parse();

    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CLIMATECAST_ANALYZER_CONFIG", "analyzer.toml")
    };

    let file_config: Cli = load_config(&source).unwrap_or_default();

    // CLI args override file config (env vars are handled by clap)
    Cli {
        config: cli_args.config,
        level: cli_args.level.or(file_config.level),
        output: cli_args.output.or(file_config.output),
        start_year: cli_args.start_year.or(file_config.start_year),
        end_year: cli_args.end_year.or(file_config.end_year),
        locations: if cli_args.locations.is_empty() {
            file_config.locations
        } else {
            cli_args.locations
        },
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_default();
    let log_level = match level_str.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    };

    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}
