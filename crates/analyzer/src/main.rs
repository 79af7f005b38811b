use analyzer::{build_cache, get_config_info, setup_logger, write_cache};
use anyhow::bail;
use slog::info;

fn main() -> Result<(), anyhow::Error> {
    let cli = get_config_info();
    let logger = setup_logger(&cli);

    info!(logger, "Climatecast Analyzer starting...");
    info!(logger, "  Output: {}", cli.output());
    info!(
        logger,
        "  Historical window: {}-{}",
        cli.start_year(),
        cli.end_year()
    );
    info!(logger, "  Forecast years: {:?}", cli.target_years());
    info!(logger, "  Locations: {}", cli.locations.len());

    if cli.locations.is_empty() {
        bail!("no locations configured; add [[locations]] entries to analyzer.toml");
    }
    if cli.start_year() >= cli.end_year() {
        bail!(
            "historical window is empty: {}-{}",
            cli.start_year(),
            cli.end_year()
        );
    }

    // One location and one variable at a time; each pair's chain is
    // independent of every other pair.
    let cache = build_cache(&logger, &cli);

    let output = cli.output();
    write_cache(&cache, &output)?;
    info!(logger, "cache saved"; "path" => &output);
    Ok(())
}
