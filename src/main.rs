use clap::Parser;
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use ufo_aggregator::cli::{OutputFormat, output_path, run_aggregation};

/// Directory holding the file-backed input sources.
const INPUT_DIR: &str = "data/in";

/// Directory the aggregated output is written to.
const OUTPUT_DIR: &str = "data/out";

/// Aggregates UFO sighting reports from multiple sources into a target repository for analysis
#[derive(Parser)]
#[command(name = "ufoagg", version)]
struct Cli {
    /// Name of the output file, without extension
    outfile: String,

    /// Output format for the aggregated data
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = env_logger::Env::default().filter_or("LOG_LEVEL", "info");
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    std::fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("Failed to create output directory {}", OUTPUT_DIR))?;

    let target = output_path(OUTPUT_DIR, &cli.outfile, cli.format);
    log::info!(
        "Aggregating sightings into {}",
        target.display().bright_black()
    );

    let loader = cli.format.loader(&target);
    let total = run_aggregation(INPUT_DIR, loader).await?;

    println!("Total new records: {}", total);
    Ok(())
}
