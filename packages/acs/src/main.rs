#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the ACS5 census tract downloader.

mod terminal;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use census_dashboard_acs::download::{DownloadConfig, download_from_census, parse_states};
use census_dashboard_acs::variables::Profile;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "census_dashboard_acs",
    about = "Download ACS 5-year census tract data to CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Variable set to pull ("full" or "race")
    #[arg(long, default_value = "full")]
    profile: Profile,

    /// First survey year to download (2023 for full, 2010 for race)
    #[arg(long)]
    start_year: Option<i32>,

    /// Last survey year to download, inclusive (2024 for both profiles)
    #[arg(long)]
    end_year: Option<i32>,

    /// Comma-separated state FIPS codes or abbreviations (e.g. "06,TX").
    /// If not specified, downloads all 50 states + DC.
    #[arg(long)]
    states: Option<String>,

    /// Directory for the per-year CSV files
    #[arg(long, default_value = "data/acs")]
    output_dir: PathBuf,

    /// Census API key
    #[arg(long, env = "CENSUS_API_KEY")]
    api_key: Option<String>,

    /// Network attempts per request
    #[arg(long, default_value_t = 5)]
    max_retries: u32,

    /// Pause after every request, in milliseconds (1000 for full, 500 for race)
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ACS variables of the selected profile
    Variables,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = terminal::init_logger();
    let cli = Cli::parse();

    let profile = cli.profile;

    if matches!(cli.command, Some(Commands::Variables)) {
        for v in profile.variables() {
            println!("{:<12} {:<28} {}", v.code, v.group.to_string(), v.name);
        }
        return Ok(());
    }

    let (default_start, default_end) = profile.default_years();
    let config = DownloadConfig {
        profile,
        start_year: cli.start_year.unwrap_or(default_start),
        end_year: cli.end_year.unwrap_or(default_end),
        states: parse_states(cli.states.as_deref())?,
        output_dir: cli.output_dir,
        api_key: cli.api_key,
        max_retries: cli.max_retries,
        delay: cli
            .delay_ms
            .map_or_else(|| profile.default_delay(), Duration::from_millis),
    };

    if config.api_key.is_none() {
        log::warn!("No Census API key set; requests may be rate limited");
    }

    let start = Instant::now();
    let bar = terminal::RequestBar::new(&multi);
    let summary = download_from_census(&config, &bar).await?;

    log::info!(
        "Data download complete: {} rows in {} files ({} pairs skipped) in {:.1}s",
        summary.rows_written,
        summary.files.len(),
        summary.skipped.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
