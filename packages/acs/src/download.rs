//! Download driver: one request per (year, state), one CSV per year.

use std::path::{Path, PathBuf};
use std::time::Duration;

use census_dashboard_geography_models::{GeoUnit, fips};
use serde_json::Value;

use crate::AcsError;
use crate::progress::ProgressCallback;
use crate::retry::{AcsTransport, REQUEST_TIMEOUT, ReqwestTransport, fetch_with_retry};
use crate::variables::Profile;

/// Value written for a missing measurement.
const MISSING_VALUE: &str = "-1";

/// Settings for one download run.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Variable set, file names and defaults.
    pub profile: Profile,
    pub start_year: i32,
    /// Inclusive.
    pub end_year: i32,
    /// Two-digit state FIPS codes.
    pub states: Vec<String>,
    pub output_dir: PathBuf,
    /// Census API key; requests are sent without one when `None`.
    pub api_key: Option<String>,
    /// Network attempts per request.
    pub max_retries: u32,
    /// Pause after every (year, state) request.
    pub delay: Duration,
}

/// Outcome of a download run.
#[derive(Debug, Default)]
pub struct DownloadSummary {
    /// CSV files written, one per year.
    pub files: Vec<PathBuf>,
    /// Tract rows written across all files.
    pub rows_written: u64,
    /// (year, state) pairs with no usable payload.
    pub skipped: Vec<(i32, String)>,
}

/// ACS5 endpoint for `year`.
#[must_use]
pub fn acs5_url(year: i32) -> String {
    format!("https://api.census.gov/data/{year}/acs/acs5")
}

/// Output file for `year`, e.g. `acs5_census_2023.csv`.
#[must_use]
pub fn output_path(dir: &Path, profile: Profile, year: i32) -> PathBuf {
    dir.join(format!("{}_{year}.csv", profile.file_stem()))
}

/// Query parameters for every tract of one state.
#[must_use]
pub fn request_params(
    profile: Profile,
    state_fips: &str,
    api_key: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("get", profile.get_param()),
        ("for", "tract:*".to_string()),
        ("in", format!("state:{state_fips}")),
    ];
    if let Some(key) = api_key {
        params.push(("key", key.to_string()));
    }
    params
}

/// Resolves a comma-separated list of FIPS codes or state abbreviations.
/// `None` or an empty list selects all 50 states and DC.
///
/// # Errors
///
/// Returns [`AcsError::UnknownState`] for an entry matching no state.
pub fn parse_states(list: Option<&str>) -> Result<Vec<String>, AcsError> {
    let entries: Vec<&str> = list
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if entries.is_empty() {
        return Ok(fips::all_fips().map(String::from).collect());
    }

    entries
        .into_iter()
        .map(|entry| {
            if fips::state_name(entry).is_some() {
                Ok(entry.to_string())
            } else {
                fips::abbr_to_fips(entry)
                    .map(String::from)
                    .ok_or_else(|| AcsError::UnknownState(entry.to_string()))
            }
        })
        .collect()
}

/// Converts an ACS payload (header row, then one row per tract) into CSV
/// records: `year, state, county, tract`, then one value per variable.
///
/// The geography codes are the last three columns of each row and the
/// variable values follow the leading `NAME` column. `null` values become
/// `-1`. Rows too short to hold every column are dropped.
#[must_use]
pub fn payload_records(year: i32, payload: &Value, variable_count: usize) -> Vec<Vec<String>> {
    let Some(rows) = payload.as_array() else {
        return Vec::new();
    };

    rows.iter()
        .skip(1)
        .filter_map(Value::as_array)
        .filter_map(|row| {
            if row.len() < variable_count + 4 {
                log::warn!("Dropping short ACS row ({} columns)", row.len());
                return None;
            }
            let [state, county, tract] = &row[row.len() - 3..] else {
                return None;
            };
            let unit = GeoUnit::new(year, cell(state), cell(county), cell(tract));
            let mut record = Vec::with_capacity(variable_count + 4);
            record.extend([
                unit.year.to_string(),
                unit.state_fips,
                unit.county_fips,
                unit.tract,
            ]);
            record.extend(row[1..=variable_count].iter().map(cell));
            Some(record)
        })
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => MISSING_VALUE.to_string(),
        Value::String(s) if s == "null" => MISSING_VALUE.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Downloads every (year, state) pair of `config` through `transport`.
///
/// A pair whose request fails is logged and skipped. The configured delay
/// follows every request, successful or not.
///
/// # Errors
///
/// Returns [`AcsError`] if the output directory or a CSV file cannot be
/// written.
pub async fn download(
    transport: &dyn AcsTransport,
    config: &DownloadConfig,
    progress: &dyn ProgressCallback,
) -> Result<DownloadSummary, AcsError> {
    std::fs::create_dir_all(&config.output_dir)?;

    let years: Vec<i32> = (config.start_year..=config.end_year).collect();
    if years.is_empty() {
        log::warn!(
            "Empty year range {}..={}, nothing to download",
            config.start_year,
            config.end_year
        );
    }
    progress.set_total((years.len() * config.states.len()) as u64);

    let profile = config.profile;
    let header = profile.csv_header();
    let variable_count = profile.variables().len();
    let mut summary = DownloadSummary::default();

    for year in years {
        log::info!("Processing {profile} data for year: {year}");
        let url = acs5_url(year);
        let path = output_path(&config.output_dir, profile, year);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&header)?;

        for state in &config.states {
            progress.set_message(format!(
                "{year} {}",
                fips::state_abbr(state).unwrap_or(state.as_str())
            ));
            let params = request_params(profile, state, config.api_key.as_deref());

            match fetch_with_retry(transport, &url, &params, config.max_retries).await {
                Ok(payload) if payload.as_array().is_some_and(|rows| !rows.is_empty()) => {
                    let records = payload_records(year, &payload, variable_count);
                    for record in &records {
                        writer.write_record(record)?;
                    }
                    summary.rows_written += records.len() as u64;
                    log::debug!("{year} state {state}: {} tracts", records.len());
                }
                Ok(_) => {
                    log::warn!("Skipping {year} {state}: empty payload");
                    summary.skipped.push((year, state.clone()));
                }
                Err(e) => {
                    log::warn!("Skipping {year} {state} due to errors: {e}");
                    summary.skipped.push((year, state.clone()));
                }
            }

            progress.inc(1);
            tokio::time::sleep(config.delay).await;
        }

        writer.flush()?;
        log::info!("Data for {year} saved in {}", path.display());
        summary.files.push(path);
    }

    progress.finish(format!(
        "{} rows in {} files, {} skipped",
        summary.rows_written,
        summary.files.len(),
        summary.skipped.len()
    ));

    Ok(summary)
}

/// [`download`] against the live Census API.
///
/// # Errors
///
/// Returns [`AcsError`] if the HTTP client cannot be built or the output
/// cannot be written.
pub async fn download_from_census(
    config: &DownloadConfig,
    progress: &dyn ProgressCallback,
) -> Result<DownloadSummary, AcsError> {
    let transport = ReqwestTransport::new(REQUEST_TIMEOUT)?;
    download(&transport, config, progress).await
}
