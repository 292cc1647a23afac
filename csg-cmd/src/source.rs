//! Fetching report bytes from a local path or an http(s) URL.

use anyhow::Context;
use csg_cocorahs::report::{load_report, CleanedReport, ReportEncoding};
use log::info;

/// Request timeout for remote reports.
pub const FETCH_TIMEOUT_SECS: u64 = 60;

/// Whether the location names a remote report.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Read the raw report bytes.
pub async fn read_source(location: &str) -> anyhow::Result<Vec<u8>> {
    if is_remote(location) {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        info!("Fetching report from {}", location);
        let response = client
            .get(location)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", location))?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    } else {
        tokio::fs::read(location)
            .await
            .with_context(|| format!("Failed to read {}", location))
    }
}

/// Read, decode and clean a report.
pub async fn load_cleaned_report(location: &str) -> anyhow::Result<CleanedReport> {
    let bytes = read_source(location).await?;
    let encoding = ReportEncoding::from_location(location);
    let report = load_report(&bytes, encoding)
        .with_context(|| format!("Failed to load report {}", location))?;
    info!(
        "Loaded {} observations from {} ({} dropped)",
        report.observations.len(),
        location,
        report.dropped
    );
    Ok(report)
}
