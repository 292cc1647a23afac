//! Export the cleaned observation table.

use crate::source::load_cleaned_report;
use csg_cocorahs::report::write_cleaned_csv;
use log::info;

/// Load the report, clean and sort it, and write it as CSV to `output`.
pub async fn run_clean(input: &str, output: &str) -> anyhow::Result<()> {
    let report = load_cleaned_report(input).await?;

    let mut buf: Vec<u8> = Vec::new();
    write_cleaned_csv(&report.observations, &mut buf)?;
    tokio::fs::write(output, &buf).await?;

    info!(
        "Clean complete. {} observations written to {}",
        report.observations.len(),
        output
    );
    Ok(())
}
