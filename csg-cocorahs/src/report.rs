//! Loading CoCoRaHS daily reports into cleaned, date-ordered observations.
//!
//! # Report Formats
//!
//! - **JSON**: an array of objects keyed `ObservationDate`, `TotalPrecipAmt`,
//!   `NewSnowDepth`, `TotalSnowDepth` (the CoCoRaHS "full report" export).
//!   Other keys are ignored; measure values may be strings, numbers or null.
//! - **CSV** (has headers): the same four columns in any order, extra columns
//!   ignored.
//!
//! Either format may be gzip-compressed (`.json.gz`, `.csv.gz`).

use crate::error::{InputError, Result};
use crate::observation::{Observation, RawObservation};
use crate::Measure;
use flate2::read::GzDecoder;
use std::io::{Read, Write};

/// Header of the date column in CoCoRaHS exports.
pub const DATE_COLUMN: &str = "ObservationDate";

/// Serialization format of a report payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReportFormat {
    Json,
    Csv,
}

/// Format plus compression of a report payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ReportEncoding {
    pub format: ReportFormat,
    pub gzip: bool,
}

impl ReportEncoding {
    /// Infer the encoding from a file path or URL suffix.
    ///
    /// Query strings are ignored. Anything not ending in `.csv` (optionally
    /// followed by `.gz`) is treated as JSON, the native CoCoRaHS export.
    pub fn from_location(location: &str) -> ReportEncoding {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();
        let (stem, gzip) = match path.strip_suffix(".gz") {
            Some(stem) => (stem, true),
            None => (path.as_str(), false),
        };
        let format = if stem.ends_with(".csv") {
            ReportFormat::Csv
        } else {
            ReportFormat::Json
        };
        ReportEncoding { format, gzip }
    }
}

/// Observations that survived cleaning, sorted ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedReport {
    pub observations: Vec<Observation>,
    /// Rows dropped because their date could not be parsed.
    pub dropped: usize,
}

/// Decode a report payload (decompressing first if needed) into raw rows.
pub fn decode_report(bytes: &[u8], encoding: ReportEncoding) -> Result<Vec<RawObservation>> {
    let text = if encoding.gzip {
        let mut decoder = GzDecoder::new(bytes);
        let mut buf = String::new();
        decoder.read_to_string(&mut buf)?;
        buf
    } else {
        String::from_utf8(bytes.to_vec())?
    };
    match encoding.format {
        ReportFormat::Json => parse_json_report(&text),
        ReportFormat::Csv => parse_csv_report(&text),
    }
}

/// Parse a JSON array of report objects.
pub fn parse_json_report(json: &str) -> Result<Vec<RawObservation>> {
    let rows: Vec<RawObservation> = serde_json::from_str(json)?;
    log::debug!("report: parsed {} JSON rows", rows.len());
    Ok(rows)
}

/// Parse a CSV report with a header row.
///
/// Column positions are resolved from the header once; a missing required
/// column is an error rather than a silently empty measure.
pub fn parse_csv_report(csv_data: &str) -> Result<Vec<RawObservation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = rdr.headers()?.clone();
    let position = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| InputError::MissingColumn(name.to_string()).into())
    };
    let date_idx = position(DATE_COLUMN)?;
    let precip_idx = position(Measure::TotalPrecipAmt.column())?;
    let new_snow_idx = position(Measure::NewSnowDepth.column())?;
    let total_snow_idx = position(Measure::TotalSnowDepth.column())?;

    let mut rows = Vec::new();
    for result in rdr.records() {
        let r = result?;
        rows.push(RawObservation {
            observation_date: r.get(date_idx).unwrap_or("").trim().to_string(),
            total_precip_amt: r.get(precip_idx).unwrap_or("").to_string(),
            new_snow_depth: r.get(new_snow_idx).unwrap_or("").to_string(),
            total_snow_depth: r.get(total_snow_idx).unwrap_or("").to_string(),
        });
    }
    log::debug!("report: parsed {} CSV rows", rows.len());
    Ok(rows)
}

/// Clean every row, drop rows whose date does not parse, and sort the rest
/// ascending by date (stable).
pub fn clean_and_sort(rows: Vec<RawObservation>) -> CleanedReport {
    let total = rows.len();
    let mut observations: Vec<Observation> = Vec::with_capacity(total);
    let mut dropped = 0usize;
    for raw in rows {
        match Observation::try_from(raw) {
            Ok(obs) => observations.push(obs),
            Err(e) => {
                log::debug!("report: dropping row: {}", e);
                dropped += 1;
            }
        }
    }
    Observation::sort_by_date(&mut observations);
    if dropped > 0 {
        log::warn!(
            "report: dropped {} of {} rows with unparsable dates",
            dropped,
            total
        );
    }
    log::info!("report: {} cleaned observations", observations.len());
    CleanedReport {
        observations,
        dropped,
    }
}

/// Decode and clean a report payload in one step.
pub fn load_report(bytes: &[u8], encoding: ReportEncoding) -> Result<CleanedReport> {
    let rows = decode_report(bytes, encoding)?;
    Ok(clean_and_sort(rows))
}

/// Write cleaned observations as CSV with a header row:
/// `date,total_precip_amt,new_snow_depth,total_snow_depth`.
pub fn write_cleaned_csv<W: Write>(observations: &[Observation], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for obs in observations {
        wtr.serialize(obs)?;
    }
    wtr.flush()?;
    Ok(())
}
