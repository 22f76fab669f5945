//! CSV Import
//!
//! Reads readings from a comma-separated file. The header must name the five
//! core columns, but rows are read by position: id, timestamp, temperature,
//! ph, tds. Humidity and dissolved oxygen are not imported.

use thiserror::Error;

use crate::storage::{now_timestamp, Reading, ReadingId};

/// Columns the header row must contain, in any order
pub const REQUIRED_HEADERS: [&str; 5] = ["id", "timestamp", "temperature", "ph", "tds"];

/// Errors that reject a whole CSV file
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid CSV file: No data found.")]
    NoData,

    #[error("Invalid CSV file: Required headers (id, timestamp, temperature, ph, tds) missing.")]
    MissingHeaders { missing: Vec<String> },

    #[error("Error importing CSV: Please ensure the file is valid.")]
    Malformed(#[from] csv::Error),
}

/// Parse readings from CSV text
pub fn import_str(csv_data: &str) -> Result<Vec<Reading>, ImportError> {
    // No quote handling: a comma always separates fields.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let mut lines = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        lines.push(record);
    }

    if lines.len() < 2 {
        return Err(ImportError::NoData);
    }

    let header = &lines[0];
    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !header.iter().any(|column| column == **required))
        .map(|required| required.to_string())
        .collect();

    if !missing.is_empty() {
        tracing::warn!(?missing, "CSV header is missing required columns");
        return Err(ImportError::MissingHeaders { missing });
    }

    let readings: Vec<Reading> = lines[1..].iter().map(parse_row).collect();
    tracing::debug!(rows = readings.len(), "Parsed CSV rows");

    Ok(readings)
}

fn parse_row(record: &csv::StringRecord) -> Reading {
    let field = |index: usize| record.get(index).unwrap_or("");
    let number = |index: usize| {
        field(index)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    };

    let id = match field(0) {
        "" => ReadingId::generate(),
        id => ReadingId::new(id),
    };
    let timestamp = match field(1) {
        "" => now_timestamp(),
        ts => ts.to_string(),
    };

    Reading::new(id, timestamp, number(2), number(3), number(4))
}
