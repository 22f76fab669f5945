//! CSV Export
//!
//! Writes every reading as one row of a fixed seven-column table. Values are
//! written without quoting; absent optional values become empty fields.

use chrono::NaiveDate;
use thiserror::Error;

use crate::storage::Reading;

/// Export column order
pub const EXPORT_HEADERS: [&str; 7] = [
    "id",
    "timestamp",
    "temperature",
    "ph",
    "tds",
    "humidity",
    "dissolvedOxy",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export produced invalid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Format readings as CSV text
pub fn export_csv(readings: &[Reading]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;

    for reading in readings {
        writer.write_record([
            reading.id.to_string(),
            reading.timestamp.clone(),
            reading.temperature.to_string(),
            reading.ph.to_string(),
            reading.tds.to_string(),
            optional(reading.humidity),
            optional(reading.dissolved_oxy),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    Ok(String::from_utf8(bytes)?)
}

/// Download name for an export taken on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("hydro_monitor_data_{}.csv", date.format("%Y-%m-%d"))
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ReadingId;
    use crate::transfer::csv_import::import_str;

    fn sample() -> Vec<Reading> {
        vec![
            Reading::new(ReadingId::new("1705312800000"), "2024-01-15T10:00:00.000Z", 22.0, 7.0, 500.0)
                .humidity(60.0)
                .dissolved_oxy(6.0),
            Reading::new(ReadingId::new("abc"), "2024-01-16", 21.5, 6.4, 950.0),
        ]
    }

    #[test]
    fn test_export_layout() {
        let csv = export_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "id,timestamp,temperature,ph,tds,humidity,dissolvedOxy");
        assert_eq!(lines[1], "1705312800000,2024-01-15T10:00:00.000Z,22,7,500,60,6");
        assert_eq!(lines[2], "abc,2024-01-16,21.5,6.4,950,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_export_empty() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "id,timestamp,temperature,ph,tds,humidity,dissolvedOxy");
    }

    #[test]
    fn test_export_then_import_drops_humidity_and_oxygen() {
        let source = sample();
        let restored = import_str(&export_csv(&source).unwrap()).unwrap();

        assert_eq!(restored.len(), source.len());
        for (before, after) in source.iter().zip(&restored) {
            assert_eq!(after.id, before.id);
            assert_eq!(after.timestamp, before.timestamp);
            assert_eq!(after.temperature, before.temperature);
            assert_eq!(after.ph, before.ph);
            assert_eq!(after.tds, before.tds);
            assert_eq!(after.humidity, None);
            assert_eq!(after.dissolved_oxy, None);
        }
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "hydro_monitor_data_2024-03-09.csv");
    }
}
