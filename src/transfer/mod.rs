//! CSV Bridge
//!
//! Moves readings in and out of CSV files:
//! - Export writes all seven columns
//! - Import reads the five core columns only
//!
//! The asymmetry means an export-then-import round trip keeps id, timestamp,
//! temperature, ph and tds, and drops humidity and dissolved oxygen.

mod csv_export;
mod csv_import;

pub use csv_export::{export_csv, export_file_name, ExportError, EXPORT_HEADERS};
pub use csv_import::{import_str, ImportError, REQUIRED_HEADERS};
