//! Dashboard state store
//!
//! Holds everything the pages render and applies user actions to it. Every
//! action that talks to the server awaits at most one request through
//! [`ReadingsApi`]; failures land in the single notice slot.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use thiserror::Error;

use crate::analysis::{default_colors, predict_plant, random_colors, ColorSample};
use crate::plants;
use crate::remote::{ClientError, ReadingsApi};
use crate::storage::Reading;
use crate::transfer::{self, ExportError, ImportError};
use crate::validation::{ReadingForm, ValidationError};

use super::Page;

/// Trailing window used when the past-days input is not a number
pub const DEFAULT_PAST_DAYS: u32 = 7;

/// Message shown after a successful import
pub const IMPORT_SUCCESS: &str = "CSV imported successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
}

/// The one user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }
}

/// Failure of a dashboard action; `Display` is the text the user sees
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to fetch data from server.")]
    Fetch(#[source] ClientError),

    #[error("Failed to save entry.")]
    Save(#[source] ClientError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Error importing CSV: Please ensure the file is valid.")]
    ImportUpload(#[source] ClientError),

    #[error("Error exporting CSV: {0}")]
    Export(#[from] ExportError),
}

/// CSV text ready to be saved under `file_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub file_name: String,
    pub contents: String,
}

/// In-memory state of the dashboard client
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub readings: Vec<Reading>,
    pub page: Page,
    pub form: ReadingForm,
    pub dark_mode: bool,
    pub past_days: u32,
    pub notice: Option<Notice>,
    pub loading: bool,
    pub predicted_plant: &'static str,
    pub colors: Vec<ColorSample>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            readings: Vec::new(),
            page: Page::Dashboard,
            form: ReadingForm::blank(),
            dark_mode: true,
            past_days: DEFAULT_PAST_DAYS,
            notice: None,
            loading: false,
            predicted_plant: plants::all()[0].name,
            colors: default_colors(),
        }
    }

    /// Replace the reading list with the server's
    pub async fn load(&mut self, api: &dyn ReadingsApi) -> Result<(), DashboardError> {
        self.loading = true;
        let result = api.fetch_readings().await;
        self.loading = false;

        match result {
            Ok(readings) => {
                tracing::info!(count = readings.len(), "Loaded readings");
                self.readings = readings;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch readings");
                self.fail(DashboardError::Fetch(e))
            }
        }
    }

    /// Validate the form and post it as a new reading
    pub async fn submit(&mut self, api: &dyn ReadingsApi) -> Result<Reading, DashboardError> {
        self.notice = None;

        let reading = match self.form.validate() {
            Ok(valid) => valid.into_reading(),
            Err(e) => return self.fail(e.into()),
        };

        if let Err(e) = api.submit_reading(&reading).await {
            tracing::warn!(error = %e, "Failed to save reading");
            return self.fail(DashboardError::Save(e));
        }

        tracing::info!(id = %reading.id, "Saved reading");
        self.readings.push(reading.clone());
        self.reset_form();
        self.page = Page::Dashboard;
        Ok(reading)
    }

    /// Parse CSV text, post it as one batch and append it on success
    ///
    /// Rejected files leave the reading list untouched.
    pub async fn import_csv(
        &mut self,
        api: &dyn ReadingsApi,
        csv_data: &str,
    ) -> Result<usize, DashboardError> {
        let imported = match transfer::import_str(csv_data) {
            Ok(readings) => readings,
            Err(e) => return self.fail(e.into()),
        };

        if let Err(e) = api.submit_batch(&imported).await {
            tracing::warn!(error = %e, "Failed to upload imported readings");
            return self.fail(DashboardError::ImportUpload(e));
        }

        let count = imported.len();
        tracing::info!(count, "Imported readings");
        self.readings.extend(imported);
        self.notice = Some(Notice::success(IMPORT_SUCCESS));
        Ok(count)
    }

    /// Serialize every reading for download, named after `today`
    pub fn export_csv(&mut self, today: NaiveDate) -> Result<CsvDownload, DashboardError> {
        match transfer::export_csv(&self.readings) {
            Ok(contents) => Ok(CsvDownload {
                file_name: transfer::export_file_name(today),
                contents,
            }),
            Err(e) => self.fail(e.into()),
        }
    }

    /// Export named after the current UTC date
    pub fn export_csv_today(&mut self) -> Result<CsvDownload, DashboardError> {
        self.export_csv(Utc::now().date_naive())
    }

    /// Blank form with today's date; clears the notice
    pub fn reset_form(&mut self) {
        self.form = ReadingForm::blank();
        self.notice = None;
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Apply the past-days input: at least one day, 7 when not a number
    pub fn set_past_days(&mut self, input: &str) {
        self.past_days = parse_past_days(input);
    }

    /// Draw a fresh mock prediction
    pub fn refresh_prediction<R: Rng>(&mut self, rng: &mut R) {
        self.predicted_plant = predict_plant(rng);
        self.colors = random_colors(rng);
    }

    fn fail<T>(&mut self, err: DashboardError) -> Result<T, DashboardError> {
        self.notice = Some(Notice::error(err.to_string()));
        Err(err)
    }
}

/// Leading integer of the input, clamped to at least 1; 7 when absent
pub fn parse_past_days(input: &str) -> u32 {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) | Err(_) => DEFAULT_PAST_DAYS,
        Ok(n) => (sign * n).clamp(1, i64::from(u32::MAX)) as u32,
    }
}
