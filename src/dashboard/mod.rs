//! Dashboard Client
//!
//! A state store driven by user actions plus a view router that renders the
//! current page as plain text:
//! - Dashboard: plant cards and the newest readings
//! - Entry: the new-reading form
//! - Analytics: per-metric charts and trend verdicts
//! - ML model: the mock leaf predictor

pub mod pages;
pub mod state;

pub use pages::render;
pub use state::{
    parse_past_days, CsvDownload, DashboardError, DashboardState, Notice, NoticeKind,
    DEFAULT_PAST_DAYS, IMPORT_SUCCESS,
};

use std::fmt;
use std::str::FromStr;

/// Full-page views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Entry,
    Analytics,
    MlModel,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Entry, Page::Analytics, Page::MlModel];

    pub fn key(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Entry => "entry",
            Page::Analytics => "analytics",
            Page::MlModel => "mlModel",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "HydroMonitor",
            Page::Entry => "Add New Entry",
            Page::Analytics => "Analytics Dashboard",
            Page::MlModel => "ML Model - Leaves Predictor & Color Analysis",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Page::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(wanted))
            .or(match wanted.to_ascii_lowercase().as_str() {
                "ml" | "ml-model" | "model" => Some(Page::MlModel),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown page: {}", s))
    }
}
