//! # HydroMonitor
//!
//! Record, sync, and analyze hydroponic sensor readings (pH, TDS,
//! temperature, humidity, dissolved oxygen) for a handful of plant species.
//!
//! ## Features
//!
//! - **Dashboard client**: state store plus text pages for the dashboard,
//!   entry form, analytics and a mock leaf predictor
//! - **CSV bridge**: export every reading, import readings from a file
//! - **Trends**: two-half average heuristic with per-plant range verdicts
//! - **Readings server**: Axum REST API with an optional JSON snapshot
//!
//! ## Modules
//!
//! - [`storage`]: Reading model and the server-side store
//! - [`plants`]: Static plant profiles and optimal ranges
//! - [`validation`]: Entry form rules
//! - [`transfer`]: CSV import and export
//! - [`analysis`]: Windows, trends and mock predictions
//! - [`remote`]: REST client for the readings server
//! - [`dashboard`]: Client state store and page rendering
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hydromonitor::dashboard::{self, DashboardState};
//! use hydromonitor::remote::{ClientConfig, ReadingsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReadingsClient::new(ClientConfig::default())?;
//!
//!     let mut state = DashboardState::new();
//!     state.load(&client).await?;
//!
//!     print!("{}", dashboard::render(&state, chrono::Utc::now()));
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod plants;
pub mod remote;
pub mod storage;
pub mod transfer;
pub mod validation;

// Re-export top-level types for convenience
pub use storage::{
    Metric, Reading, ReadingId, ReadingStore, StorageConfig, StorageError, StorageResult,
};

pub use plants::{OptimalRange, PlantProfile, RangeStatus};

pub use validation::{ReadingForm, ValidatedForm, ValidationError};

pub use transfer::{export_csv, import_str, ExportError, ImportError};

pub use analysis::{Trend, TrendAnalysis, WindowSummary};

pub use remote::{ClientConfig, ClientError, ReadingsApi, ReadingsClient};

pub use dashboard::{DashboardError, DashboardState, Notice, Page};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    ClientSettings, Config, ConfigError, DashboardConfig, LoggingConfig,
    StorageConfig as ConfigStorageConfig,
};
