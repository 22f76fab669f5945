//! Reading Analysis
//!
//! Presentation-side computations over the in-memory reading list:
//! - Trailing time windows, chart series and window summaries
//! - Two-half trend heuristic with per-plant range annotation
//! - Mock leaf predictions for the model page

pub mod prediction;
pub mod trend;
pub mod window;

pub use prediction::{default_colors, predict_plant, random_colors, ColorSample, LeafHealth};
pub use trend::{analyze, classify_series, PlantRangeStatus, Trend, TrendAnalysis, SLOPE_THRESHOLD};
pub use window::{chart_series, in_window, recent, summarize, window_start, ChartPoint, WindowSummary};
