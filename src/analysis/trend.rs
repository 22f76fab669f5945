//! Trend heuristic
//!
//! Splits the values of a window into a first and a second half and compares
//! their averages. With an odd count the middle value belongs to both halves.
//! The window average is then placed against every plant's optimal range.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::analysis::window::{in_window, mean};
use crate::plants::{self, RangeStatus};
use crate::storage::{Metric, Reading};

/// Slopes within ±this value count as stable
pub const SLOPE_THRESHOLD: f64 = 0.1;

/// Direction of a metric over the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

impl Trend {
    pub fn from_slope(slope: f64) -> Self {
        if slope > SLOPE_THRESHOLD {
            Trend::Increasing
        } else if slope < -SLOPE_THRESHOLD {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
            Trend::InsufficientData => "Insufficient data",
        })
    }
}

/// Window average compared against one plant's range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantRangeStatus {
    pub plant: &'static str,
    pub range: &'static str,
    pub status: RangeStatus,
}

impl fmt::Display for PlantRangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({}).", self.plant, self.status, self.range)
    }
}

/// Result of analyzing one metric over a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    pub metric: Metric,
    pub days: u32,
    pub trend: Trend,
    /// Second-half average minus first-half average
    pub slope: f64,
    /// Average over the whole window, `None` with insufficient data
    pub average: Option<f64>,
    pub range_status: Vec<PlantRangeStatus>,
}

impl TrendAnalysis {
    pub fn slope_display(&self) -> String {
        format!("{:.2}", self.slope)
    }

    /// Range verdicts joined into one sentence per plant
    pub fn range_summary(&self) -> String {
        self.range_status
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Trend and slope of an ordered series
pub fn classify_series(values: &[f64]) -> (Trend, f64) {
    let n = values.len();
    if n < 2 {
        return (Trend::InsufficientData, 0.0);
    }

    let first = &values[..n.div_ceil(2)];
    let second = &values[n / 2..];

    let slope = match (mean(first), mean(second)) {
        (Some(a), Some(b)) => b - a,
        _ => 0.0,
    };

    (Trend::from_slope(slope), slope)
}

/// Analyze one metric over the trailing `days` days
pub fn analyze(readings: &[Reading], metric: Metric, days: u32, now: DateTime<Utc>) -> TrendAnalysis {
    let values: Vec<f64> = in_window(readings, days, now)
        .into_iter()
        .filter_map(|r| r.value(metric))
        .collect();

    let (trend, slope) = classify_series(&values);
    if trend == Trend::InsufficientData {
        return TrendAnalysis {
            metric,
            days,
            trend,
            slope,
            average: None,
            range_status: Vec::new(),
        };
    }

    let average = mean(&values);
    let range_status = average
        .map(|avg| compare_to_plants(metric, avg))
        .unwrap_or_default();

    tracing::debug!(
        metric = metric.key(),
        days,
        points = values.len(),
        slope,
        %trend,
        "Analyzed trend"
    );

    TrendAnalysis {
        metric,
        days,
        trend,
        slope,
        average,
        range_status,
    }
}

fn compare_to_plants(metric: Metric, average: f64) -> Vec<PlantRangeStatus> {
    plants::all()
        .iter()
        .filter_map(|plant| match plant.optimal_range(metric) {
            Ok(range) => Some(PlantRangeStatus {
                plant: plant.name,
                range: plant.optimal_range_str(metric),
                status: range.classify(average),
            }),
            Err(e) => {
                tracing::warn!(plant = plant.name, error = %e, "Skipping plant with bad range");
                None
            }
        })
        .collect()
}
