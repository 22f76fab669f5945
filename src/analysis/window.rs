//! Time windows over the reading list
//!
//! Everything the analytics and dashboard pages show is computed over a
//! trailing window of N days ending at `now`. Readings whose timestamp cannot
//! be parsed never fall inside a window.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::cmp::Reverse;

use crate::storage::{Metric, Reading};

/// Start of a trailing window of `days` days
///
/// Windows reaching past the earliest representable time start there.
pub fn window_start(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Readings recorded at or after the window start, oldest first
pub fn in_window(readings: &[Reading], days: u32, now: DateTime<Utc>) -> Vec<&Reading> {
    let cutoff = window_start(now, days);

    let mut recent: Vec<(DateTime<Utc>, &Reading)> = readings
        .iter()
        .filter_map(|r| r.recorded_at().map(|at| (at, r)))
        .filter(|(at, _)| *at >= cutoff)
        .collect();

    recent.sort_by_key(|(at, _)| *at);
    recent.into_iter().map(|(_, r)| r).collect()
}

/// One point of a metric chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Calendar date of the reading
    pub label: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Points for one metric inside the window, oldest first
pub fn chart_series(
    readings: &[Reading],
    metric: Metric,
    days: u32,
    now: DateTime<Utc>,
) -> Vec<ChartPoint> {
    in_window(readings, days, now)
        .into_iter()
        .filter_map(|r| {
            let timestamp = r.recorded_at()?;
            let value = r.value(metric)?;
            Some(ChartPoint {
                label: timestamp.format("%Y-%m-%d").to_string(),
                timestamp,
                value,
            })
        })
        .collect()
}

/// Entry count and per-metric averages over a window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub days: u32,
    pub entries: usize,
    pub averages: Vec<(Metric, Option<f64>)>,
}

impl WindowSummary {
    pub fn average(&self, metric: Metric) -> Option<f64> {
        self.averages
            .iter()
            .find(|(m, _)| *m == metric)
            .and_then(|(_, avg)| *avg)
    }

    /// Average formatted to one decimal, or "N/A"
    pub fn average_display(&self, metric: Metric) -> String {
        self.average(metric)
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

pub fn summarize(readings: &[Reading], days: u32, now: DateTime<Utc>) -> WindowSummary {
    let window = in_window(readings, days, now);

    let averages = Metric::ALL
        .into_iter()
        .map(|metric| {
            let values: Vec<f64> = window.iter().filter_map(|r| r.value(metric)).collect();
            (metric, mean(&values))
        })
        .collect();

    WindowSummary {
        days,
        entries: window.len(),
        averages,
    }
}

/// The `limit` newest readings, newest first
pub fn recent(readings: &[Reading], limit: usize) -> Vec<&Reading> {
    let mut sorted: Vec<&Reading> = readings.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.recorded_at()));
    sorted.truncate(limit);
    sorted
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ReadingId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap()
    }

    fn at(days_ago: i64, ph: f64) -> Reading {
        let ts = (now() - Duration::days(days_ago)).to_rfc3339();
        Reading::new(ReadingId::new(days_ago.to_string()), ts, 22.0, ph, 800.0)
    }

    #[test]
    fn test_window_filters_and_sorts() {
        let readings = vec![at(1, 6.1), at(10, 5.0), at(3, 6.3), at(0, 6.0)];

        let window = in_window(&readings, 7, now());
        let ids: Vec<&str> = window.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "0"]);
    }

    #[test]
    fn test_window_boundary_inclusive() {
        let readings = vec![at(7, 6.0)];
        assert_eq!(in_window(&readings, 7, now()).len(), 1);
        assert_eq!(in_window(&readings, 6, now()).len(), 0);
    }

    #[test]
    fn test_unparseable_timestamp_excluded() {
        let mut bad = at(1, 6.0);
        bad.timestamp = "sometime".to_string();
        assert!(in_window(&[bad], 30, now()).is_empty());
    }

    #[test]
    fn test_chart_series_labels() {
        let readings = vec![at(2, 6.2), at(1, 6.4)];
        let series = chart_series(&readings, Metric::Ph, 7, now());

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "2024-01-18");
        assert_eq!(series[1].value, 6.4);

        // Imported rows carry no humidity.
        assert!(chart_series(&readings, Metric::Humidity, 7, now()).is_empty());
    }

    #[test]
    fn test_summary_averages() {
        let readings = vec![at(1, 6.0), at(2, 7.0), at(20, 1.0)];
        let summary = summarize(&readings, 7, now());

        assert_eq!(summary.entries, 2);
        assert_eq!(summary.average(Metric::Ph), Some(6.5));
        assert_eq!(summary.average_display(Metric::Ph), "6.5");
        assert_eq!(summary.average_display(Metric::Humidity), "N/A");
    }

    #[test]
    fn test_huge_window_covers_everything() {
        assert_eq!(window_start(now(), u32::MAX), DateTime::<Utc>::MIN_UTC);

        let readings = vec![at(1, 6.0), at(4000, 7.0)];
        let summary = summarize(&readings, 100_000_000, now());
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.average(Metric::Ph), Some(6.5));
        assert_eq!(chart_series(&readings, Metric::Ph, u32::MAX, now()).len(), 2);
    }

    #[test]
    fn test_recent_newest_first() {
        let readings: Vec<Reading> = (0..8).map(|d| at(d, 6.0)).collect();
        let newest = recent(&readings, 5);

        let ids: Vec<&str> = newest.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }
}
