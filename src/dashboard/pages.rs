//! Text rendering of the four pages

use chrono::{DateTime, Utc};
use std::fmt::{self, Display, Formatter};

use crate::analysis::{analyze, chart_series, recent, summarize};
use crate::plants;
use crate::storage::{Metric, Reading};

use super::state::{DashboardState, NoticeKind};
use super::Page;

/// Rows shown in the recent entries table
const RECENT_LIMIT: usize = 5;

/// Render the current page of `state` as of `now`
pub fn render(state: &DashboardState, now: DateTime<Utc>) -> String {
    PageView { state, now }.to_string()
}

/// Why a grower cares about a metric
pub fn significance(metric: Metric) -> &'static str {
    match metric {
        Metric::Ph => "pH affects nutrient availability in hydroponics. Most plants thrive within a pH range of 5.5-7.0. Values too low (acidic) can cause nutrient lockout, while values too high (alkaline) may reduce micronutrient uptake.",
        Metric::Tds => "TDS (Total Dissolved Solids) measures nutrient concentration in ppm. Nutrient-hungry plants like Chili prefer higher TDS, herbs like basil lower. Excessive TDS can cause nutrient burn, while too low TDS may lead to deficiencies.",
        Metric::Temperature => "Temperature affects plant metabolism and nutrient uptake. Most hydroponic plants prefer 18-26°C. Excessive heat stresses plants, low temperatures slow growth.",
        Metric::Humidity => "Humidity affects plant transpiration and nutrient uptake. Most hydroponic plants prefer humidity levels between 50-70%.",
        Metric::DissolvedOxygen => "Dissolved oxygen is crucial for root health in hydroponics. Levels above 5 mg/L are ideal for most plants.",
    }
}

struct PageView<'a> {
    state: &'a DashboardState,
    now: DateTime<Utc>,
}

impl Display for PageView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = self.state;
        let theme = if state.dark_mode { "Dark Mode" } else { "Light Mode" };

        writeln!(f, "{} [{}]", state.page.title(), theme)?;
        writeln!(f, "{}", "=".repeat(60))?;

        if state.loading {
            writeln!(f, "Loading...")?;
        }
        if let Some(notice) = &state.notice {
            let tag = match notice.kind {
                NoticeKind::Error => "error",
                NoticeKind::Success => "ok",
            };
            writeln!(f, "[{}] {}", tag, notice.text)?;
        }
        writeln!(f)?;

        match state.page {
            Page::Dashboard => self.dashboard(f),
            Page::Entry => self.entry(f),
            Page::Analytics => self.analytics(f),
            Page::MlModel => self.ml_model(f),
        }
    }
}

impl PageView<'_> {
    fn dashboard(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Advanced Hydroponic Plant Monitoring System")?;
        writeln!(f)?;

        for plant in plants::all() {
            writeln!(f, "{} - {}", plant.name, plant.description)?;
            if plant.has_image_file() {
                writeln!(f, "  Image: {}", plant.image)?;
            }
            writeln!(f, "  Optimal pH: {}", plant.optimal_ph)?;
            writeln!(f, "  Optimal TDS: {}", plant.optimal_tds)?;
            writeln!(f, "  Optimal Temperature: {}", plant.optimal_temperature)?;
        }

        if self.state.readings.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "Recent Entries")?;
        writeln!(
            f,
            "{:<15} {:<26} {:>11} {:>6} {:>7} {:>8} {:>16}",
            "ID", "Timestamp", "Temperature", "pH", "TDS", "Humidity", "Dissolved Oxygen"
        )?;
        for reading in recent(&self.state.readings, RECENT_LIMIT) {
            write_row(f, reading)?;
        }
        Ok(())
    }

    fn entry(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let form = &self.state.form;
        let fields = [
            ("Date", form.date.as_str(), ""),
            ("pH Level", form.ph.as_str(), "0-14"),
            ("TDS (ppm)", form.tds.as_str(), "> 0"),
            ("Temperature (°C)", form.temperature.as_str(), ""),
            ("Humidity (%)", form.humidity.as_str(), "0-100"),
            ("Dissolved Oxygen (mg/L)", form.dissolved_oxy.as_str(), ">= 0"),
        ];

        for (label, value, hint) in fields {
            if hint.is_empty() {
                writeln!(f, "{:<24} {}", label, value)?;
            } else {
                writeln!(f, "{:<24} {:<12} ({})", label, value, hint)?;
            }
        }
        Ok(())
    }

    fn analytics(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let days = self.state.past_days;
        let readings = &self.state.readings;
        let summary = summarize(readings, days, self.now);

        writeln!(f, "Past days: {}", days)?;
        writeln!(f, "Entries in window: {}", summary.entries)?;
        for metric in Metric::ALL {
            writeln!(
                f,
                "  Average {}: {}",
                metric.label(),
                summary.average_display(metric)
            )?;
        }

        for metric in Metric::ALL {
            writeln!(f)?;
            writeln!(f, "{} Trends", metric.label())?;

            for point in chart_series(readings, metric, days, self.now) {
                writeln!(f, "  {}  {} {}", point.label, point.value, metric.unit())?;
            }

            writeln!(f, "Significance: {}", significance(metric))?;

            let analysis = analyze(readings, metric, days, self.now);
            write!(
                f,
                "Trend (past {} days): {} (Change: {}).",
                days,
                analysis.trend,
                analysis.slope_display()
            )?;
            let ranges = analysis.range_summary();
            if ranges.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, " {}", ranges)?;
            }
        }
        Ok(())
    }

    fn ml_model(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Leaves Predictor")?;
        writeln!(f, "Predicted Plant: {}", self.state.predicted_plant)?;
        writeln!(f)?;
        writeln!(f, "Color Detection & Analysis")?;
        for color in &self.state.colors {
            writeln!(f, "  Hex: {}  Health: {}", color.hex, color.health)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut Formatter<'_>, reading: &Reading) -> fmt::Result {
    writeln!(
        f,
        "{:<15} {:<26} {:>11} {:>6} {:>7} {:>8} {:>16}",
        reading.id.as_str(),
        reading.timestamp,
        reading.temperature,
        reading.ph,
        reading.tds,
        optional(reading.humidity),
        optional(reading.dissolved_oxy)
    )
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ColorSample, LeafHealth};
    use crate::dashboard::Notice;
    use crate::storage::ReadingId;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap()
    }

    fn reading(id: &str, hours_ago: i64, ph: f64) -> Reading {
        let ts = (now() - Duration::hours(hours_ago)).to_rfc3339();
        Reading::new(ReadingId::new(id), ts, 22.0, ph, 800.0)
    }

    #[test]
    fn test_dashboard_lists_plants_and_recent() {
        let mut state = DashboardState::new();
        state.readings = (0..7).map(|i| reading(&format!("r{}", i), i, 6.0)).collect();

        let page = render(&state, now());
        assert!(page.contains("Bok choy - Nutrient-rich leafy green"));
        assert!(page.contains("Optimal TDS: 1000-1750"));
        assert!(page.contains("Recent Entries"));
        assert!(page.contains("r4"));
        assert!(!page.contains("r5"));
    }

    #[test]
    fn test_dashboard_without_readings_has_no_table() {
        let page = render(&DashboardState::new(), now());
        assert!(!page.contains("Recent Entries"));
        assert!(page.contains("[Dark Mode]"));
    }

    #[test]
    fn test_notice_is_rendered() {
        let mut state = DashboardState::new();
        state.notice = Some(Notice::error("Failed to save entry."));
        assert!(render(&state, now()).contains("[error] Failed to save entry."));
    }

    #[test]
    fn test_analytics_trends() {
        let mut state = DashboardState::new();
        state.navigate(Page::Analytics);
        state.readings = vec![
            reading("a", 4, 1.0),
            reading("b", 3, 1.0),
            reading("c", 2, 5.0),
            reading("d", 1, 5.0),
        ];

        let page = render(&state, now());
        assert!(page.contains("pH Trends"));
        assert!(page.contains("Trend (past 7 days): Increasing (Change: 4.00)."));
        assert!(page.contains("Trend (past 7 days): Stable (Change: 0.00). Bok choy:"));
        assert!(page.contains("Trend (past 7 days): Insufficient data (Change: 0.00)."));
        assert!(page.contains("Entries in window: 4"));
    }

    #[test]
    fn test_ml_page() {
        let mut state = DashboardState::new();
        state.navigate(Page::MlModel);
        state.set_dark_mode(false);
        state.predicted_plant = "Chili";
        state.colors = vec![ColorSample::new("#00ff00", LeafHealth::Healthy)];

        let page = render(&state, now());
        assert!(page.contains("[Light Mode]"));
        assert!(page.contains("Predicted Plant: Chili"));
        assert!(page.contains("Hex: #00ff00  Health: Healthy"));
    }

    #[test]
    fn test_entry_page_shows_form() {
        let mut state = DashboardState::new();
        state.navigate(Page::Entry);
        state.form.ph = "6.5".to_string();

        let page = render(&state, now());
        assert!(page.starts_with("Add New Entry"));
        assert!(page.contains("6.5"));
    }
}
