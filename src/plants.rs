//! Plant profiles and optimal ranges.
//!
//! Five static reference profiles describe the growing conditions each
//! species prefers. Ranges are stored the way growers write them (`"5.5-6.5"`)
//! and parsed on demand into [`OptimalRange`].
//!
//! # Example
//!
//! ```
//! use hydromonitor::plants::{self, RangeStatus};
//! use hydromonitor::storage::Metric;
//!
//! let chili = plants::find("Chili").unwrap();
//! let range = chili.optimal_range(Metric::Ph).unwrap();
//! assert_eq!(range.classify(6.4), RangeStatus::Within);
//! ```

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::storage::Metric;

/// Static reference data for one plant species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlantProfile {
    pub name: &'static str,
    /// Display image path
    pub image: &'static str,
    pub description: &'static str,
    pub optimal_ph: &'static str,
    pub optimal_tds: &'static str,
    pub optimal_temperature: &'static str,
    pub optimal_humidity: &'static str,
    pub optimal_dissolved_oxy: &'static str,
    /// Card background in light mode
    pub light_color: &'static str,
}

/// Card background in dark mode, shared by every profile.
pub const DARK_GRADIENT: &str = "linear-gradient(135deg, #0f172a 2%, #1e3a8a 50%, #312e81 100%)";

pub static PLANTS: [PlantProfile; 5] = [
    PlantProfile {
        name: "Bok choy",
        image: "/assets/water-spinach.png",
        description: "Nutrient-rich leafy green",
        optimal_ph: "5.5-6.5",
        optimal_tds: "900-1200",
        optimal_temperature: "18-24",
        optimal_humidity: "50-70",
        optimal_dissolved_oxy: "5-8",
        light_color: "#e0f2f2",
    },
    PlantProfile {
        name: "Chili",
        image: "/assets/chili-plant.png",
        description: "Spicy pepper variety",
        optimal_ph: "6.0-6.8",
        optimal_tds: "1000-1750",
        optimal_temperature: "21-29",
        optimal_humidity: "60-80",
        optimal_dissolved_oxy: "5-8",
        light_color: "#f0e6e6",
    },
    PlantProfile {
        name: "Purple basil",
        image: "/assets/purple-basil.png",
        description: "Aromatic purple-leafed herb",
        optimal_ph: "5.5-6.5",
        optimal_tds: "500-800",
        optimal_temperature: "20-26",
        optimal_humidity: "50-70",
        optimal_dissolved_oxy: "5-8",
        light_color: "#ece6f0",
    },
    PlantProfile {
        name: "Thai basil",
        image: "/assets/thai-basil.png",
        description: "Sweet and spicy Asian herb",
        optimal_ph: "6.0-7.0",
        optimal_tds: "600-900",
        optimal_temperature: "20-26",
        optimal_humidity: "50-70",
        optimal_dissolved_oxy: "5-8",
        light_color: "#e6f0ea",
    },
    PlantProfile {
        name: "Lemon basil",
        image: "/assets/lemon-basil.png",
        description: "Citrusy aromatic herb",
        optimal_ph: "5.8-6.8",
        optimal_tds: "500-750",
        optimal_temperature: "20-26",
        optimal_humidity: "50-70",
        optimal_dissolved_oxy: "5-8",
        light_color: "#f0f4e6",
    },
];

/// All plant profiles, in display order.
pub fn all() -> &'static [PlantProfile] {
    &PLANTS
}

/// Look up a profile by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static PlantProfile> {
    PLANTS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

impl PlantProfile {
    /// Raw range text for a metric.
    pub fn optimal_range_str(&self, metric: Metric) -> &'static str {
        match metric {
            Metric::Ph => self.optimal_ph,
            Metric::Tds => self.optimal_tds,
            Metric::Temperature => self.optimal_temperature,
            Metric::Humidity => self.optimal_humidity,
            Metric::DissolvedOxygen => self.optimal_dissolved_oxy,
        }
    }

    /// Parsed range for a metric.
    pub fn optimal_range(&self, metric: Metric) -> Result<OptimalRange, RangeParseError> {
        self.optimal_range_str(metric).parse()
    }

    /// Card background for the given theme.
    pub fn background(&self, dark_mode: bool) -> &'static str {
        if dark_mode {
            DARK_GRADIENT
        } else {
            self.light_color
        }
    }

    /// Whether `image` points at an image file rather than inline text.
    pub fn has_image_file(&self) -> bool {
        let lower = self.image.to_ascii_lowercase();
        [".jpg", ".jpeg", ".png", ".gif", ".webp"]
            .iter()
            .any(|ext| lower.ends_with(ext))
    }
}

/// Where a value sits relative to an optimal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeStatus {
    Below,
    Within,
    Above,
}

impl RangeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RangeStatus::Below => "Below optimal",
            RangeStatus::Within => "Within optimal",
            RangeStatus::Above => "Above optimal",
        }
    }
}

impl fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimalRange {
    pub min: f64,
    pub max: f64,
}

impl OptimalRange {
    pub fn classify(&self, value: f64) -> RangeStatus {
        if value < self.min {
            RangeStatus::Below
        } else if value > self.max {
            RangeStatus::Above
        } else {
            RangeStatus::Within
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed optimal range: {0:?}")]
pub struct RangeParseError(pub String);

impl FromStr for OptimalRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RangeParseError(s.to_string());

        let (min, max) = s.split_once('-').ok_or_else(err)?;
        let min: f64 = min.trim().parse().map_err(|_| err())?;
        let max: f64 = max.trim().parse().map_err(|_| err())?;

        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(err());
        }

        Ok(Self { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_profile_range_parses() {
        for plant in all() {
            for metric in Metric::ALL {
                let range = plant.optimal_range(metric);
                assert!(range.is_ok(), "{} {:?}: {:?}", plant.name, metric, range);
            }
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("thai BASIL").map(|p| p.name), Some("Thai basil"));
        assert!(find("Tomato").is_none());
    }

    #[test]
    fn test_classify_bounds_inclusive() {
        let range: OptimalRange = "5.5-6.5".parse().unwrap();

        assert_eq!(range.classify(5.4), RangeStatus::Below);
        assert_eq!(range.classify(5.5), RangeStatus::Within);
        assert_eq!(range.classify(6.5), RangeStatus::Within);
        assert_eq!(range.classify(6.51), RangeStatus::Above);
    }

    #[test]
    fn test_malformed_range_rejected() {
        assert!("".parse::<OptimalRange>().is_err());
        assert!("6.5".parse::<OptimalRange>().is_err());
        assert!("a-b".parse::<OptimalRange>().is_err());
        assert!("8-5".parse::<OptimalRange>().is_err());
    }

    #[test]
    fn test_background_follows_theme() {
        let bok_choy = find("Bok choy").unwrap();
        assert_eq!(bok_choy.background(false), "#e0f2f2");
        assert_eq!(bok_choy.background(true), DARK_GRADIENT);
        assert!(bok_choy.has_image_file());
    }
}
