//! Mock leaf predictor
//!
//! Placeholder for a future image model: picks a random plant and three random
//! leaf colors with random health labels. Nothing here looks at real data.

use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::plants;

/// Health label attached to a leaf color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeafHealth {
    Healthy,
    Moderate,
    Unhealthy,
}

impl LeafHealth {
    pub const ALL: [LeafHealth; 3] = [LeafHealth::Healthy, LeafHealth::Moderate, LeafHealth::Unhealthy];
}

impl fmt::Display for LeafHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeafHealth::Healthy => "Healthy",
            LeafHealth::Moderate => "Moderate",
            LeafHealth::Unhealthy => "Unhealthy",
        })
    }
}

/// One analyzed leaf color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSample {
    /// `#rrggbb`
    pub hex: String,
    pub health: LeafHealth,
}

impl ColorSample {
    pub fn new(hex: impl Into<String>, health: LeafHealth) -> Self {
        Self {
            hex: hex.into(),
            health,
        }
    }
}

/// Colors shown before the first refresh
pub fn default_colors() -> Vec<ColorSample> {
    vec![
        ColorSample::new("#4CAF50", LeafHealth::Healthy),
        ColorSample::new("#FF9800", LeafHealth::Moderate),
        ColorSample::new("#F44336", LeafHealth::Unhealthy),
    ]
}

/// Uniformly random plant name
pub fn predict_plant<R: Rng>(rng: &mut R) -> &'static str {
    let all = plants::all();
    all[rng.random_range(0..all.len())].name
}

/// Three random colors, each with a random health label
pub fn random_colors<R: Rng>(rng: &mut R) -> Vec<ColorSample> {
    (0..3)
        .map(|_| {
            let rgb: u32 = rng.random_range(0..=0xFF_FFFF);
            let health = LeafHealth::ALL[rng.random_range(0..LeafHealth::ALL.len())];
            ColorSample::new(format!("#{:06x}", rgb), health)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_prediction_is_known_plant() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let plant = predict_plant(&mut rng);
            assert!(plants::find(plant).is_some());
        }
    }

    #[test]
    fn test_random_colors_are_hex() {
        let mut rng = StdRng::seed_from_u64(42);
        let colors = random_colors(&mut rng);

        assert_eq!(colors.len(), 3);
        for color in colors {
            assert_eq!(color.hex.len(), 7);
            assert!(color.hex.starts_with('#'));
            assert!(u32::from_str_radix(&color.hex[1..], 16).is_ok());
        }
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        let a = random_colors(&mut StdRng::seed_from_u64(3));
        let b = random_colors(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_colors() {
        let colors = default_colors();
        assert_eq!(colors[0].hex, "#4CAF50");
        assert_eq!(colors[2].health, LeafHealth::Unhealthy);
    }
}
