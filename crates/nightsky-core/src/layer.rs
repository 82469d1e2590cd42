//! Background layers and their configuration.

use serde::{Deserialize, Serialize};

use crate::Rgba;

/// One independently mounted background layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Persistent twinkling star field.
    Stars,
    /// Intermittent shooting stars.
    ShootingStars,
}

impl Layer {
    /// All layers, bottom to top.
    pub const ALL: [Layer; 2] = [Layer::Stars, Layer::ShootingStars];

    /// Display name for the layer.
    pub fn name(self) -> &'static str {
        match self {
            Layer::Stars => "stars",
            Layer::ShootingStars => "shooting stars",
        }
    }
}

/// Which layers are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerStyle {
    None,
    Stars,
    ShootingStars,
    #[default]
    Both,
}

impl LayerStyle {
    /// Build a style from per-layer visibility flags.
    pub fn from_flags(stars: bool, shooting_stars: bool) -> Self {
        match (stars, shooting_stars) {
            (false, false) => LayerStyle::None,
            (true, false) => LayerStyle::Stars,
            (false, true) => LayerStyle::ShootingStars,
            (true, true) => LayerStyle::Both,
        }
    }

    /// Whether this style shows the given layer.
    pub fn includes(self, layer: Layer) -> bool {
        match (self, layer) {
            (LayerStyle::Both, _) => true,
            (LayerStyle::Stars, Layer::Stars) => true,
            (LayerStyle::ShootingStars, Layer::ShootingStars) => true,
            _ => false,
        }
    }

    /// Cycle to the next style.
    pub fn next(self) -> Self {
        match self {
            LayerStyle::Both => LayerStyle::Stars,
            LayerStyle::Stars => LayerStyle::ShootingStars,
            LayerStyle::ShootingStars => LayerStyle::None,
            LayerStyle::None => LayerStyle::Both,
        }
    }
}

/// Star field tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    /// Stars per 10 000 square pixels.
    pub density: f64,
    /// Fraction of stars that twinkle.
    pub twinkle_probability: f64,
    /// Base color; alpha is replaced by each star's opacity.
    pub color: Rgba,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            density: 150.0,
            twinkle_probability: 0.3,
            color: Rgba::new(255, 255, 255, 0.8),
        }
    }
}

/// Shooting star tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingStarConfig {
    /// Base trail color; alpha is replaced by each streak's opacity.
    pub trail_color: Rgba,
    /// Minimum milliseconds between spawn attempts.
    pub frequency_ms: f64,
    /// Probability that a spawn attempt produces a streak.
    pub spawn_chance: f64,
    /// Opacity lost by every streak each frame.
    pub fade_step: f64,
    /// Stroke width of the trail in pixels.
    pub line_width: f64,
}

impl Default for ShootingStarConfig {
    fn default() -> Self {
        Self {
            trail_color: Rgba::new(34, 211, 238, 0.6),
            frequency_ms: 2000.0,
            spawn_chance: 0.5,
            fade_step: 0.01,
            line_width: 2.0,
        }
    }
}
