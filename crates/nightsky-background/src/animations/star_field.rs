//! Twinkling star field (stateful).

use std::f64::consts::TAU;

use nightsky_core::{Point, StarFieldConfig, Surface, Viewport};
use tracing::debug;

use crate::{Animation, RandomSource};

/// Square pixels covered by one unit of density.
const DENSITY_AREA: f64 = 10_000.0;

/// A single point in the star field.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Radius in pixels, `[0.5, 2.0)`.
    pub radius: f64,
    /// Current opacity, always within `[0, 1]`.
    pub opacity: f32,
    /// Phase advance per frame; zero for stars that hold still.
    pub twinkle_speed: f64,
    /// Current oscillation phase in radians.
    pub twinkle_phase: f64,
}

impl Star {
    /// Whether this star oscillates.
    pub fn twinkles(&self) -> bool {
        self.twinkle_speed > 0.0
    }
}

/// Number of stars for a viewport: `floor(area / 10000 * density)`.
///
/// Negative or non-finite densities yield an empty field.
pub fn star_count(viewport: Viewport, density: f64) -> usize {
    let count = (viewport.area() / DENSITY_AREA * density).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Seed a full field of stars at uniform random positions.
pub fn init_stars(
    viewport: Viewport,
    config: &StarFieldConfig,
    rng: &mut dyn RandomSource,
) -> Vec<Star> {
    let width = viewport.width as f64;
    let height = viewport.height as f64;

    (0..star_count(viewport, config.density))
        .map(|_| {
            let x = rng.range(0.0, width);
            let y = rng.range(0.0, height);
            let radius = rng.range(0.5, 2.0);
            let opacity = rng.range(0.5, 1.0) as f32;
            let twinkle_speed = if rng.chance(config.twinkle_probability) {
                rng.range(0.01, 0.03)
            } else {
                0.0
            };
            let twinkle_phase = rng.range(0.0, TAU);
            Star {
                x,
                y,
                radius,
                opacity,
                twinkle_speed,
                twinkle_phase,
            }
        })
        .collect()
}

/// Advance twinkling stars by one frame.
pub fn update(stars: &mut [Star]) {
    for star in stars.iter_mut().filter(|s| s.twinkles()) {
        star.twinkle_phase = (star.twinkle_phase + star.twinkle_speed) % TAU;
        let opacity = 0.5 + star.twinkle_phase.sin() * 0.5;
        star.opacity = opacity.clamp(0.0, 1.0) as f32;
    }
}

/// Draw every star as a filled circle in the configured color.
pub fn draw(stars: &[Star], config: &StarFieldConfig, surface: &mut dyn Surface) {
    for star in stars {
        surface.fill_circle(
            Point::new(star.x, star.y),
            star.radius,
            config.color.with_alpha(star.opacity),
        );
    }
}

/// Star field animation state.
#[derive(Debug, Clone, Default)]
pub struct StarField {
    config: StarFieldConfig,
    stars: Vec<Star>,
}

impl StarField {
    pub fn new(config: StarFieldConfig) -> Self {
        Self {
            config,
            stars: Vec::new(),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}

impl Animation for StarField {
    fn resize(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) {
        self.stars = init_stars(viewport, &self.config, rng);
        debug!(
            width = viewport.width,
            height = viewport.height,
            stars = self.stars.len(),
            "seeded star field"
        );
    }

    fn tick(&mut self, _timestamp_ms: f64, _rng: &mut dyn RandomSource) {
        update(&mut self.stars);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        draw(&self.stars, &self.config, surface);
    }

    fn reset(&mut self) {
        self.stars.clear();
    }

    fn particle_count(&self) -> usize {
        self.stars.len()
    }
}
