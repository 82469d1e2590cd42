//! The contract every background animation implements.

use nightsky_core::{Surface, Viewport};

use crate::RandomSource;

/// A particle system driven one frame at a time.
///
/// Implementations own their particles exclusively; nothing is shared
/// between two animations.
pub trait Animation {
    /// The drawing surface changed size (or was first measured).
    fn resize(&mut self, viewport: Viewport, rng: &mut dyn RandomSource);

    /// Advance one frame. `timestamp_ms` is time since the animation was
    /// mounted.
    fn tick(&mut self, timestamp_ms: f64, rng: &mut dyn RandomSource);

    /// Draw the current particles. The surface has already been cleared.
    fn draw(&self, surface: &mut dyn Surface);

    /// Drop every particle; called when the animation is unmounted.
    fn reset(&mut self);

    /// Number of live particles.
    fn particle_count(&self) -> usize;
}
