//! Pluggable randomness for spawn and visual parameters.

use rand::Rng;

/// Source of uniform random numbers.
///
/// Every [`rand::Rng`] is a source, so a seeded `StdRng` makes runs
/// reproducible.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[low, high)`.
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }

    /// `true` with the given probability. Values outside `[0, 1]` saturate.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}
