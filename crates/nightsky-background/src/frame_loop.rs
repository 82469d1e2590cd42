//! Start/stop scheduling for an animation.
//!
//! The host owns the clock: it calls [`FrameLoop::frame`] on every repaint
//! tick. A stopped loop ignores those calls entirely, which is what makes
//! unmounting safe: once [`FrameLoop::stop`] returns, no update runs and
//! nothing is written to any surface.

use nightsky_core::{Surface, Viewport};
use tracing::debug;

use crate::{Animation, RandomSource};

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoopState {
    Stopped,
    Running {
        viewport: Viewport,
        /// Host timestamp of the first frame after mounting.
        origin_ms: Option<f64>,
    },
}

/// Drives one animation with its own random source.
#[derive(Debug)]
pub struct FrameLoop<A, R> {
    animation: A,
    rng: R,
    state: LoopState,
    frames: u64,
}

impl<A: Animation, R: RandomSource> FrameLoop<A, R> {
    pub fn new(animation: A, rng: R) -> Self {
        Self {
            animation,
            rng,
            state: LoopState::Stopped,
            frames: 0,
        }
    }

    /// Mount the animation on a surface of the given size.
    ///
    /// An empty viewport means there is no surface to draw on; the loop
    /// stays stopped and `false` is returned. Starting a running loop does
    /// nothing.
    pub fn start(&mut self, viewport: Viewport) -> bool {
        if self.is_running() {
            return true;
        }
        if viewport.is_empty() {
            debug!("no drawing surface, animation not started");
            return false;
        }

        self.animation.resize(viewport, &mut self.rng);
        self.state = LoopState::Running {
            viewport,
            origin_ms: None,
        };
        self.frames = 0;
        true
    }

    /// Unmount the animation. No further frame does any work until the
    /// next [`FrameLoop::start`].
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!(frames = self.frames, "animation stopped");
        }
        self.state = LoopState::Stopped;
        self.animation.reset();
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Re-measure the surface.
    ///
    /// Ignored while stopped and when the size is unchanged. Shrinking to
    /// nothing stops the loop.
    pub fn resize(&mut self, viewport: Viewport) {
        let LoopState::Running {
            viewport: current, ..
        } = &mut self.state
        else {
            return;
        };
        if *current == viewport {
            return;
        }
        if viewport.is_empty() {
            self.stop();
            return;
        }

        *current = viewport;
        self.animation.resize(viewport, &mut self.rng);
    }

    /// Run one update-and-render step at host time `timestamp_ms`.
    ///
    /// Returns `false` without touching the surface when stopped.
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> bool {
        let LoopState::Running { origin_ms, .. } = &mut self.state else {
            return false;
        };
        let origin = *origin_ms.get_or_insert(timestamp_ms);
        let local_ms = (timestamp_ms - origin).max(0.0);

        surface.clear();
        self.animation.tick(local_ms, &mut self.rng);
        self.animation.draw(surface);
        self.frames += 1;
        true
    }

    /// Frames produced since the last start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Current surface size, if running.
    pub fn viewport(&self) -> Option<Viewport> {
        match self.state {
            LoopState::Running { viewport, .. } => Some(viewport),
            LoopState::Stopped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use nightsky_core::{ShootingStarConfig, StarFieldConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::{DrawList, ShootingStars, StarField};

    fn star_loop() -> FrameLoop<StarField, StdRng> {
        FrameLoop::new(
            StarField::new(StarFieldConfig::default()),
            StdRng::seed_from_u64(21),
        )
    }

    #[test]
    fn test_empty_viewport_is_silent_noop() {
        let mut fl = star_loop();
        let mut list = DrawList::new();
        assert!(!fl.start(Viewport::new(0, 0)));
        assert!(!fl.is_running());
        assert!(!fl.frame(0.0, &mut list));
        assert_eq!(list.draw_calls(), 0);
        assert_eq!(list.clears(), 0);
    }

    #[test]
    fn test_frame_clears_then_redraws() {
        let mut fl = star_loop();
        let mut list = DrawList::new();
        assert!(fl.start(Viewport::new(100, 100)));
        assert!(fl.frame(0.0, &mut list));
        assert!(fl.frame(16.0, &mut list));
        assert_eq!(list.clears(), 2);
        assert_eq!(list.len(), 150);
        assert_eq!(list.draw_calls(), 300);
        assert_eq!(fl.frames(), 2);
    }

    #[test]
    fn test_stop_prevents_further_draws() {
        let mut fl = star_loop();
        let mut list = DrawList::new();
        fl.start(Viewport::new(100, 100));
        for n in 0..10 {
            fl.frame(n as f64 * 16.0, &mut list);
        }
        fl.stop();
        let calls = list.draw_calls();
        let clears = list.clears();
        for n in 10..100 {
            assert!(!fl.frame(n as f64 * 16.0, &mut list));
        }
        assert_eq!(list.draw_calls(), calls);
        assert_eq!(list.clears(), clears);
        assert_eq!(fl.animation().particle_count(), 0);
    }

    #[test]
    fn test_resize_while_running() {
        let mut fl = star_loop();
        fl.start(Viewport::new(100, 100));
        fl.resize(Viewport::new(200, 100));
        assert_eq!(fl.animation().particle_count(), 300);
        assert_eq!(fl.viewport(), Some(Viewport::new(200, 100)));

        fl.resize(Viewport::new(0, 100));
        assert!(!fl.is_running());
        assert_eq!(fl.viewport(), None);
    }

    #[test]
    fn test_resize_while_stopped_is_ignored() {
        let mut fl = star_loop();
        fl.resize(Viewport::new(100, 100));
        assert!(!fl.is_running());
        assert_eq!(fl.animation().particle_count(), 0);
    }

    #[test]
    fn test_timestamps_are_relative_to_mount() {
        let mut fl = FrameLoop::new(
            ShootingStars::new(ShootingStarConfig {
                spawn_chance: 1.0,
                ..Default::default()
            }),
            StdRng::seed_from_u64(5),
        );
        let mut list = DrawList::new();
        fl.start(Viewport::new(800, 600));

        // Mounted late in the host's lifetime: no attempt on the first frame.
        fl.frame(50_000.0, &mut list);
        assert_eq!(fl.animation().spawn_attempts(), 0);
        fl.frame(52_000.0, &mut list);
        assert_eq!(fl.animation().spawn_attempts(), 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_restart_reseeds() {
        let mut fl = star_loop();
        fl.start(Viewport::new(100, 100));
        fl.stop();
        assert!(fl.start(Viewport::new(200, 200)));
        assert_eq!(fl.animation().particle_count(), 600);
    }
}
