//! Shooting star streaks (stateful, transient).

use std::f64::consts::FRAC_PI_4;

use nightsky_core::{Point, ShootingStarConfig, Surface, Viewport};
use tracing::trace;

use crate::{Animation, RandomSource};

/// Fraction of the viewport width streaks may start in.
const SPAWN_WIDTH_FRACTION: f64 = 0.5;

/// Fraction of the viewport height streaks may start in.
const SPAWN_HEIGHT_FRACTION: f64 = 0.3;

/// Maximum deviation from a 45 degree launch angle, in radians.
const ANGLE_JITTER: f64 = 0.1;

/// Used when the configured fade step would keep streaks alive forever.
const FALLBACK_FADE_STEP: f64 = 0.01;

/// A single shooting star.
#[derive(Debug, Clone, PartialEq)]
pub struct Streak {
    /// Leading point of the streak.
    pub x: f64,
    pub y: f64,
    /// Trail length in pixels, `[60, 140)`.
    pub length: f64,
    /// Pixels travelled per frame, `[4, 7)`.
    pub speed: f64,
    /// Remaining opacity; the streak is removed once this reaches zero.
    pub opacity: f64,
    /// Direction of travel in radians (y pointing down).
    pub angle: f64,
}

impl Streak {
    /// Leading point.
    pub fn head(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// End of the trail, `length` pixels behind the head.
    pub fn tail(&self) -> Point {
        Point::new(
            self.x - self.angle.cos() * self.length,
            self.y - self.angle.sin() * self.length,
        )
    }
}

/// Create a streak somewhere in the upper-left region of the viewport.
pub fn spawn(viewport: Viewport, rng: &mut dyn RandomSource) -> Streak {
    let x = rng.next_unit() * viewport.width as f64 * SPAWN_WIDTH_FRACTION;
    let y = rng.next_unit() * viewport.height as f64 * SPAWN_HEIGHT_FRACTION;
    Streak {
        x,
        y,
        length: rng.range(60.0, 140.0),
        speed: rng.range(4.0, 7.0),
        opacity: 1.0,
        angle: FRAC_PI_4 + rng.range(-ANGLE_JITTER, ANGLE_JITTER),
    }
}

/// Move and fade every streak, dropping the ones that faded out.
///
/// Returns how many streaks were removed.
pub fn update(streaks: &mut Vec<Streak>, fade_step: f64) -> usize {
    let before = streaks.len();
    streaks.retain_mut(|streak| {
        streak.x += streak.angle.cos() * streak.speed;
        streak.y += streak.angle.sin() * streak.speed;
        streak.opacity -= fade_step;
        streak.opacity > 0.0
    });
    before - streaks.len()
}

/// Draw every streak as a line fading from the head to the tail.
pub fn draw(streaks: &[Streak], config: &ShootingStarConfig, surface: &mut dyn Surface) {
    for streak in streaks.iter().filter(|s| s.opacity > 0.0) {
        surface.stroke_gradient_line(
            streak.head(),
            streak.tail(),
            config.trail_color.with_alpha(streak.opacity as f32),
            config.trail_color.with_alpha(0.0),
            config.line_width,
        );
    }
}

/// Shooting star animation state.
#[derive(Debug, Clone, Default)]
pub struct ShootingStars {
    config: ShootingStarConfig,
    viewport: Viewport,
    streaks: Vec<Streak>,
    /// Time of the last spawn attempt, successful or not.
    last_spawn_ms: f64,
    /// Spawn attempts since the last reset.
    spawn_attempts: u64,
}

impl ShootingStars {
    pub fn new(config: ShootingStarConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            streaks: Vec::new(),
            last_spawn_ms: 0.0,
            spawn_attempts: 0,
        }
    }

    pub fn streaks(&self) -> &[Streak] {
        &self.streaks
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Spawn attempts since the animation was mounted.
    pub fn spawn_attempts(&self) -> u64 {
        self.spawn_attempts
    }

    fn fade_step(&self) -> f64 {
        let step = self.config.fade_step;
        if step.is_finite() && step > 0.0 {
            step
        } else {
            FALLBACK_FADE_STEP
        }
    }

    /// Whether enough time has passed for another spawn attempt.
    ///
    /// Zero, negative and NaN frequencies attempt every frame.
    fn spawn_due(&self, timestamp_ms: f64) -> bool {
        let frequency = self.config.frequency_ms;
        frequency.is_nan() || timestamp_ms - self.last_spawn_ms >= frequency
    }
}

impl Animation for ShootingStars {
    fn resize(&mut self, viewport: Viewport, _rng: &mut dyn RandomSource) {
        self.viewport = viewport;
    }

    fn tick(&mut self, timestamp_ms: f64, rng: &mut dyn RandomSource) {
        if self.spawn_due(timestamp_ms) {
            self.spawn_attempts += 1;
            self.last_spawn_ms = timestamp_ms;
            if rng.chance(self.config.spawn_chance) {
                let streak = spawn(self.viewport, rng);
                trace!(x = streak.x, y = streak.y, angle = streak.angle, "spawned streak");
                self.streaks.push(streak);
            }
        }

        let fade_step = self.fade_step();
        let removed = update(&mut self.streaks, fade_step);
        if removed > 0 {
            trace!(removed, live = self.streaks.len(), "streaks faded out");
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        draw(&self.streaks, &self.config, surface);
    }

    fn reset(&mut self) {
        self.streaks.clear();
        self.last_spawn_ms = 0.0;
        self.spawn_attempts = 0;
        self.viewport = Viewport::default();
    }

    fn particle_count(&self) -> usize {
        self.streaks.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::{DrawCommand, DrawList};

    fn always_spawn() -> ShootingStarConfig {
        ShootingStarConfig {
            spawn_chance: 1.0,
            ..Default::default()
        }
    }

    /// Timestamp of frame `n` at 60 fps.
    fn frame_ms(n: u32) -> f64 {
        (n as f64 * 1000.0) / 60.0
    }

    #[test]
    fn test_spawn_region() {
        let mut rng = StdRng::seed_from_u64(11);
        let vp = Viewport::new(1000, 800);
        for _ in 0..500 {
            let s = spawn(vp, &mut rng);
            assert!((0.0..500.0).contains(&s.x));
            assert!((0.0..240.0).contains(&s.y));
            assert!((60.0..140.0).contains(&s.length));
            assert!((4.0..7.0).contains(&s.speed));
            assert!((FRAC_PI_4 - 0.1..FRAC_PI_4 + 0.1).contains(&s.angle));
            assert_eq!(s.opacity, 1.0);
        }
    }

    #[test]
    fn test_tail_trails_behind_head() {
        let s = Streak {
            x: 100.0,
            y: 100.0,
            length: 50.0,
            speed: 5.0,
            opacity: 1.0,
            angle: 0.0,
        };
        assert_eq!(s.tail(), Point::new(50.0, 100.0));
    }

    #[test]
    fn test_update_moves_and_fades() {
        let mut streaks = vec![Streak {
            x: 0.0,
            y: 0.0,
            length: 80.0,
            speed: 4.0,
            opacity: 1.0,
            angle: 0.0,
        }];
        assert_eq!(update(&mut streaks, 0.25), 0);
        assert_eq!(streaks[0].x, 4.0);
        assert_eq!(streaks[0].y, 0.0);
        assert_eq!(streaks[0].opacity, 0.75);
    }

    #[test]
    fn test_removed_on_frame_opacity_reaches_zero() {
        let mut streaks = vec![Streak {
            x: 0.0,
            y: 0.0,
            length: 80.0,
            speed: 4.0,
            opacity: 1.0,
            angle: 0.0,
        }];
        for _ in 0..3 {
            assert_eq!(update(&mut streaks, 0.25), 0);
        }
        assert_eq!(update(&mut streaks, 0.25), 1);
        assert!(streaks.is_empty());
    }

    #[test]
    fn test_default_streak_lives_one_hundred_frames() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut anim = ShootingStars::new(ShootingStarConfig {
            frequency_ms: 1.0e12,
            ..always_spawn()
        });
        anim.resize(Viewport::new(800, 600), &mut rng);

        let mut ticks = 0;
        loop {
            anim.tick(1.0e12 + ticks as f64, &mut rng);
            ticks += 1;
            if anim.particle_count() == 0 {
                break;
            }
            assert!(ticks < 200, "streak never faded out");
        }
        assert_eq!(ticks, 100);
    }

    #[test]
    fn test_five_attempts_in_ten_seconds() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut anim = ShootingStars::new(always_spawn());
        anim.resize(Viewport::new(1920, 1080), &mut rng);

        let mut spawned = 0;
        for n in 0..=600 {
            let before = anim.spawn_attempts();
            anim.tick(frame_ms(n), &mut rng);
            if anim.spawn_attempts() > before {
                spawned += 1;
            }
        }
        assert_eq!(anim.spawn_attempts(), 5);
        assert_eq!(spawned, 5);
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut anim = ShootingStars::new(ShootingStarConfig {
            spawn_chance: 0.0,
            ..Default::default()
        });
        anim.resize(Viewport::new(800, 600), &mut rng);
        for n in 0..=600 {
            anim.tick(frame_ms(n), &mut rng);
        }
        assert_eq!(anim.spawn_attempts(), 5);
        assert_eq!(anim.particle_count(), 0);
    }

    #[test]
    fn test_negative_frequency_attempts_every_frame() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut anim = ShootingStars::new(ShootingStarConfig {
            frequency_ms: -10.0,
            spawn_chance: 0.0,
            ..Default::default()
        });
        anim.resize(Viewport::new(800, 600), &mut rng);
        for n in 0..30 {
            anim.tick(frame_ms(n), &mut rng);
        }
        assert_eq!(anim.spawn_attempts(), 30);
    }

    #[test]
    fn test_resize_keeps_streaks() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut anim = ShootingStars::new(ShootingStarConfig {
            frequency_ms: 0.0,
            ..always_spawn()
        });
        anim.resize(Viewport::new(800, 600), &mut rng);
        for n in 0..10 {
            anim.tick(frame_ms(n), &mut rng);
        }
        let live = anim.particle_count();
        assert_eq!(live, 10);
        anim.resize(Viewport::new(400, 300), &mut rng);
        assert_eq!(anim.particle_count(), live);
        assert_eq!(anim.viewport(), Viewport::new(400, 300));
    }

    #[test]
    fn test_non_positive_fade_step_falls_back() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut anim = ShootingStars::new(ShootingStarConfig {
            frequency_ms: 0.0,
            fade_step: 0.0,
            ..always_spawn()
        });
        anim.resize(Viewport::new(800, 600), &mut rng);
        anim.tick(0.0, &mut rng);
        assert!((anim.streaks()[0].opacity - (1.0 - FALLBACK_FADE_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_draw_gradient_from_head_to_transparent_tail() {
        let streaks = vec![Streak {
            x: 10.0,
            y: 10.0,
            length: 60.0,
            speed: 4.0,
            opacity: 0.4,
            angle: FRAC_PI_4,
        }];
        let config = ShootingStarConfig::default();
        let mut list = DrawList::new();
        draw(&streaks, &config, &mut list);

        match &list.commands()[0] {
            DrawCommand::GradientLine {
                head,
                head_color,
                tail_color,
                width,
                ..
            } => {
                assert_eq!(*head, Point::new(10.0, 10.0));
                assert_eq!(head_color.a, 0.4);
                assert_eq!(tail_color.a, 0.0);
                assert_eq!(*width, 2.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
