//! Night sky state: both layers, their loops and their retained frames.

use nightsky_core::{
    Layer, LayerStyle, Rgba, ShootingStarConfig, StarFieldConfig, Surface, Viewport,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::{Animation, DrawList, FrameLoop, ShootingStars, SkyWidget, StarField};

/// Mixed into the base seed so the two layers draw from unrelated streams.
const SHOOTING_STAR_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Background animation state.
#[derive(Debug)]
pub struct SkyState {
    /// Star field loop.
    stars: FrameLoop<StarField, StdRng>,
    /// Last frame drawn by the star field.
    stars_frame: DrawList,
    /// Shooting star loop.
    shooting_stars: FrameLoop<ShootingStars, StdRng>,
    /// Last frame drawn by the shooting stars.
    shooting_stars_frame: DrawList,
    /// Last known surface size.
    viewport: Viewport,
    /// Layers the host asked for, whether or not they could start yet.
    wanted: LayerStyle,
    /// Opaque sky color particles are blended over.
    background: Rgba,
}

impl SkyState {
    /// Create the sky with nothing mounted.
    ///
    /// Without a seed, the current system time is used.
    pub fn new(
        stars: StarFieldConfig,
        shooting_stars: ShootingStarConfig,
        background: Rgba,
        seed: Option<u64>,
    ) -> Self {
        let seed = seed.unwrap_or_else(time_seed);

        Self {
            stars: FrameLoop::new(StarField::new(stars), StdRng::seed_from_u64(seed)),
            stars_frame: DrawList::new(),
            shooting_stars: FrameLoop::new(
                ShootingStars::new(shooting_stars),
                StdRng::seed_from_u64(seed ^ SHOOTING_STAR_SEED_MIX),
            ),
            shooting_stars_frame: DrawList::new(),
            viewport: Viewport::default(),
            wanted: LayerStyle::None,
            background,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mount a layer. Returns whether it is running.
    ///
    /// Without a measured surface the layer stays idle and starts on the
    /// next resize that gives it room to draw.
    pub fn mount(&mut self, layer: Layer) -> bool {
        self.set_wanted(layer, true);
        let running = self.start(layer);
        debug!(layer = layer.name(), running, "mounted layer");
        running
    }

    fn start(&mut self, layer: Layer) -> bool {
        let viewport = self.viewport;
        match layer {
            Layer::Stars => self.stars.start(viewport),
            Layer::ShootingStars => self.shooting_stars.start(viewport),
        }
    }

    fn set_wanted(&mut self, layer: Layer, wanted: bool) {
        let stars = if layer == Layer::Stars {
            wanted
        } else {
            self.wanted.includes(Layer::Stars)
        };
        let shooting_stars = if layer == Layer::ShootingStars {
            wanted
        } else {
            self.wanted.includes(Layer::ShootingStars)
        };
        self.wanted = LayerStyle::from_flags(stars, shooting_stars);
    }

    /// Unmount a layer and discard what it last drew.
    pub fn unmount(&mut self, layer: Layer) {
        self.set_wanted(layer, false);
        match layer {
            Layer::Stars => {
                self.stars.stop();
                self.stars_frame.clear();
            }
            Layer::ShootingStars => {
                self.shooting_stars.stop();
                self.shooting_stars_frame.clear();
            }
        }
        debug!(layer = layer.name(), "unmounted layer");
    }

    /// Flip a layer between mounted and unmounted.
    pub fn toggle(&mut self, layer: Layer) -> bool {
        if self.is_mounted(layer) {
            self.unmount(layer);
            false
        } else {
            self.mount(layer)
        }
    }

    /// Whether the layer is mounted, running or waiting for a surface.
    pub fn is_mounted(&self, layer: Layer) -> bool {
        self.wanted.includes(layer)
    }

    /// Whether the layer is producing frames.
    pub fn is_running(&self, layer: Layer) -> bool {
        match layer {
            Layer::Stars => self.stars.is_running(),
            Layer::ShootingStars => self.shooting_stars.is_running(),
        }
    }

    /// Mount exactly the layers the style names.
    pub fn apply_style(&mut self, style: LayerStyle) {
        for layer in Layer::ALL {
            match (style.includes(layer), self.is_mounted(layer)) {
                (true, false) => {
                    self.mount(layer);
                }
                (false, true) => self.unmount(layer),
                _ => {}
            }
        }
    }

    /// Style describing the currently mounted layers.
    pub fn style(&self) -> LayerStyle {
        self.wanted
    }

    /// Handle a surface size change.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        debug!(width = viewport.width, height = viewport.height, "surface resized");
        self.viewport = viewport;
        self.stars.resize(viewport);
        self.shooting_stars.resize(viewport);

        for layer in Layer::ALL {
            if !self.is_mounted(layer) {
                continue;
            }
            if !self.is_running(layer) && !self.start(layer) {
                match layer {
                    Layer::Stars => self.stars_frame.clear(),
                    Layer::ShootingStars => self.shooting_stars_frame.clear(),
                }
            }
        }
    }

    /// Run one frame of every mounted layer.
    pub fn frame(&mut self, timestamp_ms: f64) {
        self.stars.frame(timestamp_ms, &mut self.stars_frame);
        self.shooting_stars
            .frame(timestamp_ms, &mut self.shooting_stars_frame);
    }

    /// What a layer drew on its most recent frame.
    pub fn layer_frame(&self, layer: Layer) -> &DrawList {
        match layer {
            Layer::Stars => &self.stars_frame,
            Layer::ShootingStars => &self.shooting_stars_frame,
        }
    }

    /// Live particles in a layer.
    pub fn particle_count(&self, layer: Layer) -> usize {
        match layer {
            Layer::Stars => self.stars.animation().particle_count(),
            Layer::ShootingStars => self.shooting_stars.animation().particle_count(),
        }
    }

    /// Widget painting both layers, stars beneath shooting stars.
    pub fn widget(&self) -> SkyWidget<'_> {
        SkyWidget::new(
            [&self.stars_frame, &self.shooting_stars_frame],
            self.viewport,
            self.background,
        )
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
