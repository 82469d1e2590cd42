//! Particle background animations for the nightsky terminal.
//!
//! Two independent particle systems are provided: a twinkling star field
//! that fills the viewport and shooting stars that streak across its upper
//! left. Each runs inside a [`FrameLoop`] that the host drives once per
//! repaint and can stop at any time. Frames are recorded into a
//! [`DrawList`] and painted by [`SkyWidget`].

mod animation;
mod animations;
mod draw_list;
mod frame_loop;
mod random;
mod state;
mod widget;

pub use animation::Animation;
pub use animations::shooting_stars::{self, ShootingStars, Streak};
pub use animations::star_field::{self, Star, StarField};
pub use draw_list::{DrawCommand, DrawList};
pub use frame_loop::FrameLoop;
pub use random::RandomSource;
pub use state::SkyState;
pub use widget::{SkyWidget, viewport_for};
