//! Core types shared by the nightsky crates.
//!
//! Colors, viewport geometry, the drawing surface abstraction and the
//! per-layer configuration live here so the animation crate, the config
//! crate and the terminal host all agree on them.

mod color;
mod layer;
mod surface;
mod viewport;

pub use color::{ColorError, Rgba};
pub use layer::{Layer, LayerStyle, ShootingStarConfig, StarFieldConfig};
pub use surface::{Point, Surface};
pub use viewport::Viewport;
