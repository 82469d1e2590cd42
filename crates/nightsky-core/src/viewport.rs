//! Drawing surface dimensions.

/// Size of the drawing surface in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Surface area in square pixels.
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// A surface with no pixels cannot be drawn on.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
