//! The drawing surface an animation paints onto.

use crate::Rgba;

/// A position in device pixels, origin top-left, y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Full-viewport 2D surface, cleared and redrawn every frame.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a circle centred on `center`.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Stroke a line whose color fades linearly from `head_color` at
    /// `head` to `tail_color` at `tail`.
    fn stroke_gradient_line(
        &mut self,
        head: Point,
        tail: Point,
        head_color: Rgba,
        tail_color: Rgba,
        width: f64,
    );
}
