//! A surface that records draw commands for later painting.

use nightsky_core::{Point, Rgba, Surface};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    GradientLine {
        head: Point,
        tail: Point,
        head_color: Rgba,
        tail_color: Rgba,
        width: f64,
    },
}

/// Retained frame contents.
///
/// Animations draw into a list during the frame step; the terminal widget
/// paints the list afterwards. Counters survive [`Surface::clear`] so hosts
/// can tell whether anything drew after a layer was unmounted.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    draw_calls: u64,
    clears: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Total draw calls ever made on this list.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    /// Total clears ever made on this list.
    pub fn clears(&self) -> u64 {
        self.clears
    }

    fn push(&mut self, command: DrawCommand) {
        self.draw_calls += 1;
        self.commands.push(command);
    }
}

impl Surface for DrawList {
    fn clear(&mut self) {
        self.clears += 1;
        self.commands.clear();
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_gradient_line(
        &mut self,
        head: Point,
        tail: Point,
        head_color: Rgba,
        tail_color: Rgba,
        width: f64,
    ) {
        self.push(DrawCommand::GradientLine {
            head,
            tail,
            head_color,
            tail_color,
            width,
        });
    }
}
