//! Paints recorded frames onto a ratatui canvas.

use nightsky_core::{Point, Rgba, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Context, Line, Points},
    },
};

use crate::{DrawCommand, DrawList};

/// Braille dots per terminal cell, horizontally.
pub const DOTS_PER_COLUMN: u32 = 2;

/// Braille dots per terminal cell, vertically.
pub const DOTS_PER_ROW: u32 = 4;

/// Longest piece a gradient line is split into, in pixels.
const GRADIENT_SEGMENT_PX: f64 = 4.0;

/// Upper bound on gradient pieces per line.
const MAX_GRADIENT_SEGMENTS: usize = 32;

/// Device-pixel viewport of a terminal area: one pixel per Braille dot.
pub fn viewport_for(area: Rect) -> Viewport {
    Viewport::new(
        area.width as u32 * DOTS_PER_COLUMN,
        area.height as u32 * DOTS_PER_ROW,
    )
}

/// Renders one or more draw lists, in order, over a solid sky.
#[derive(Debug, Clone)]
pub struct SkyWidget<'a> {
    layers: [&'a DrawList; 2],
    viewport: Viewport,
    background: Rgba,
}

impl<'a> SkyWidget<'a> {
    pub fn new(layers: [&'a DrawList; 2], viewport: Viewport, background: Rgba) -> Self {
        Self {
            layers,
            viewport,
            background,
        }
    }
}

impl Widget for SkyWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sky = self.background.with_alpha(1.0);
        let width = self.viewport.width as f64;
        let height = self.viewport.height as f64;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(sky.blend_over(Rgba::BLACK))
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for layer in self.layers {
                    for command in layer.commands() {
                        paint(ctx, command, height, sky);
                    }
                    ctx.layer();
                }
            })
            .render(area, buf);
    }
}

/// Canvas y grows upwards; surfaces grow downwards.
fn flip(p: Point, height: f64) -> (f64, f64) {
    (p.x, height - p.y)
}

fn paint(ctx: &mut Context, command: &DrawCommand, height: f64, sky: Rgba) {
    match command {
        DrawCommand::Circle {
            center,
            radius,
            color,
        } => {
            if color.a <= 0.0 {
                return;
            }
            let coords: Vec<(f64, f64)> = disc_points(*center, *radius)
                .into_iter()
                .map(|p| flip(p, height))
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color: color.blend_over(sky),
            });
        }
        DrawCommand::GradientLine {
            head,
            tail,
            head_color,
            tail_color,
            width,
        } => {
            for (from, to, color) in gradient_segments(*head, *tail, *head_color, *tail_color) {
                let terminal_color = color.blend_over(sky);
                let (x1, y1) = flip(from, height);
                let (x2, y2) = flip(to, height);
                ctx.draw(&Line::new(x1, y1, x2, y2, terminal_color));

                if *width >= 2.0 {
                    let (ox, oy) = normal(from, to);
                    ctx.draw(&Line::new(x1 + ox, y1 + oy, x2 + ox, y2 + oy, terminal_color));
                }
            }
        }
    }
}

/// Dot positions covered by a filled circle; never empty.
fn disc_points(center: Point, radius: f64) -> Vec<Point> {
    let reach = radius.max(0.0).ceil() as i64;
    let r2 = radius * radius;
    let mut points = vec![center];
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if (dx, dy) != (0, 0) && (dx * dx + dy * dy) as f64 <= r2 {
                points.push(Point::new(center.x + dx as f64, center.y + dy as f64));
            }
        }
    }
    points
}

/// Split a gradient line into short solid pieces, dropping invisible ones.
fn gradient_segments(
    head: Point,
    tail: Point,
    head_color: Rgba,
    tail_color: Rgba,
) -> Vec<(Point, Point, Rgba)> {
    let length = (tail.x - head.x).hypot(tail.y - head.y);
    let count = ((length / GRADIENT_SEGMENT_PX).ceil() as usize).clamp(1, MAX_GRADIENT_SEGMENTS);
    let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;
    let at = |t: f64| Point::new(lerp(head.x, tail.x, t), lerp(head.y, tail.y, t));

    (0..count)
        .filter_map(|i| {
            let t0 = i as f64 / count as f64;
            let t1 = (i + 1) as f64 / count as f64;
            let mid = (t0 + t1) / 2.0;
            let alpha = lerp(head_color.a as f64, tail_color.a as f64, mid) as f32;
            if alpha <= 0.0 {
                return None;
            }
            let color = Rgba::new(
                lerp(head_color.r as f64, tail_color.r as f64, mid).round() as u8,
                lerp(head_color.g as f64, tail_color.g as f64, mid).round() as u8,
                lerp(head_color.b as f64, tail_color.b as f64, mid).round() as u8,
                alpha,
            );
            Some((at(t0), at(t1), color))
        })
        .collect()
}

/// One-pixel offset perpendicular to a segment, in canvas orientation.
fn normal(from: Point, to: Point) -> (f64, f64) {
    let dx = to.x - from.x;
    let dy = -(to.y - from.y);
    let len = dx.hypot(dy);
    if len == 0.0 {
        (0.0, 1.0)
    } else {
        (-dy / len, dx / len)
    }
}

#[cfg(test)]
mod tests {
    use nightsky_core::Surface;

    use super::*;

    #[test]
    fn test_viewport_for_area() {
        assert_eq!(viewport_for(Rect::new(0, 0, 80, 24)), Viewport::new(160, 96));
    }

    #[test]
    fn test_disc_points() {
        assert_eq!(disc_points(Point::new(5.0, 5.0), 0.5).len(), 1);
        assert_eq!(disc_points(Point::new(5.0, 5.0), 1.0).len(), 5);
        assert_eq!(disc_points(Point::new(5.0, 5.0), 1.5).len(), 9);
    }

    #[test]
    fn test_gradient_fades_towards_tail() {
        let head = Point::new(0.0, 0.0);
        let tail = Point::new(40.0, 0.0);
        let color = Rgba::new(34, 211, 238, 1.0);
        let segments = gradient_segments(head, tail, color, color.with_alpha(0.0));

        assert_eq!(segments.len(), 10);
        assert_eq!(segments[0].0, head);
        assert!(segments.windows(2).all(|w| w[0].2.a > w[1].2.a));
        assert!(segments.iter().all(|s| s.2.a > 0.0));
    }

    #[test]
    fn test_transparent_gradient_draws_nothing() {
        let color = Rgba::new(34, 211, 238, 0.0);
        let segments = gradient_segments(Point::new(0.0, 0.0), Point::new(10.0, 10.0), color, color);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_render_paints_cells() {
        let mut list = DrawList::new();
        list.fill_circle(Point::new(1.0, 1.0), 1.0, Rgba::new(255, 255, 255, 1.0));
        let empty = DrawList::new();

        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        SkyWidget::new([&list, &empty], viewport_for(area), Rgba::BLACK).render(area, &mut buf);

        let lit = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " " && cell.symbol() != "\u{2800}")
            .count();
        assert!(lit > 0);
    }
}
