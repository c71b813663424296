//! Shape generation for 2D primitives
//!
//! All shapes are in surface pixels (origin top-left, y down) and emitted as
//! triangle lists.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    if w <= 0.0 || h <= 0.0 {
        return Vec::new();
    }
    let (x2, y2) = (x + w, y + h);
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x2, y, color),
        Vertex::new(x, y2, color),
        Vertex::new(x, y2, color),
        Vertex::new(x2, y, color),
        Vertex::new(x2, y2, color),
    ]
}

/// Generate vertices for a rectangle outline drawn inside its bounds
pub fn rect_outline(x: f32, y: f32, w: f32, h: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(w / 2.0).min(h / 2.0);
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(x, y, w, t, color));
    vertices.extend(rect(x, y + h - t, w, t, color));
    vertices.extend(rect(x, y + t, t, h - 2.0 * t, color));
    vertices.extend(rect(x + w - t, y + t, t, h - 2.0 * t, color));
    vertices
}

/// Generate vertices for a filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a quarter-circle fan
fn corner(center: Vec2, radius: f32, start_angle: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = start_angle + (i as f32 / segments as f32) * FRAC_PI_2;
        let theta2 = start_angle + ((i + 1) as f32 / segments as f32) * FRAC_PI_2;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled rectangle with rounded corners
pub fn rounded_rect(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    if r == 0.0 || segments == 0 {
        return rect(x, y, w, h, color);
    }

    let mut vertices = Vec::with_capacity(18 + (segments * 12) as usize);
    // Center column, then the two side strips between the corners
    vertices.extend(rect(x + r, y, w - 2.0 * r, h, color));
    vertices.extend(rect(x, y + r, r, h - 2.0 * r, color));
    vertices.extend(rect(x + w - r, y + r, r, h - 2.0 * r, color));

    // Corners (y down, so angle PI is left and 3PI/2 is up)
    vertices.extend(corner(Vec2::new(x + r, y + r), r, PI, color, segments));
    vertices.extend(corner(Vec2::new(x + w - r, y + r), r, 1.5 * PI, color, segments));
    vertices.extend(corner(Vec2::new(x + w - r, y + h - r), r, 0.0, color, segments));
    vertices.extend(corner(Vec2::new(x + r, y + h - r), r, FRAC_PI_2, color, segments));

    vertices
}

/// Generate vertices for a dashed vertical line.
///
/// The dash pattern repeats every `dash + gap` pixels and is shifted down by
/// `offset`, matching a canvas line-dash offset of `-offset`.
#[allow(clippy::too_many_arguments)]
pub fn dashed_vline(
    x: f32,
    top: f32,
    bottom: f32,
    width: f32,
    dash: f32,
    gap: f32,
    offset: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let period = dash + gap;
    if period <= 0.0 || bottom <= top {
        return Vec::new();
    }

    let mut vertices = Vec::new();
    let left = x - width / 2.0;
    // First dash starts one period above the shifted origin so the top is covered
    let mut start = top + offset.rem_euclid(period) - period;
    while start < bottom {
        let y0 = start.max(top);
        let y1 = (start + dash).min(bottom);
        if y1 > y0 {
            vertices.extend(rect(left, y0, width, y1 - y0, color));
        }
        start += period;
    }
    vertices
}
