//! Collision and proximity tests
//!
//! Cars are axis-aligned boxes; there is no rotation anywhere on the track.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Near miss: the two boxes' top-left corners are closer than `threshold`
pub fn is_near_miss(player: &Rect, obstacle: &Rect, threshold: f32) -> bool {
    player.origin().distance(obstacle.origin()) < threshold
}
