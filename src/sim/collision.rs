//! Axis-aligned rectangle geometry
//!
//! Everything on the stage is a box anchored at its top-left corner, so
//! collision is a plain interval test on each axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            width: size.x,
            height: size.y,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: an inverted range collapses to
/// `min`, which is what placement needs when the stage is smaller than an
/// entity.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(value))
}

/// Upper bound of the valid top-left coordinate for an extent on an axis
#[inline]
pub fn max_offset(stage_extent: f32, entity_extent: f32) -> f32 {
    (stage_extent - entity_extent).max(0.0)
}

/// Open-interval overlap: touching edges do not count
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
