//! Axis-aligned rectangles and screen dimensions
//!
//! Screen space: origin top-left, +Y down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical screen size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Top-left position that centers a `size` sprite on the given screen fraction
    pub fn centered_at(&self, x_fraction: f32, y_fraction: f32, size: Vec2) -> Vec2 {
        Vec2::new(
            x_fraction * self.width - size.x / 2.0,
            y_fraction * self.height - size.y / 2.0,
        )
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_SCREEN_WIDTH,
            crate::consts::DEFAULT_SCREEN_HEIGHT,
        )
    }
}

/// Axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Trim `factor` of the width/height from every side
    pub fn shrink(&self, factor: f32) -> Rect {
        let dx = self.width * factor;
        let dy = self.height * factor;
        Rect::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2.0 * dx).max(0.0),
            (self.height - 2.0 * dy).max(0.0),
        )
    }

    /// Grow by `factor` of the width/height on every side
    pub fn expand(&self, factor: f32) -> Rect {
        let dx = self.width * factor;
        let dy = self.height * factor;
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + 2.0 * dx,
            self.height + 2.0 * dy,
        )
    }

    /// Strict overlap test; touching edges and empty rects never intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}
