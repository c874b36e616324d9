//! Rendering adapter
//!
//! The simulation never touches pixels. It turns state into `DrawRequest`s
//! and hands them to whatever sprite batch the host provides.

pub mod sprites;

use glam::Vec2;

use crate::platform::Texture;
use crate::sim::{BulletEnergy, Rect};

pub use sprites::{DrawStats, draw_play_state};

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    pub texture: Texture,
    /// Row in a vertically stacked sprite sheet
    pub frame: u32,
    /// Top-left in screen pixels
    pub position: Vec2,
    pub scale: f32,
    /// RGBA, 0..1
    pub tint: [f32; 4],
    /// Radians around the sprite center
    pub rotation: f32,
}

impl DrawRequest {
    pub fn new(texture: Texture, position: Vec2) -> Self {
        Self {
            texture,
            frame: 0,
            position,
            scale: 1.0,
            tint: WHITE,
            rotation: 0.0,
        }
    }

    pub fn frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = tint;
        self
    }

    pub fn rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Host-side sprite batch
pub trait SpriteBatch {
    fn draw(&mut self, request: &DrawRequest);

    /// Outline used for debug overlays
    fn draw_rect(&mut self, rect: Rect, color: [f32; 4]);
}

/// Tint applied to bullets and the shield for each energy
pub fn energy_tint(energy: BulletEnergy) -> [f32; 4] {
    match energy {
        BulletEnergy::Green => [0.3, 1.0, 0.0, 1.0],
        BulletEnergy::Red => [1.0, 0.0, 0.0, 1.0],
        BulletEnergy::Blue => [0.0, 0.6, 1.0, 1.0],
        BulletEnergy::Yellow => [1.0, 0.9, 0.2, 1.0],
        BulletEnergy::Neutral => WHITE,
    }
}

/// Multiply a color's alpha
pub fn with_alpha(mut color: [f32; 4], alpha: f32) -> [f32; 4] {
    color[3] *= alpha.clamp(0.0, 1.0);
    color
}
