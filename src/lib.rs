//! Void Zero - A bullet-hell arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, bullets, collisions, stages)
//! - `renderer`: Draw-call adapter over an external sprite batch
//! - `platform`: Input snapshot, content lookup and screen-shake hooks
//! - `settings`: Screen and audio preferences
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default logical screen size
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1600.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 900.0;

    /// Fixed frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Sprite scale applied to enemies and the player
    pub const ENTITY_SCALE: f32 = 6.0;
    /// Enemy sprite frame size in texels
    pub const ENEMY_FRAME: f32 = 24.0;
    /// Player sprite size in pixels (already scaled)
    pub const PLAYER_SIZE: f32 = 128.0;

    /// Bullet sprite frame size in texels
    pub const BULLET_FRAME: f32 = 16.0;
    pub const BULLET_SCALE: f32 = 4.0;
    /// Bullets live this long unless consumed first (seconds)
    pub const BULLET_LIFETIME: f32 = 10.0;
    /// Default bullet speed for enemy patterns (pixels/s)
    pub const ENEMY_BULLET_SPEED: f32 = 500.0;
    /// Default bullet speed for player patterns (pixels/s)
    pub const PLAYER_BULLET_SPEED: f32 = 1500.0;

    /// Fraction of width/height trimmed from each side of a sprite to get its hitbox
    pub const HITBOX_SHRINK: f32 = 0.25;

    /// Death animation fallback length (seconds)
    pub const DEATH_DURATION: f32 = 0.4;

    /// Spread patterns never fan wider than this (degrees)
    pub const MAX_SPREAD_DEGREES: f32 = 180.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotate a vector by `radians` and return it re-normalized.
///
/// A zero vector stays zero.
#[inline]
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v).normalize_or_zero()
}

/// Convert a screen-relative point (0..1 per axis) to absolute pixels
#[inline]
pub fn relative_to_absolute(relative: Vec2, screen: Vec2) -> Vec2 {
    relative * screen
}

/// Convert an absolute point to screen-relative coordinates
#[inline]
pub fn absolute_to_relative(absolute: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(
        if screen.x != 0.0 { absolute.x / screen.x } else { 0.0 },
        if screen.y != 0.0 { absolute.y / screen.y } else { 0.0 },
    )
}
