//! Screen-shake feedback
//!
//! The simulation only calls [`ShakeSink::shake`]. [`ScreenShake`] is a ready
//! implementation the host can use to offset its camera.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Camera feedback side channel
pub trait ShakeSink {
    fn shake(&mut self, duration: f32, strength: f32);
}

/// Discards every request (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoShake;

impl ShakeSink for NoShake {
    fn shake(&mut self, _duration: f32, _strength: f32) {}
}

/// Random camera offset with squared falloff
#[derive(Debug, Clone)]
pub struct ScreenShake {
    timer: f32,
    duration: f32,
    strength: f32,
    offset: Vec2,
    rng: Pcg32,
}

impl ScreenShake {
    pub fn new(seed: u64) -> Self {
        Self {
            timer: 0.0,
            duration: 0.0,
            strength: 0.0,
            offset: Vec2::ZERO,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Current camera offset in pixels
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn update(&mut self, dt: f32) {
        if self.timer <= 0.0 {
            self.offset = Vec2::ZERO;
            return;
        }

        self.timer = (self.timer - dt).max(0.0);

        // 1 -> 0 over the shake
        let t = if self.duration > 0.0 {
            self.timer / self.duration
        } else {
            0.0
        };
        let current = self.strength * t * t;

        self.offset = Vec2::new(
            self.rng.random_range(-1.0..=1.0) * current,
            self.rng.random_range(-1.0..=1.0) * current,
        );
    }
}

impl ShakeSink for ScreenShake {
    fn shake(&mut self, duration: f32, strength: f32) {
        self.duration = duration.max(0.0);
        self.timer = self.duration;
        self.strength = strength;
    }
}

/// Records requests; useful for asserting feedback in tests
#[derive(Debug, Default, Clone)]
pub struct ShakeLog {
    pub requests: Vec<(f32, f32)>,
}

impl ShakeSink for ShakeLog {
    fn shake(&mut self, duration: f32, strength: f32) {
        self.requests.push((duration, strength));
    }
}
