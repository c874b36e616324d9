//! Bullet pattern strategies
//!
//! A pattern maps a firing frame to a set of unit directions and spawns one
//! bullet per direction. Patterns hold no textures; the renderer picks the
//! bullet sprite.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletEnergy, BulletManager, BulletOwner};
use super::geometry::ScreenSize;
use crate::consts::MAX_SPREAD_DEGREES;
use crate::rotate;

/// What a pattern needs to know about the entity firing it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiringFrame {
    /// Top-left of the shooter's sprite
    pub position: Vec2,
    pub size: Vec2,
    /// Static rotation plus any live rotation component value
    pub rotation: f32,
    pub screen: ScreenSize,
}

/// Polymorphic bullet pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BulletPattern {
    /// ±X and ±Y, rotated by a live offset
    Cardinal {
        speed: f32,
        #[serde(default)]
        rotation: f32,
    },
    /// One bullet along a fixed direction
    FixedDirection { direction: Vec2, speed: f32 },
    /// `count` bullets fanned around a base direction, or evenly around the
    /// full circle when `omnidirectional`
    Spread {
        base_direction: Vec2,
        count: u32,
        angle_between_degrees: f32,
        speed: f32,
        #[serde(default)]
        omnidirectional: bool,
    },
    /// Center plus ±angle
    ThreeWay {
        base_direction: Vec2,
        angle_degrees: f32,
        speed: f32,
    },
}

impl BulletPattern {
    pub fn cardinal(speed: f32) -> Self {
        BulletPattern::Cardinal {
            speed,
            rotation: 0.0,
        }
    }

    pub fn fixed_direction(direction: Vec2, speed: f32) -> Self {
        BulletPattern::FixedDirection {
            direction: direction.normalize_or_zero(),
            speed,
        }
    }

    pub fn spread(
        base_direction: Vec2,
        count: u32,
        angle_between_degrees: f32,
        speed: f32,
    ) -> Self {
        BulletPattern::Spread {
            base_direction: base_direction.normalize_or_zero(),
            count,
            angle_between_degrees,
            speed,
            omnidirectional: false,
        }
    }

    /// `count` bullets at `360 / count` spacing, starting from +Y
    pub fn omnidirectional(count: u32, speed: f32) -> Self {
        BulletPattern::Spread {
            base_direction: Vec2::Y,
            count,
            angle_between_degrees: 0.0,
            speed,
            omnidirectional: true,
        }
    }

    pub fn three_way(base_direction: Vec2, angle_degrees: f32, speed: f32) -> Self {
        BulletPattern::ThreeWay {
            base_direction: base_direction.normalize_or_zero(),
            angle_degrees,
            speed,
        }
    }

    /// Set the live rotation offset. Only cardinal patterns carry one.
    pub fn set_rotation(&mut self, radians: f32) {
        if let BulletPattern::Cardinal { rotation, .. } = self {
            *rotation = radians;
        }
    }

    pub fn rotation(&self) -> f32 {
        match self {
            BulletPattern::Cardinal { rotation, .. } => *rotation,
            _ => 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        match self {
            BulletPattern::Cardinal { speed, .. }
            | BulletPattern::FixedDirection { speed, .. }
            | BulletPattern::Spread { speed, .. }
            | BulletPattern::ThreeWay { speed, .. } => *speed,
        }
    }

    /// Unit directions for one volley. Degenerate inputs yield nothing.
    pub fn directions(&self, shooter_rotation: f32) -> Vec<Vec2> {
        let dirs: Vec<Vec2> = match self {
            BulletPattern::Cardinal { rotation, .. } => [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y]
                .into_iter()
                .map(|d| rotate(d, *rotation))
                .collect(),
            BulletPattern::FixedDirection { direction, .. } => vec![direction.normalize_or_zero()],
            BulletPattern::Spread {
                base_direction,
                count,
                angle_between_degrees,
                omnidirectional,
                ..
            } => spread_directions(
                *base_direction,
                *count,
                *angle_between_degrees,
                *omnidirectional,
                shooter_rotation,
            ),
            BulletPattern::ThreeWay {
                base_direction,
                angle_degrees,
                ..
            } => {
                let rad = angle_degrees.to_radians();
                vec![
                    base_direction.normalize_or_zero(),
                    rotate(*base_direction, -rad),
                    rotate(*base_direction, rad),
                ]
            }
        };

        dirs.into_iter().filter(|d| d.length_squared() > 0.0).collect()
    }

    /// Where bullets appear relative to the shooter's sprite
    pub fn spawn_position(&self, frame: &FiringFrame, owner: BulletOwner) -> Vec2 {
        let y_offset = match owner {
            BulletOwner::Player => 0.0,
            _ => match self {
                BulletPattern::Spread { .. } => frame.size.y / 2.0,
                _ => frame.size.y,
            },
        };
        Vec2::new(frame.position.x + frame.size.x / 4.0, frame.position.y + y_offset)
    }

    /// Spawn one volley into `bullets`, returning how many were added
    pub fn shoot(
        &self,
        frame: &FiringFrame,
        bullets: &mut BulletManager,
        owner: BulletOwner,
        damage: f32,
        energy: BulletEnergy,
    ) -> usize {
        let spawn = self.spawn_position(frame, owner);
        let speed = self.speed();
        let dirs = self.directions(frame.rotation);
        for dir in &dirs {
            bullets.add(Bullet::new(spawn, *dir, speed, owner, damage, energy, frame.screen));
        }
        dirs.len()
    }
}

fn spread_directions(
    base: Vec2,
    count: u32,
    angle_between_degrees: f32,
    omnidirectional: bool,
    shooter_rotation: f32,
) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }

    if omnidirectional {
        let step = 360.0 / count as f32;
        return (0..count)
            .map(|i| rotate(Vec2::Y, (i as f32 * step).to_radians() + shooter_rotation))
            .collect();
    }

    let mut step = angle_between_degrees;
    let mut total = (count - 1) as f32 * step;
    if total.abs() > MAX_SPREAD_DEGREES {
        total = MAX_SPREAD_DEGREES.copysign(total);
        step = total / (count - 1) as f32;
    }
    let start = -total / 2.0;

    (0..count)
        .map(|i| rotate(base, (start + i as f32 * step).to_radians() + shooter_rotation))
        .collect()
}
