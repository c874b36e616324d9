//! Projectiles and their owning collection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::geometry::{Rect, ScreenSize};
use crate::consts::{BULLET_FRAME, BULLET_LIFETIME, BULLET_SCALE};

/// Energy tag shared by bullets and the player's shield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BulletEnergy {
    Blue,
    Red,
    Green,
    Yellow,
    #[default]
    Neutral,
}

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
    /// Decorative; never collides
    #[default]
    None,
}

/// A projectile travelling in a straight line
#[derive(Debug, Clone)]
pub struct Bullet {
    pub body: Body,
    direction: Vec2,
    pub speed: f32,
    pub lifetime: f32,
    pub energy: BulletEnergy,
    pub owner: BulletOwner,
    pub damage: f32,
    /// Seconds since spawn (drives the sprite frame)
    pub age: f32,
}

impl Bullet {
    pub fn new(
        position: Vec2,
        direction: Vec2,
        speed: f32,
        owner: BulletOwner,
        damage: f32,
        energy: BulletEnergy,
        screen: ScreenSize,
    ) -> Self {
        let size = Vec2::splat(BULLET_FRAME * BULLET_SCALE);
        Self {
            body: Body::new(position, size, screen).with_scale(BULLET_SCALE),
            direction: direction.normalize_or_zero(),
            speed,
            lifetime: BULLET_LIFETIME,
            energy,
            owner,
            damage,
            age: 0.0,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Core hit rectangle
    pub fn hitbox(&self) -> Rect {
        self.body.bounds().shrink(crate::consts::HITBOX_SHRINK)
    }

    /// Near-miss rectangle, `margin` of the sprite size wider on each side
    pub fn graze_rect(&self, margin: f32) -> Rect {
        self.body.bounds().expand(margin)
    }

    pub fn update(&mut self, dt: f32) {
        self.body.translate(self.direction * self.speed * dt);
        self.lifetime -= dt;
        self.age += dt;
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// Sole owner of live bullets
#[derive(Debug, Clone, Default)]
pub struct BulletManager {
    bullets: Vec<Bullet>,
}

impl BulletManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// Advance and expire in one back-to-front pass
    pub fn update(&mut self, dt: f32) {
        for i in (0..self.bullets.len()).rev() {
            self.bullets[i].update(dt);
            if self.bullets[i].is_expired() {
                self.bullets.remove(i);
            }
        }
    }

    /// Forward iteration, the paint order
    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Bullet> {
        self.bullets.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Bullet> {
        if index < self.bullets.len() {
            Some(self.bullets.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }

    pub fn on_resize(&mut self, screen: ScreenSize) {
        for bullet in &mut self.bullets {
            bullet.body.on_resize(screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullet(lifetime: f32) -> Bullet {
        let mut b = Bullet::new(
            Vec2::ZERO,
            Vec2::new(0.0, 3.0),
            100.0,
            BulletOwner::Enemy,
            1.0,
            BulletEnergy::Red,
            ScreenSize::default(),
        );
        b.lifetime = lifetime;
        b
    }

    #[test]
    fn test_direction_normalized() {
        let b = bullet(1.0);
        assert!((b.direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rects() {
        let b = bullet(1.0);
        assert_eq!(b.hitbox(), Rect::new(16.0, 16.0, 32.0, 32.0));
        assert_eq!(b.graze_rect(0.5), Rect::new(-32.0, -32.0, 128.0, 128.0));
    }

    #[test]
    fn test_update_moves_and_expires() {
        let mut manager = BulletManager::new();
        manager.add(bullet(0.05));
        manager.add(bullet(1.0));
        manager.add(bullet(0.02));
        manager.update(0.1);
        assert_eq!(manager.len(), 1);
        let survivor = manager.get(0).map(|b| b.body.position());
        assert_eq!(survivor, Some(Vec2::new(0.0, 10.0)));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut manager = BulletManager::new();
        assert!(manager.remove(0).is_none());
        manager.add(bullet(1.0));
        assert!(manager.remove(0).is_some());
        assert!(manager.is_empty());
    }
}
