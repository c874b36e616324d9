//! Enemy archetypes
//!
//! Every enemy is an [`Entity`] plus a shooter that fires on every ready
//! frame. Archetypes differ only in health, pattern, cadence, energy and the
//! components they attach at construction.

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;

use super::animation::{AnimKey, Animation};
use super::bullet::{BulletEnergy, BulletManager, BulletOwner};
use super::component::{Rotation, RotationSequence, RotationStep};
use super::entity::{Body, Entity};
use super::geometry::ScreenSize;
use super::pattern::BulletPattern;
use super::shooter::Shooter;
use crate::consts::{ENEMY_BULLET_SPEED, ENEMY_FRAME, ENTITY_SCALE};
use crate::normalize_angle;
use crate::platform::{Content, Texture};

/// Body and death sprites shared by every enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemySprites {
    pub body: Texture,
    pub death: Texture,
}

impl EnemySprites {
    pub fn load(content: &dyn Content) -> Self {
        Self {
            body: content.texture("witch"),
            death: content.texture("death"),
        }
    }
}

/// Built-in enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Rapid cardinal fire
    Spinner,
    /// Four-way omni spread stepping an eighth turn per second
    CardinalSequencer,
    /// Sixteen-way omni spread under a continuous full-turn rotation
    OmniShotRotate,
    /// Slow three-bullet fork
    ThreeFork,
    /// Slow ten-bullet fan
    SpreadShot,
    /// Four-way omni spread, no rotation of its own
    CardinalSeparatorWeave,
    /// Four-way omni spread under a one-second full-turn rotation
    CardinalSpinnerSpread,
    /// Heavy three-way shot
    Stationary,
    /// Cardinal fire whose pattern spins at a fixed rate
    Rotating,
}

struct Archetype {
    health: f32,
    pattern: BulletPattern,
    cooldown: f32,
    damage: f32,
    energy: BulletEnergy,
}

impl EnemyKind {
    fn archetype(self) -> Archetype {
        let down = Vec2::Y;
        let (health, pattern, cooldown, damage, energy) = match self {
            EnemyKind::Spinner => (
                300.0,
                BulletPattern::cardinal(ENEMY_BULLET_SPEED),
                0.1,
                1.0,
                BulletEnergy::Red,
            ),
            EnemyKind::CardinalSequencer => (
                300.0,
                BulletPattern::omnidirectional(4, ENEMY_BULLET_SPEED),
                0.25,
                1.0,
                BulletEnergy::Green,
            ),
            EnemyKind::OmniShotRotate => (
                50.0,
                BulletPattern::omnidirectional(16, ENEMY_BULLET_SPEED),
                0.3,
                1.0,
                BulletEnergy::Red,
            ),
            EnemyKind::ThreeFork => (
                50.0,
                BulletPattern::spread(down, 3, 40.0, ENEMY_BULLET_SPEED),
                1.0,
                1.0,
                BulletEnergy::Red,
            ),
            EnemyKind::SpreadShot => (
                50.0,
                BulletPattern::spread(down, 10, 20.0, ENEMY_BULLET_SPEED),
                1.0,
                1.0,
                BulletEnergy::Red,
            ),
            EnemyKind::CardinalSeparatorWeave => (
                60.0,
                BulletPattern::omnidirectional(4, ENEMY_BULLET_SPEED),
                0.25,
                1.0,
                BulletEnergy::Red,
            ),
            EnemyKind::CardinalSpinnerSpread => (
                300.0,
                BulletPattern::omnidirectional(4, ENEMY_BULLET_SPEED),
                0.2,
                1.0,
                BulletEnergy::Green,
            ),
            EnemyKind::Stationary => (
                50.0,
                BulletPattern::three_way(down, 40.0, ENEMY_BULLET_SPEED),
                1.0,
                5.0,
                BulletEnergy::Yellow,
            ),
            EnemyKind::Rotating => (
                60.0,
                BulletPattern::cardinal(ENEMY_BULLET_SPEED),
                0.25,
                1.0,
                BulletEnergy::Green,
            ),
        };
        Archetype {
            health,
            pattern,
            cooldown,
            damage,
            energy,
        }
    }
}

/// Pattern rotation driven by the enemy itself rather than a component
#[derive(Debug, Clone, Copy, PartialEq)]
struct PatternSpin {
    speed: f32,
    angle: f32,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub entity: Entity,
    kind: EnemyKind,
    shooter: Shooter,
    spin: Option<PatternSpin>,
}

impl Enemy {
    /// Build an archetype at `position` (top-left, absolute pixels)
    pub fn new(kind: EnemyKind, position: Vec2, screen: ScreenSize, sprites: EnemySprites) -> Self {
        let arch = kind.archetype();
        let size = Vec2::splat(ENEMY_FRAME * ENTITY_SCALE);
        let body = Body::new(position, size, screen)
            .with_scale(ENTITY_SCALE)
            .with_health(arch.health);

        let mut entity = Entity::new(body, sprites.body).with_death_animation(sprites.death);
        entity.animator.add(
            AnimKey::Idle,
            Animation::new(sprites.body, 24, 24, 3, 1.0, true),
        );
        entity.animator.play(AnimKey::Idle);

        let shooter = Shooter::new(arch.pattern, BulletOwner::Enemy, arch.cooldown, arch.damage)
            .with_energy(arch.energy);

        let mut enemy = Self {
            entity,
            kind,
            shooter,
            spin: None,
        };

        match kind {
            EnemyKind::CardinalSequencer => {
                enemy.entity.add_component(RotationSequence::new(
                    true,
                    vec![RotationStep::new(FRAC_PI_4, 0.0, 1.0)],
                ));
            }
            EnemyKind::OmniShotRotate => {
                enemy.entity.add_component(Rotation::new(TAU, 2.0, 0.0, true));
            }
            EnemyKind::CardinalSpinnerSpread => {
                enemy.entity.add_component(Rotation::new(TAU, 1.0, 0.0, true));
            }
            EnemyKind::Rotating => {
                enemy.spin = Some(PatternSpin {
                    speed: 1.0,
                    angle: 0.0,
                });
            }
            _ => {}
        }

        enemy
    }

    pub fn with_energy(mut self, energy: BulletEnergy) -> Self {
        self.shooter.set_energy(energy);
        self
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn shooter(&self) -> &Shooter {
        &self.shooter
    }

    /// Replace pattern, cooldown and damage (countdown restarts)
    pub fn set_shooter_pattern(&mut self, pattern: BulletPattern, cooldown: f32, damage: f32) {
        self.shooter.configure(pattern, cooldown, damage);
    }

    pub fn set_bullet_energy(&mut self, energy: BulletEnergy) {
        self.shooter.set_energy(energy);
    }

    pub fn is_dead(&self) -> bool {
        self.entity.body.is_dead()
    }

    pub fn has_exited(&self) -> bool {
        self.entity.has_exited()
    }

    /// Components and movement, then fire. Returns bullets spawned.
    pub fn update(&mut self, dt: f32, bullets: &mut BulletManager) -> usize {
        self.entity.update(dt);
        if self.entity.body.is_dying() {
            return 0;
        }

        if let Some(spin) = &mut self.spin {
            spin.angle = normalize_angle(spin.angle + spin.speed * dt);
            self.shooter.pattern_mut().set_rotation(spin.angle);
        }

        let frame = self.entity.firing_frame();
        self.shooter.try_shoot(&frame, dt, true, 1.0, bullets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::component::EntityComponent;
    use std::f32::consts::PI;

    fn spawn(kind: EnemyKind) -> Enemy {
        Enemy::new(
            kind,
            Vec2::new(800.0, 100.0),
            ScreenSize::default(),
            EnemySprites::default(),
        )
    }

    #[test]
    fn test_archetype_stats() {
        let spinner = spawn(EnemyKind::Spinner);
        assert_eq!(spinner.entity.body.max_health(), 300.0);
        assert_eq!(spinner.shooter().cooldown(), 0.1);
        assert_eq!(spinner.shooter().energy(), BulletEnergy::Red);
        assert_eq!(spinner.entity.body.size(), Vec2::splat(144.0));

        let stationary = spawn(EnemyKind::Stationary);
        assert_eq!(stationary.shooter().damage(), 5.0);
        assert_eq!(stationary.shooter().energy(), BulletEnergy::Yellow);
    }

    #[test]
    fn test_attached_components() {
        let seq = spawn(EnemyKind::CardinalSequencer);
        assert!(matches!(
            seq.entity.components(),
            [EntityComponent::RotationSequence(_)]
        ));
        let omni = spawn(EnemyKind::OmniShotRotate);
        assert!(matches!(omni.entity.components(), [EntityComponent::Rotation(_)]));
        assert!(spawn(EnemyKind::ThreeFork).entity.components().is_empty());
    }

    #[test]
    fn test_fires_on_first_frame() {
        let mut bullets = BulletManager::new();
        let mut enemy = spawn(EnemyKind::SpreadShot);
        assert_eq!(enemy.update(0.016, &mut bullets), 10);
        assert_eq!(enemy.update(0.016, &mut bullets), 0);
        assert!(bullets.iter().all(|b| b.owner == BulletOwner::Enemy));
    }

    #[test]
    fn test_energy_override() {
        let mut bullets = BulletManager::new();
        let mut enemy = spawn(EnemyKind::CardinalSpinnerSpread).with_energy(BulletEnergy::Blue);
        enemy.update(0.016, &mut bullets);
        assert!(bullets.iter().all(|b| b.energy == BulletEnergy::Blue));
    }

    #[test]
    fn test_rotating_spins_pattern() {
        let mut bullets = BulletManager::new();
        let mut enemy = spawn(EnemyKind::Rotating);
        enemy.update(0.5, &mut bullets);
        assert!((enemy.shooter().pattern().rotation() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotating_spin_stays_wrapped() {
        let mut bullets = BulletManager::new();
        let mut enemy = spawn(EnemyKind::Rotating);
        for _ in 0..100 {
            enemy.update(0.1, &mut bullets);
        }
        // 10 rad of spin wraps to 10 - 4π
        let rotation = enemy.shooter().pattern().rotation();
        assert!((-PI..PI).contains(&rotation));
        assert!((rotation - (10.0 - 2.0 * TAU)).abs() < 1e-3);
    }

    #[test]
    fn test_reconfigure_restarts_countdown() {
        let mut bullets = BulletManager::new();
        let mut enemy = spawn(EnemyKind::SpreadShot);
        enemy.update(0.016, &mut bullets);
        assert!(enemy.shooter().timer() > 0.0);

        enemy.set_shooter_pattern(BulletPattern::fixed_direction(Vec2::Y, 300.0), 0.5, 3.0);
        enemy.set_bullet_energy(BulletEnergy::Yellow);
        assert_eq!(enemy.shooter().timer(), 0.0);

        bullets.clear();
        assert_eq!(enemy.update(0.016, &mut bullets), 1);
        let bullet = bullets.get(0).map(|b| (b.damage, b.energy));
        assert_eq!(bullet, Some((3.0, BulletEnergy::Yellow)));
        assert!((enemy.shooter().timer() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_dying_enemy_stops_firing() {
        let mut bullets = BulletManager::new();
        let mut enemy = spawn(EnemyKind::Spinner);
        enemy.entity.kill();
        assert_eq!(enemy.update(0.016, &mut bullets), 0);
        assert!(bullets.is_empty());
    }
}
