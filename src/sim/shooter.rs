//! Cooldown-gated firing
//!
//! The timer clamps at zero on every decrement, so a long frame can never be
//! banked into a burst of shots.

use super::bullet::{BulletEnergy, BulletManager, BulletOwner};
use super::pattern::{BulletPattern, FiringFrame};

#[derive(Debug, Clone)]
pub struct Shooter {
    pattern: BulletPattern,
    owner: BulletOwner,
    cooldown: f32,
    timer: f32,
    damage: f32,
    energy: BulletEnergy,
}

impl Shooter {
    pub fn new(pattern: BulletPattern, owner: BulletOwner, cooldown: f32, damage: f32) -> Self {
        Self {
            pattern,
            owner,
            cooldown: cooldown.max(0.0),
            timer: 0.0,
            damage,
            energy: BulletEnergy::Green,
        }
    }

    pub fn with_energy(mut self, energy: BulletEnergy) -> Self {
        self.energy = energy;
        self
    }

    pub fn energy(&self) -> BulletEnergy {
        self.energy
    }

    pub fn set_energy(&mut self, energy: BulletEnergy) {
        self.energy = energy;
    }

    pub fn pattern(&self) -> &BulletPattern {
        &self.pattern
    }

    pub fn pattern_mut(&mut self) -> &mut BulletPattern {
        &mut self.pattern
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn owner(&self) -> BulletOwner {
        self.owner
    }

    /// Swap the pattern only; the countdown keeps running
    pub fn set_pattern(&mut self, pattern: BulletPattern) {
        self.pattern = pattern;
    }

    /// Swap pattern, cooldown and damage together and make the shooter ready
    pub fn configure(&mut self, pattern: BulletPattern, cooldown: f32, damage: f32) {
        self.pattern = pattern;
        self.cooldown = cooldown.max(0.0);
        self.damage = damage;
        self.timer = 0.0;
    }

    /// Count down and fire one volley if triggered and ready.
    ///
    /// Returns the number of bullets spawned.
    pub fn try_shoot(
        &mut self,
        frame: &FiringFrame,
        dt: f32,
        triggered: bool,
        damage_multiplier: f32,
        bullets: &mut BulletManager,
    ) -> usize {
        self.timer = (self.timer - dt).max(0.0);

        if !triggered || self.timer > 0.0 {
            return 0;
        }

        self.timer = self.cooldown;
        self.pattern.shoot(
            frame,
            bullets,
            self.owner,
            self.damage * damage_multiplier,
            self.energy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::ScreenSize;
    use glam::Vec2;
    use proptest::prelude::*;

    fn frame() -> FiringFrame {
        FiringFrame {
            position: Vec2::new(400.0, 400.0),
            size: Vec2::splat(128.0),
            rotation: 0.0,
            screen: ScreenSize::default(),
        }
    }

    fn single_shot(cooldown: f32) -> Shooter {
        Shooter::new(
            BulletPattern::fixed_direction(Vec2::NEG_Y, 1500.0),
            BulletOwner::Player,
            cooldown,
            10.0,
        )
    }

    #[test]
    fn test_fires_once_per_cooldown_window() {
        let mut shooter = single_shot(0.125);
        let mut bullets = BulletManager::new();
        let mut fired_frames = Vec::new();

        for frame_index in 0..40 {
            let spawned = shooter.try_shoot(&frame(), 0.016, true, 1.0, &mut bullets);
            assert!(spawned <= 1);
            if spawned == 1 {
                fired_frames.push(frame_index);
            }
        }

        assert_eq!(fired_frames, vec![0, 8, 16, 24, 32]);
        assert_eq!(bullets.len(), 5);
    }

    #[test]
    fn test_long_frame_does_not_burst() {
        let mut shooter = single_shot(0.125);
        let mut bullets = BulletManager::new();
        shooter.try_shoot(&frame(), 0.0, true, 1.0, &mut bullets);
        assert_eq!(shooter.try_shoot(&frame(), 5.0, true, 1.0, &mut bullets), 1);
        assert_eq!(shooter.try_shoot(&frame(), 0.0, true, 1.0, &mut bullets), 0);
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn test_untriggered_still_counts_down() {
        let mut shooter = single_shot(0.5);
        let mut bullets = BulletManager::new();
        shooter.try_shoot(&frame(), 0.0, true, 1.0, &mut bullets);
        shooter.try_shoot(&frame(), 0.6, false, 1.0, &mut bullets);
        assert_eq!(shooter.timer(), 0.0);
        assert_eq!(shooter.try_shoot(&frame(), 0.0, true, 1.0, &mut bullets), 1);
    }

    #[test]
    fn test_damage_multiplier_applied() {
        let mut shooter = single_shot(0.1);
        let mut bullets = BulletManager::new();
        shooter.try_shoot(&frame(), 0.0, true, 2.5, &mut bullets);
        assert_eq!(bullets.get(0).map(|b| b.damage), Some(25.0));
        assert_eq!(bullets.get(0).map(|b| b.energy), Some(BulletEnergy::Green));
    }

    #[test]
    fn test_set_pattern_keeps_timer_configure_zeroes_it() {
        let mut shooter = single_shot(1.0);
        let mut bullets = BulletManager::new();
        shooter.try_shoot(&frame(), 0.0, true, 1.0, &mut bullets);
        assert_eq!(shooter.timer(), 1.0);

        shooter.set_pattern(BulletPattern::cardinal(500.0));
        assert_eq!(shooter.timer(), 1.0);

        shooter.configure(BulletPattern::cardinal(500.0), 0.2, 4.0);
        assert_eq!(shooter.timer(), 0.0);
        assert_eq!(shooter.try_shoot(&frame(), 0.0, true, 1.0, &mut bullets), 4);
        assert_eq!(shooter.timer(), 0.2);
    }

    proptest! {
        #[test]
        fn prop_no_burst(
            cooldown in 0.05f32..1.0,
            dts in proptest::collection::vec(0.0f32..2.0, 1..200),
        ) {
            let mut shooter = single_shot(cooldown);
            let mut bullets = BulletManager::new();
            let mut shots = 0usize;
            let mut since_last: Option<f32> = None;

            for dt in dts {
                if let Some(t) = since_last.as_mut() {
                    *t += dt;
                }
                let spawned = shooter.try_shoot(&frame(), dt, true, 1.0, &mut bullets);
                prop_assert!(spawned <= 1);
                if spawned == 1 {
                    if let Some(t) = since_last {
                        prop_assert!(t >= cooldown - 1e-4);
                    }
                    since_last = Some(0.0);
                    shots += 1;
                }
            }
            prop_assert_eq!(bullets.len(), shots);
        }
    }
}
