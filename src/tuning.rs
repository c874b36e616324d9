//! Data-driven game balance
//!
//! Every number the player controller and the collision pass care about lives
//! here so a JSON file can override it. Missing fields fall back to defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PLAYER_BULLET_SPEED;
use crate::sim::bullet::BulletEnergy;
use crate::sim::pattern::BulletPattern;

/// Failure while loading tuning or settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document was not valid JSON for the expected shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is outside its legal range
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Player movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_speed: f32,
    /// After input is released, velocity decays exponentially for this long
    pub drift_window: f32,
    /// Fraction of velocity kept per second while drifting
    pub drift_retention: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            acceleration: 8000.0,
            deceleration: 5000.0,
            max_speed: 1000.0,
            drift_window: 0.08,
            drift_retention: 0.02,
        }
    }
}

/// Dash burst and afterimage trail
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    pub cooldown: f32,
    pub speed: f32,
    pub duration: f32,
    /// Invulnerability granted from the start of the dash
    pub invulnerability: f32,
    pub afterimage_interval: f32,
    pub afterimage_lifetime: f32,
    pub afterimage_capacity: usize,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            cooldown: 0.6,
            speed: 3000.0,
            duration: 0.12,
            invulnerability: 0.25,
            afterimage_interval: 0.02,
            afterimage_lifetime: 0.2,
            afterimage_capacity: 8,
        }
    }
}

/// Graze reward
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrazeTuning {
    /// Bonus gained per second while grazing
    pub gain_rate: f32,
    /// Bonus lost per second while not grazing
    pub decay_rate: f32,
    /// Damage multiplier ceiling (bonus is clamped to `max_multiplier - 1`)
    pub max_multiplier: f32,
    /// Graze rectangle grows by this fraction of the bullet size on each side
    pub margin: f32,
}

impl Default for GrazeTuning {
    fn default() -> Self {
        Self {
            gain_rate: 1.5,
            decay_rate: 0.5,
            max_multiplier: 3.0,
            margin: 0.5,
        }
    }
}

/// One purchasable ability upgrade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityTier {
    pub cost: f32,
    pub duration: f32,
    pub pattern: BulletPattern,
    pub cooldown: f32,
    pub damage: f32,
}

/// Ability bar
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityTuning {
    pub max: f32,
    /// Passive fill per second while not shooting
    pub fill_rate: f32,
    /// Granted per bullet absorbed by the shield
    pub absorb_fill_amount: f32,
    /// Ordered by ascending cost
    pub tiers: Vec<AbilityTier>,
}

impl Default for AbilityTuning {
    fn default() -> Self {
        let up = Vec2::NEG_Y;
        Self {
            max: 100.0,
            fill_rate: 4.0,
            absorb_fill_amount: 5.0,
            tiers: vec![
                AbilityTier {
                    cost: 33.0,
                    duration: 5.0,
                    pattern: BulletPattern::three_way(up, 15.0, PLAYER_BULLET_SPEED),
                    cooldown: 0.125,
                    damage: 10.0,
                },
                AbilityTier {
                    cost: 66.0,
                    duration: 6.0,
                    pattern: BulletPattern::spread(up, 5, 8.0, PLAYER_BULLET_SPEED),
                    cooldown: 0.1,
                    damage: 10.0,
                },
                AbilityTier {
                    cost: 100.0,
                    duration: 8.0,
                    pattern: BulletPattern::spread(up, 9, 6.0, PLAYER_BULLET_SPEED),
                    cooldown: 0.08,
                    damage: 12.0,
                },
            ],
        }
    }
}

/// Player health, weapon and shield
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    pub hitbox_shrink: f32,
    pub fire_cooldown: f32,
    pub fire_damage: f32,
    pub regen_delay: f32,
    /// Post-hit invulnerability + flicker window
    pub flash_duration: f32,
    pub flicker_interval: f32,
    pub shield_flash_duration: f32,
    /// The two energies the shield cycles through
    pub shield_cycle: [BulletEnergy; 2],
    pub death_duration: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 5.0,
            hitbox_shrink: 0.4,
            fire_cooldown: 0.125,
            fire_damage: 10.0,
            regen_delay: 8.0,
            flash_duration: 1.0,
            flicker_interval: 0.1,
            shield_flash_duration: 0.5,
            shield_cycle: [BulletEnergy::Red, BulletEnergy::Blue],
            death_duration: 0.8,
        }
    }
}

/// Collision side effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Bullets of this energy always damage, even with a matching shield
    pub unabsorbable_energy: BulletEnergy,
    pub hit_shake_duration: f32,
    pub hit_shake_strength: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            unabsorbable_energy: BulletEnergy::Green,
            hit_shake_duration: 0.25,
            hit_shake_strength: 12.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub movement: MovementTuning,
    pub dash: DashTuning,
    pub graze: GrazeTuning,
    pub ability: AbilityTuning,
    pub player: PlayerTuning,
    pub combat: CombatTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning: {} ability tiers, unabsorbable energy {:?}",
            tuning.ability.tiers.len(),
            tuning.combat.unabsorbable_energy
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        if m.max_speed <= 0.0 {
            return Err(ConfigError::invalid("movement.max_speed", "must be positive"));
        }
        if m.acceleration < 0.0 || m.deceleration < 0.0 {
            return Err(ConfigError::invalid(
                "movement.acceleration",
                "acceleration and deceleration must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&m.drift_retention) {
            return Err(ConfigError::invalid(
                "movement.drift_retention",
                "must be within [0, 1]",
            ));
        }

        let d = &self.dash;
        if d.afterimage_capacity == 0 {
            return Err(ConfigError::invalid("dash.afterimage_capacity", "must be at least 1"));
        }
        if d.duration < 0.0 || d.cooldown < 0.0 || d.invulnerability < 0.0 {
            return Err(ConfigError::invalid("dash", "timers must be non-negative"));
        }

        if self.graze.max_multiplier < 1.0 {
            return Err(ConfigError::invalid("graze.max_multiplier", "must be at least 1.0"));
        }

        let p = &self.player;
        if p.max_health <= 0.0 {
            return Err(ConfigError::invalid("player.max_health", "must be positive"));
        }
        if p.fire_cooldown <= 0.0 {
            return Err(ConfigError::invalid("player.fire_cooldown", "must be positive"));
        }
        if !(0.0..0.5).contains(&p.hitbox_shrink) {
            return Err(ConfigError::invalid("player.hitbox_shrink", "must be within [0, 0.5)"));
        }
        if p.flicker_interval <= 0.0 {
            return Err(ConfigError::invalid("player.flicker_interval", "must be positive"));
        }

        if p.shield_cycle[0] == p.shield_cycle[1] {
            return Err(ConfigError::invalid(
                "player.shield_cycle",
                "the two shield energies must differ",
            ));
        }

        let a = &self.ability;
        if a.max <= 0.0 {
            return Err(ConfigError::invalid("ability.max", "must be positive"));
        }
        let mut last_cost = 0.0;
        for tier in &a.tiers {
            if tier.cost <= 0.0 || tier.cost > a.max {
                return Err(ConfigError::invalid(
                    "ability.tiers",
                    format!("tier cost {} outside (0, {}]", tier.cost, a.max),
                ));
            }
            if tier.cost < last_cost {
                return Err(ConfigError::invalid(
                    "ability.tiers",
                    "tiers must be ordered by ascending cost",
                ));
            }
            if tier.cooldown <= 0.0 {
                return Err(ConfigError::invalid("ability.tiers", "tier cooldown must be positive"));
            }
            last_cost = tier.cost;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "player": { "max_health": 9.0 },
            "combat": { "unabsorbable_energy": "Neutral" }
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.player.max_health, 9.0);
        assert_eq!(tuning.player.fire_cooldown, 0.125);
        assert_eq!(tuning.combat.unabsorbable_energy, BulletEnergy::Neutral);
        assert_eq!(tuning.ability.tiers.len(), 3);
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_graze_multiplier() {
        let err = Tuning::from_json(r#"{ "graze": { "max_multiplier": 0.5 } }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "graze.max_multiplier"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shield_cycle_must_alternate() {
        let err = Tuning::from_json(r#"{ "player": { "shield_cycle": ["Red", "Red"] } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "player.shield_cycle",
                ..
            }
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_tiers() {
        let json = Tuning::default().to_json().unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.ability.tiers.len(), Tuning::default().ability.tiers.len());
    }
}
