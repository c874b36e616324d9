//! Bullet collision and damage resolution
//!
//! Runs once per frame after everything has moved. Bullets are walked back to
//! front so a consumed bullet can be removed in place; each bullet resolves
//! against at most one target.

use super::bullet::{BulletManager, BulletOwner};
use super::enemy::Enemy;
use super::player::Player;
use super::state::GameEvent;
use crate::platform::ShakeSink;
use crate::tuning::Tuning;

/// Tally of one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemy_hits: u32,
    pub enemies_killed: u32,
    pub player_hits: u32,
    pub absorbed: u32,
    pub grazes: u32,
    /// Bullets that hit the player while invulnerable
    pub deflected: u32,
    pub player_died: bool,
}

/// Resolve every live bullet against its opposing side
pub fn resolve_collisions(
    player: &mut Player,
    enemies: &mut [Enemy],
    bullets: &mut BulletManager,
    tuning: &Tuning,
    shake: &mut dyn ShakeSink,
    events: &mut Vec<GameEvent>,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    for i in (0..bullets.len()).rev() {
        let Some(bullet) = bullets.get(i) else {
            continue;
        };

        match bullet.owner {
            BulletOwner::Player => {
                let core = bullet.hitbox();
                let damage = bullet.damage;

                let Some(enemy) = enemies.iter_mut().find(|e| {
                    e.entity
                        .body
                        .hitbox()
                        .is_some_and(|hitbox| hitbox.intersects(&core))
                }) else {
                    continue;
                };

                bullets.remove(i);
                let depleted = enemy.entity.body.apply_damage(damage);
                report.enemy_hits += 1;
                events.push(GameEvent::EnemyHit {
                    kind: enemy.kind(),
                    damage,
                });

                if depleted && enemy.entity.kill() {
                    report.enemies_killed += 1;
                    events.push(GameEvent::EnemyKilled {
                        kind: enemy.kind(),
                        position: enemy.entity.body.center(),
                    });
                    log::debug!("{:?} destroyed", enemy.kind());
                }
            }
            BulletOwner::Enemy => {
                let Some(player_box) = player.body().hitbox() else {
                    continue;
                };

                let shield_absorbs = bullet.energy == player.active_shield()
                    && bullet.energy != tuning.combat.unabsorbable_energy;
                let damage_hit = bullet.hitbox().intersects(&player_box);
                let graze_hit = !damage_hit
                    && !shield_absorbs
                    && bullet.graze_rect(tuning.graze.margin).intersects(&player_box);
                let damage = bullet.damage;
                let energy = bullet.energy;

                if graze_hit {
                    player.register_graze();
                    report.grazes += 1;
                    events.push(GameEvent::Grazed);
                }

                if !damage_hit {
                    continue;
                }
                bullets.remove(i);

                if player.is_invulnerable() {
                    report.deflected += 1;
                } else if shield_absorbs {
                    player.absorb(tuning);
                    report.absorbed += 1;
                    events.push(GameEvent::ShieldAbsorbed { energy });
                } else {
                    let died = player.take_hit(damage, tuning);
                    shake.shake(
                        tuning.combat.hit_shake_duration,
                        tuning.combat.hit_shake_strength,
                    );
                    report.player_hits += 1;
                    events.push(GameEvent::PlayerHit {
                        damage,
                        health: player.body().health(),
                    });
                    if died {
                        report.player_died = true;
                        events.push(GameEvent::PlayerDied);
                    }
                }
            }
            BulletOwner::None => {}
        }
    }

    report
}
