//! Per-frame simulation tick
//!
//! Core game loop that advances one stage by `dt`. The order is fixed:
//! player, enemies, bullets, collisions, sweep, stage timeline.

use super::collision::{CollisionReport, resolve_collisions};
use super::state::{GameEvent, GamePhase, PlayState};
use crate::platform::{InputSnapshot, ShakeSink};
use crate::tuning::Tuning;

/// Collaborators the tick reads from or reports to
pub struct Services<'a> {
    pub tuning: &'a Tuning,
    pub shake: &'a mut dyn ShakeSink,
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// False when paused or finished
    pub advanced: bool,
    pub player_shots: usize,
    pub enemy_shots: usize,
    pub spawned: usize,
    pub removed: usize,
    pub collisions: CollisionReport,
}

/// Advance the play state by one frame
pub fn tick(
    state: &mut PlayState,
    input: &mut InputSnapshot,
    services: &mut Services<'_>,
    dt: f32,
) -> TickReport {
    let mut report = TickReport::default();
    let dt = dt.max(0.0);

    // Handle pause toggle
    if input.consume_pause() {
        match state.phase {
            GamePhase::Playing => state.set_phase(GamePhase::Paused),
            GamePhase::Paused => state.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return report;
    }
    report.advanced = true;
    state.time += dt;
    state.frame += 1;

    let tuning = services.tuning;

    // Player
    let player_out = state
        .player
        .update(input, dt, &mut state.bullets, tuning);
    report.player_shots = player_out.bullets_fired;
    if player_out.dash_started {
        state.push_event(GameEvent::DashStarted);
    }
    if let Some(tier) = player_out.ability_activated {
        state.push_event(GameEvent::AbilityActivated { tier });
    }
    if player_out.ability_expired {
        state.push_event(GameEvent::AbilityExpired);
    }

    // Enemies
    for enemy in &mut state.enemies {
        report.enemy_shots += enemy.update(dt, &mut state.bullets);
    }

    // Bullets
    state.bullets.update(dt);

    // Collisions
    let mut events = std::mem::take(state.events_mut());
    report.collisions = resolve_collisions(
        &mut state.player,
        &mut state.enemies,
        &mut state.bullets,
        tuning,
        &mut *services.shake,
        &mut events,
    );

    // Sweep
    let before = state.enemies.len();
    state.enemies.retain(|enemy| {
        if enemy.is_dead() {
            return false;
        }
        if enemy.has_exited() {
            events.push(GameEvent::EnemyExited { kind: enemy.kind() });
            return false;
        }
        true
    });
    report.removed = before - state.enemies.len();
    *state.events_mut() = events;

    // Stage timeline
    let first_new = state.enemies.len();
    report.spawned = state
        .composer
        .update(dt, state.screen, &mut state.enemies);
    for i in first_new..state.enemies.len() {
        let kind = state.enemies[i].kind();
        state.push_event(GameEvent::EnemySpawned { kind });
    }

    if state.player.is_dead() {
        state.set_phase(GamePhase::GameOver);
    } else if state.composer.is_finished() && state.enemies.is_empty() {
        state.set_phase(GamePhase::StageCleared);
    }

    if state.frame % 600 == 0 {
        log::debug!(
            "t={:.1}s enemies={} bullets={} hp={}",
            state.time,
            state.enemies.len(),
            state.bullets.len(),
            state.player.body().health()
        );
    }

    report
}
