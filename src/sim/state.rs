//! Play state and core simulation types
//!
//! Everything one running stage needs between frames lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bullet::{BulletEnergy, BulletManager};
use super::enemy::{Enemy, EnemyKind, EnemySprites};
use super::geometry::ScreenSize;
use super::player::{Player, PlayerSprites};
use super::stage::{StageComposer, StageId};
use crate::platform::{Content, Texture};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Every scheduled enemy spawned and the roster emptied
    StageCleared,
    /// Player finished dying
    GameOver,
}

/// Things that happened during a tick, for audio/UI hooks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    EnemySpawned { kind: EnemyKind },
    EnemyHit { kind: EnemyKind, damage: f32 },
    EnemyKilled { kind: EnemyKind, position: Vec2 },
    /// Enemy left through its exit component
    EnemyExited { kind: EnemyKind },
    PlayerHit { damage: f32, health: f32 },
    PlayerDied,
    ShieldAbsorbed { energy: BulletEnergy },
    Grazed,
    DashStarted,
    AbilityActivated { tier: usize },
    AbilityExpired,
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// One running stage
#[derive(Debug)]
pub struct PlayState {
    pub stage: StageId,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: BulletManager,
    pub composer: StageComposer,
    pub screen: ScreenSize,
    /// Seconds of unpaused play
    pub time: f32,
    /// Simulation tick counter
    pub frame: u64,
    /// Sprite for every bullet
    pub bullet_texture: Texture,
    pub shield_texture: Texture,
    events: Vec<GameEvent>,
}

impl PlayState {
    pub fn new(
        stage: StageId,
        content: &dyn Content,
        settings: &Settings,
        tuning: &Tuning,
    ) -> Self {
        let screen = settings.screen_size();
        let player = Player::spawn(screen, PlayerSprites::load(content), tuning);
        let composer = stage.build(EnemySprites::load(content));

        log::info!(
            "Stage {} ready: {} events, screen {}x{}",
            stage.number(),
            composer.len(),
            screen.width,
            screen.height
        );

        Self {
            stage,
            phase: GamePhase::Playing,
            player,
            enemies: Vec::new(),
            bullets: BulletManager::new(),
            composer,
            screen,
            time: 0.0,
            frame: 0,
            bullet_texture: content.texture("VanillaBullet"),
            shield_texture: content.texture("shield"),
            events: Vec::new(),
        }
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        self.events.push(GameEvent::PhaseChanged {
            from: self.phase,
            to: phase,
        });
        self.phase = phase;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn events_mut(&mut self) -> &mut Vec<GameEvent> {
        &mut self.events
    }

    /// Drain everything recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Re-derive every absolute position for a new screen size
    pub fn resize(&mut self, width: u32, height: u32) {
        let screen = ScreenSize::new(width.max(1) as f32, height.max(1) as f32);
        log::debug!("Resize to {}x{}", screen.width, screen.height);
        self.screen = screen;
        self.player.on_resize(screen);
        for enemy in &mut self.enemies {
            enemy.entity.on_resize(screen);
        }
        self.bullets.on_resize(screen);
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::StageCleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::TextureAtlas;

    fn state() -> PlayState {
        PlayState::new(
            StageId::Two,
            &TextureAtlas::with_defaults(),
            &Settings::default(),
            &Tuning::default(),
        )
    }

    #[test]
    fn test_new_state_is_playing() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Playing);
        assert!(s.enemies.is_empty());
        assert_eq!(s.composer.len(), 1);
        assert_ne!(s.bullet_texture, s.shield_texture);
    }

    #[test]
    fn test_phase_change_recorded_once() {
        let mut s = state();
        s.set_phase(GamePhase::Paused);
        s.set_phase(GamePhase::Paused);
        let events = s.take_events();
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Playing,
                to: GamePhase::Paused
            }]
        );
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_resize_round_trip() {
        let mut s = state();
        let before = s.player.body().position();
        s.resize(800, 600);
        assert_ne!(s.player.body().position(), before);
        s.resize(1600, 900);
        assert!((s.player.body().position() - before).length() < 1e-3);
    }
}
