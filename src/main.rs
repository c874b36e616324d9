//! Void Zero headless runner
//!
//! Plays one stage with scripted input at a fixed 60 Hz step and logs a
//! summary every simulated second.
//!
//! Usage: `void-zero [stage] [tuning.json]`

use glam::Vec2;

use void_zero::consts::FRAME_DT;
use void_zero::platform::{InputSnapshot, ScreenShake, TextureAtlas};
use void_zero::renderer::{DrawRequest, SpriteBatch, draw_play_state};
use void_zero::sim::{GameEvent, PlayState, Rect, Services, StageId, tick};
use void_zero::{Settings, Tuning};

/// Hard stop for runs that never clear
const MAX_SECONDS: f32 = 180.0;

#[derive(Default)]
struct CountingBatch {
    sprites: usize,
    rects: usize,
}

impl SpriteBatch for CountingBatch {
    fn draw(&mut self, _request: &DrawRequest) {
        self.sprites += 1;
    }

    fn draw_rect(&mut self, _rect: Rect, _color: [f32; 4]) {
        self.rects += 1;
    }
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::error!("Could not read {}: {}", path, e);
            Tuning::default()
        }
    }
}

/// Weave left and right while holding fire, pressing the other buttons on a timer
fn scripted_input(frame: u64, time: f32) -> InputSnapshot {
    let mut input = InputSnapshot::new()
        .with_move(Vec2::new((time * 1.3).sin(), 0.2 * (time * 0.7).cos()))
        .with_shoot(true);
    if frame > 0 && frame % 120 == 0 {
        input.press_dash();
    }
    if frame > 0 && frame % 180 == 0 {
        input.press_switch_shield();
    }
    if frame > 0 && frame % 600 == 0 {
        input.press_ability();
    }
    input
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let stage = args
        .get(1)
        .and_then(|s| s.parse::<u32>().ok())
        .and_then(StageId::from_number)
        .unwrap_or(StageId::One);
    let tuning = load_tuning(args.get(2).map(String::as_str));

    log::info!("Void Zero (headless) starting stage {}", stage.number());

    let content = TextureAtlas::with_defaults();
    let settings = Settings::default();
    let mut state = PlayState::new(stage, &content, &settings, &tuning);
    let mut shake = ScreenShake::new(0x5eed);
    let mut batch = CountingBatch::default();

    let mut kills = 0usize;
    let mut grazes = 0usize;
    let mut next_summary = 1.0;

    while !state.is_over() && state.time < MAX_SECONDS {
        let mut input = scripted_input(state.frame, state.time);
        let mut services = Services {
            tuning: &tuning,
            shake: &mut shake,
        };
        tick(&mut state, &mut input, &mut services, FRAME_DT);
        shake.update(FRAME_DT);
        draw_play_state(&state, &mut batch, false, tuning.graze.margin);

        for event in state.take_events() {
            match event {
                GameEvent::EnemyKilled { kind, .. } => {
                    kills += 1;
                    log::debug!("Killed {:?}", kind);
                }
                GameEvent::Grazed => grazes += 1,
                GameEvent::PlayerHit { damage, health } => {
                    log::debug!("Player hit for {} ({} left)", damage, health);
                }
                _ => {}
            }
        }

        if state.time >= next_summary {
            next_summary += 1.0;
            log::info!(
                "t={:.0}s enemies={} bullets={} hp={:.0} kills={} grazes={} sprites={}",
                state.time,
                state.enemies.len(),
                state.bullets.len(),
                state.player.body().health(),
                kills,
                grazes,
                batch.sprites
            );
        }
    }

    log::info!(
        "Finished in {:?} after {:.1}s ({} frames, {} kills)",
        state.phase,
        state.time,
        state.frame,
        kills
    );
}
