//! Play-state draw pass
//!
//! Paint order: afterimages, enemies, bullets, player, shield, then optional
//! hitbox outlines.

use glam::Vec2;

use super::{DrawRequest, SpriteBatch, WHITE, energy_tint, with_alpha};
use crate::consts::{BULLET_SCALE, ENTITY_SCALE};
use crate::sim::{AnimKey, Entity, PlayState};

/// Shield sprite is 32 texels drawn at 4x
const SHIELD_SCALE: f32 = 4.0;
const SHIELD_SIZE: f32 = 32.0 * SHIELD_SCALE;
const SHIELD_FRAME_TIME: f32 = 0.1;
const SHIELD_FRAMES: u32 = 3;
const BULLET_FRAME_TIME: f32 = 0.08;
const BULLET_FRAMES: u32 = 4;
/// Player sprite sheet is 32 texels wide
const PLAYER_SCALE: f32 = 4.0;

const DEBUG_HITBOX: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const DEBUG_GRAZE: [f32; 4] = [1.0, 1.0, 0.0, 0.5];

/// Number of requests issued by one pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub sprites: usize,
    pub rects: usize,
}

fn entity_frame(entity: &Entity) -> u32 {
    entity.animator.current().map(|a| a.frame()).unwrap_or(0)
}

/// Draw one frame of the play state
pub fn draw_play_state(
    state: &PlayState,
    batch: &mut dyn SpriteBatch,
    debug_hitboxes: bool,
    graze_margin: f32,
) -> DrawStats {
    let mut stats = DrawStats::default();
    let player = &state.player;
    let body = player.body();

    for image in player.afterimages() {
        let frame = player
            .entity
            .animator
            .get(image.facing)
            .map(|a| a.frame())
            .unwrap_or(0);
        batch.draw(
            &DrawRequest::new(player.entity.texture, image.position)
                .frame(frame)
                .scale(PLAYER_SCALE)
                .tint(with_alpha([0.6, 0.8, 1.0, 1.0], image.alpha() * 0.6)),
        );
        stats.sprites += 1;
    }

    for enemy in &state.enemies {
        let e = &enemy.entity;
        let texture = match e.animator.current_key() {
            Some(AnimKey::Death) => e.animator.current().map(|a| a.texture).unwrap_or(e.texture),
            _ => e.texture,
        };
        batch.draw(
            &DrawRequest::new(texture, e.body.position())
                .frame(entity_frame(e))
                .scale(ENTITY_SCALE)
                .rotation(e.body.rotation),
        );
        stats.sprites += 1;
    }

    for bullet in state.bullets.iter() {
        let frame = (bullet.age / BULLET_FRAME_TIME) as u32 % BULLET_FRAMES;
        let dir = bullet.direction();
        batch.draw(
            &DrawRequest::new(state.bullet_texture, bullet.body.position())
                .frame(frame)
                .scale(BULLET_SCALE)
                .tint(energy_tint(bullet.energy))
                .rotation(dir.y.atan2(dir.x)),
        );
        stats.sprites += 1;
    }

    if player.is_visible() {
        let texture = match player.entity.animator.current_key() {
            Some(AnimKey::Death) => player
                .entity
                .animator
                .current()
                .map(|a| a.texture)
                .unwrap_or(player.entity.texture),
            _ => player.entity.texture,
        };
        batch.draw(
            &DrawRequest::new(texture, body.position())
                .frame(entity_frame(&player.entity))
                .scale(PLAYER_SCALE),
        );
        stats.sprites += 1;
    }

    if !player.is_dying() {
        let offset = (body.size() - Vec2::splat(SHIELD_SIZE)) * 0.5;
        let position = body.position() + offset;
        let frame = (state.time / SHIELD_FRAME_TIME) as u32 % SHIELD_FRAMES;
        batch.draw(
            &DrawRequest::new(state.shield_texture, position)
                .frame(frame)
                .scale(SHIELD_SCALE)
                .tint(energy_tint(player.active_shield())),
        );
        stats.sprites += 1;

        // Flash ring pops out and fades
        let flash = player.shield_flash();
        if flash > 0.0 {
            let pop = flash.clamp(0.0, 1.0).sqrt();
            let scale = SHIELD_SCALE * 1.25;
            let grow = Vec2::splat(SHIELD_SIZE * 0.25 * 0.5);
            batch.draw(
                &DrawRequest::new(state.shield_texture, position - grow)
                    .frame(frame)
                    .scale(scale)
                    .tint(WHITE.map(|c| c * pop)),
            );
            stats.sprites += 1;
        }
    }

    if debug_hitboxes {
        if let Some(hitbox) = body.hitbox() {
            batch.draw_rect(hitbox, DEBUG_HITBOX);
            stats.rects += 1;
        }
        for enemy in &state.enemies {
            if let Some(hitbox) = enemy.entity.body.hitbox() {
                batch.draw_rect(hitbox, DEBUG_HITBOX);
                stats.rects += 1;
            }
        }
        for bullet in state.bullets.iter() {
            batch.draw_rect(bullet.hitbox(), DEBUG_HITBOX);
            batch.draw_rect(bullet.graze_rect(graze_margin), DEBUG_GRAZE);
            stats.rects += 2;
        }
    }

    stats
}
