//! Player controller
//!
//! Movement, dash, shooting, shield, graze, ability, regen and the damage
//! flicker are independent timers advanced in a fixed order every frame.

use std::collections::VecDeque;

use glam::Vec2;

use super::animation::{AnimKey, Animation};
use super::bullet::{BulletEnergy, BulletManager, BulletOwner};
use super::entity::{Body, Entity};
use super::geometry::ScreenSize;
use super::pattern::BulletPattern;
use super::shooter::Shooter;
use crate::consts::{PLAYER_BULLET_SPEED, PLAYER_SIZE};
use crate::platform::{Content, InputSnapshot, Texture};
use crate::tuning::Tuning;

/// Sprites the player needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerSprites {
    pub body: Texture,
    pub death: Texture,
}

impl PlayerSprites {
    pub fn load(content: &dyn Content) -> Self {
        Self {
            body: content.texture("player"),
            death: content.texture("death"),
        }
    }
}

/// A fading copy of the player left behind while dashing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Afterimage {
    pub position: Vec2,
    pub facing: AnimKey,
    pub age: f32,
    pub lifetime: f32,
}

impl Afterimage {
    /// 1.0 when fresh, 0.0 when about to vanish
    pub fn alpha(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// What happened during one player update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerUpdate {
    pub bullets_fired: usize,
    pub dash_started: bool,
    pub shield_switched: bool,
    /// Index of the ability tier that was bought this frame
    pub ability_activated: Option<usize>,
    pub ability_expired: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    shooter: Shooter,
    base_pattern: BulletPattern,
    base_cooldown: f32,
    base_damage: f32,
    debug_patterns: Vec<BulletPattern>,
    debug_index: usize,

    shield_cycle: [BulletEnergy; 2],
    shield_index: usize,
    shield_flash: f32,

    graze_bonus: f32,
    grazing: bool,

    dash_cooldown: f32,
    dash_timer: f32,
    dash_direction: Vec2,
    dash_invulnerability: f32,
    drift_timer: f32,
    afterimages: VecDeque<Afterimage>,
    afterimage_timer: f32,

    ability_charge: f32,
    active_tier: Option<usize>,
    ability_timer: f32,

    regen_timer: f32,

    flash_timer: f32,
    flicker_timer: f32,
    flash_invulnerable: bool,
    visible: bool,
}

impl Player {
    pub fn new(
        position: Vec2,
        screen: ScreenSize,
        sprites: PlayerSprites,
        tuning: &Tuning,
    ) -> Self {
        let p = &tuning.player;
        let body = Body::new(position, Vec2::splat(PLAYER_SIZE), screen)
            .with_health(p.max_health)
            .with_hitbox_shrink(p.hitbox_shrink)
            .with_death_duration(p.death_duration);

        let mut entity = Entity::new(body, sprites.body);
        for key in [AnimKey::Idle, AnimKey::Up, AnimKey::Down, AnimKey::Left, AnimKey::Right] {
            entity
                .animator
                .add(key, Animation::new(sprites.body, 32, 32, 4, 0.1, true));
        }
        let entity = entity.with_death_animation(sprites.death);

        let up = Vec2::NEG_Y;
        let base_pattern = BulletPattern::fixed_direction(up, PLAYER_BULLET_SPEED);
        let debug_patterns = vec![
            base_pattern.clone(),
            BulletPattern::three_way(up, 15.0, PLAYER_BULLET_SPEED),
            BulletPattern::spread(up, 5, 10.0, PLAYER_BULLET_SPEED),
            BulletPattern::cardinal(PLAYER_BULLET_SPEED),
        ];

        let shooter = Shooter::new(
            base_pattern.clone(),
            BulletOwner::Player,
            p.fire_cooldown,
            p.fire_damage,
        )
        .with_energy(p.shield_cycle[0]);

        Self {
            entity,
            shooter,
            base_pattern,
            base_cooldown: p.fire_cooldown,
            base_damage: p.fire_damage,
            debug_patterns,
            debug_index: 0,
            shield_cycle: p.shield_cycle,
            shield_index: 0,
            shield_flash: 0.0,
            graze_bonus: 0.0,
            grazing: false,
            dash_cooldown: 0.0,
            dash_timer: 0.0,
            dash_direction: up,
            dash_invulnerability: 0.0,
            drift_timer: 0.0,
            afterimages: VecDeque::with_capacity(tuning.dash.afterimage_capacity),
            afterimage_timer: 0.0,
            ability_charge: 0.0,
            active_tier: None,
            ability_timer: 0.0,
            regen_timer: 0.0,
            flash_timer: 0.0,
            flicker_timer: 0.0,
            flash_invulnerable: false,
            visible: true,
        }
    }

    /// Spawn near the bottom center of the screen
    pub fn spawn(screen: ScreenSize, sprites: PlayerSprites, tuning: &Tuning) -> Self {
        let position = screen.centered_at(0.5, 0.8, Vec2::splat(PLAYER_SIZE));
        Self::new(position, screen, sprites, tuning)
    }

    // --- queries ---

    pub fn body(&self) -> &Body {
        &self.entity.body
    }

    pub fn shooter(&self) -> &Shooter {
        &self.shooter
    }

    pub fn active_shield(&self) -> BulletEnergy {
        self.shield_cycle[self.shield_index]
    }

    /// Remaining shield flash in seconds
    pub fn shield_flash(&self) -> f32 {
        self.shield_flash
    }

    pub fn graze_bonus(&self) -> f32 {
        self.graze_bonus
    }

    pub fn damage_multiplier(&self) -> f32 {
        1.0 + self.graze_bonus
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }

    pub fn dash_cooldown(&self) -> f32 {
        self.dash_cooldown
    }

    pub fn is_invulnerable(&self) -> bool {
        self.dash_invulnerability > 0.0 || self.flash_invulnerable
    }

    pub fn afterimages(&self) -> impl Iterator<Item = &Afterimage> {
        self.afterimages.iter()
    }

    pub fn ability_charge(&self) -> f32 {
        self.ability_charge
    }

    pub fn active_tier(&self) -> Option<usize> {
        self.active_tier
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_dead(&self) -> bool {
        self.entity.body.is_dead()
    }

    pub fn is_dying(&self) -> bool {
        self.entity.body.is_dying()
    }

    // --- collision entry points ---

    /// Near miss this frame; the bonus grows on the next update
    pub fn register_graze(&mut self) {
        self.grazing = true;
    }

    /// A bullet matching the shield was soaked up
    pub fn absorb(&mut self, tuning: &Tuning) {
        self.shield_flash = tuning.player.shield_flash_duration;
        self.add_charge(tuning.ability.absorb_fill_amount, tuning);
    }

    /// Apply damage and start the flash window.
    ///
    /// Returns true only the first time the hit is lethal.
    pub fn take_hit(&mut self, damage: f32, tuning: &Tuning) -> bool {
        if self.entity.body.is_dying() {
            return false;
        }

        self.entity.body.apply_damage(damage);
        self.flash_timer = tuning.player.flash_duration;
        self.flicker_timer = tuning.player.flicker_interval;
        self.flash_invulnerable = true;
        self.visible = false;

        if self.entity.body.health() <= 0.0 {
            let died = self.entity.kill();
            if died {
                self.visible = true;
                self.afterimages.clear();
                log::info!("Player died");
            }
            return died;
        }
        false
    }

    fn add_charge(&mut self, amount: f32, tuning: &Tuning) {
        self.ability_charge = (self.ability_charge + amount).clamp(0.0, tuning.ability.max);
    }

    // --- per-frame update ---

    pub fn update(
        &mut self,
        input: &mut InputSnapshot,
        dt: f32,
        bullets: &mut BulletManager,
        tuning: &Tuning,
    ) -> PlayerUpdate {
        let mut out = PlayerUpdate::default();

        self.entity.update(dt);
        if self.entity.body.is_dying() {
            return out;
        }

        self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        self.dash_invulnerability = (self.dash_invulnerability - dt).max(0.0);
        self.shield_flash = (self.shield_flash - dt).max(0.0);

        out.dash_started = self.update_movement(input, dt, tuning);
        self.update_afterimages(dt, tuning);

        let frame = self.entity.firing_frame();
        let multiplier = self.damage_multiplier();
        out.bullets_fired = self
            .shooter
            .try_shoot(&frame, dt, input.shoot_held, multiplier, bullets);

        self.entity.animator.play(self.facing());

        if input.consume_switch_shield() {
            self.shield_index = (self.shield_index + 1) % self.shield_cycle.len();
            self.shooter.set_energy(self.active_shield());
            out.shield_switched = true;
        }

        if input.consume_switch_pattern() && !self.debug_patterns.is_empty() {
            self.debug_index = (self.debug_index + 1) % self.debug_patterns.len();
            let pattern = self.debug_patterns[self.debug_index].clone();
            log::debug!("Debug pattern switched to {:?}", pattern);
            self.base_pattern = pattern.clone();
            self.shooter.set_pattern(pattern);
        }

        self.update_graze(dt, tuning);
        self.update_ability(input, dt, tuning, &mut out);
        self.update_regen(dt, tuning);
        self.update_flicker(dt, tuning);

        out
    }

    /// Returns true when a dash started this frame
    fn update_movement(&mut self, input: &mut InputSnapshot, dt: f32, tuning: &Tuning) -> bool {
        let m = &tuning.movement;
        let d = &tuning.dash;
        let axis = input.move_axis();

        let mut dash_started = false;
        if input.consume_dash() && self.dash_cooldown <= 0.0 && !self.is_dashing() {
            self.dash_timer = d.duration;
            self.dash_cooldown = d.cooldown;
            self.dash_invulnerability = d.invulnerability;
            self.dash_direction = axis.normalize_or(Vec2::NEG_Y);
            self.afterimage_timer = 0.0;
            dash_started = true;
        }

        let body = &mut self.entity.body;
        let mut dash_ended = false;

        if self.dash_timer > 0.0 {
            body.velocity = self.dash_direction * d.speed;
            self.dash_timer = (self.dash_timer - dt).max(0.0);
            dash_ended = self.dash_timer <= 0.0;
        } else if axis.length_squared() > 0.0 {
            body.velocity += axis * m.acceleration * dt;
            self.drift_timer = m.drift_window;
        } else if self.drift_timer > 0.0 {
            self.drift_timer = (self.drift_timer - dt).max(0.0);
            body.velocity *= m.drift_retention.powf(dt);
        } else if body.velocity.length_squared() > 0.0 {
            let decel = body.velocity.normalize_or_zero() * m.deceleration * dt;
            body.velocity = if decel.length_squared() >= body.velocity.length_squared() {
                Vec2::ZERO
            } else {
                body.velocity - decel
            };
        }

        if self.dash_timer <= 0.0 && !dash_ended {
            body.velocity = body.velocity.clamp_length_max(m.max_speed);
        }

        let max = (body.screen().as_vec2() - body.size()).max(Vec2::ZERO);
        let next = (body.position() + body.velocity * dt).clamp(Vec2::ZERO, max);
        body.set_position(next);

        if dash_ended {
            body.velocity = Vec2::ZERO;
        }

        dash_started
    }

    fn update_afterimages(&mut self, dt: f32, tuning: &Tuning) {
        for image in &mut self.afterimages {
            image.age += dt;
        }
        self.afterimages.retain(|image| image.age < image.lifetime);

        if !self.is_dashing() {
            return;
        }

        self.afterimage_timer -= dt;
        if self.afterimage_timer <= 0.0 {
            self.afterimage_timer += tuning.dash.afterimage_interval;
            let image = Afterimage {
                position: self.entity.body.position(),
                facing: self.facing(),
                age: 0.0,
                lifetime: tuning.dash.afterimage_lifetime,
            };
            if self.afterimages.len() >= tuning.dash.afterimage_capacity {
                self.afterimages.pop_front();
            }
            self.afterimages.push_back(image);
        }
    }

    /// Four facing keys plus idle, chosen by the dominant velocity axis
    pub fn facing(&self) -> AnimKey {
        let v = self.entity.body.velocity;
        if v.length_squared() < 1.0 {
            return AnimKey::Idle;
        }
        if v.x.abs() > v.y.abs() {
            if v.x < 0.0 { AnimKey::Left } else { AnimKey::Right }
        } else if v.y < 0.0 {
            AnimKey::Up
        } else {
            AnimKey::Down
        }
    }

    fn update_graze(&mut self, dt: f32, tuning: &Tuning) {
        let g = &tuning.graze;
        if std::mem::take(&mut self.grazing) {
            self.graze_bonus += g.gain_rate * dt;
        } else {
            self.graze_bonus -= g.decay_rate * dt;
        }
        self.graze_bonus = self.graze_bonus.clamp(0.0, (g.max_multiplier - 1.0).max(0.0));
    }

    fn update_ability(
        &mut self,
        input: &mut InputSnapshot,
        dt: f32,
        tuning: &Tuning,
        out: &mut PlayerUpdate,
    ) {
        let a = &tuning.ability;

        if self.active_tier.is_some() {
            self.ability_timer = (self.ability_timer - dt).max(0.0);
            if self.ability_timer <= 0.0 {
                self.active_tier = None;
                self.shooter.configure(
                    self.base_pattern.clone(),
                    self.base_cooldown,
                    self.base_damage,
                );
                out.ability_expired = true;
            }
        } else if !input.shoot_held {
            self.add_charge(a.fill_rate * dt, tuning);
        }

        if !input.consume_ability() || self.active_tier.is_some() {
            return;
        }

        let affordable = a
            .tiers
            .iter()
            .enumerate()
            .rev()
            .find(|(_, tier)| tier.cost <= self.ability_charge);

        if let Some((index, tier)) = affordable {
            self.ability_charge = (self.ability_charge - tier.cost).max(0.0);
            self.shooter
                .configure(tier.pattern.clone(), tier.cooldown, tier.damage);
            self.ability_timer = tier.duration;
            self.active_tier = Some(index);
            out.ability_activated = Some(index);
            log::debug!("Ability tier {} active for {}s", index, tier.duration);
        }
    }

    fn update_regen(&mut self, dt: f32, tuning: &Tuning) {
        let body = &mut self.entity.body;
        if body.health() >= body.max_health() {
            self.regen_timer = 0.0;
            return;
        }

        self.regen_timer += dt;
        if self.regen_timer >= tuning.player.regen_delay {
            body.heal(1.0);
            self.regen_timer = 0.0;
        }
    }

    fn update_flicker(&mut self, dt: f32, tuning: &Tuning) {
        if self.flash_timer <= 0.0 {
            return;
        }

        self.flash_timer = (self.flash_timer - dt).max(0.0);
        self.flicker_timer -= dt;
        if self.flicker_timer <= 0.0 {
            self.visible = !self.visible;
            self.flicker_timer += tuning.player.flicker_interval;
        }

        if self.flash_timer <= 0.0 {
            self.flash_invulnerable = false;
            self.visible = true;
        }
    }

    pub fn on_resize(&mut self, screen: ScreenSize) {
        self.entity.on_resize(screen);
        self.afterimages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn player(tuning: &Tuning) -> Player {
        Player::new(
            Vec2::new(700.0, 600.0),
            ScreenSize::default(),
            PlayerSprites::default(),
            tuning,
        )
    }

    fn step(p: &mut Player, input: &mut InputSnapshot, tuning: &Tuning) -> PlayerUpdate {
        let mut bullets = BulletManager::new();
        p.update(input, DT, &mut bullets, tuning)
    }

    #[test]
    fn test_acceleration_capped_at_max_speed() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let mut input = InputSnapshot::new().with_move(Vec2::X);
        for _ in 0..120 {
            step(&mut p, &mut input, &tuning);
        }
        let speed = p.body().velocity.length();
        assert!((speed - tuning.movement.max_speed).abs() < 1e-2);
        assert_eq!(p.facing(), AnimKey::Right);
    }

    #[test]
    fn test_release_drifts_then_stops() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let mut input = InputSnapshot::new().with_move(Vec2::NEG_Y);
        for _ in 0..30 {
            step(&mut p, &mut input, &tuning);
        }
        let held = p.body().velocity.length();

        let mut idle = InputSnapshot::new();
        step(&mut p, &mut idle, &tuning);
        let drifting = p.body().velocity.length();
        assert!(drifting < held);
        assert!(drifting > 0.0);

        for _ in 0..60 {
            step(&mut p, &mut idle, &tuning);
        }
        assert_eq!(p.body().velocity, Vec2::ZERO);
        assert_eq!(p.facing(), AnimKey::Idle);
    }

    #[test]
    fn test_position_clamped_to_screen() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let mut input = InputSnapshot::new().with_move(Vec2::NEG_X);
        for _ in 0..240 {
            step(&mut p, &mut input, &tuning);
        }
        assert_eq!(p.body().position().x, 0.0);
    }

    #[test]
    fn test_dash_burst_and_invulnerability() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let start = p.body().position();

        let mut input = InputSnapshot::new().with_dash();
        let out = step(&mut p, &mut input, &tuning);
        assert!(out.dash_started);
        assert!(p.is_dashing());
        assert!(p.is_invulnerable());
        assert!(p.body().position().y < start.y);

        // Cooldown blocks a second dash
        let mut again = InputSnapshot::new().with_dash();
        assert!(!step(&mut p, &mut again, &tuning).dash_started);

        let mut idle = InputSnapshot::new();
        for _ in 0..10 {
            step(&mut p, &mut idle, &tuning);
        }
        assert!(!p.is_dashing());
        assert_eq!(p.body().velocity, Vec2::ZERO);

        for _ in 0..10 {
            step(&mut p, &mut idle, &tuning);
        }
        assert!(!p.is_invulnerable());
    }

    #[test]
    fn test_afterimages_bounded() {
        let mut tuning = Tuning::default();
        tuning.dash.duration = 0.5;
        tuning.dash.afterimage_interval = 0.0;
        tuning.dash.afterimage_lifetime = 10.0;
        tuning.dash.afterimage_capacity = 4;
        let mut p = player(&tuning);

        let mut input = InputSnapshot::new().with_dash();
        step(&mut p, &mut input, &tuning);
        for _ in 0..20 {
            step(&mut p, &mut InputSnapshot::new(), &tuning);
        }
        assert_eq!(p.afterimages().count(), 4);
    }

    #[test]
    fn test_afterimages_expire() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        step(&mut p, &mut InputSnapshot::new().with_dash(), &tuning);
        assert!(p.afterimages().count() > 0);
        for _ in 0..60 {
            step(&mut p, &mut InputSnapshot::new(), &tuning);
        }
        assert_eq!(p.afterimages().count(), 0);
    }

    #[test]
    fn test_shoots_with_graze_multiplier() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let mut bullets = BulletManager::new();

        p.register_graze();
        let mut idle = InputSnapshot::new();
        p.update(&mut idle, 0.5, &mut bullets, &tuning);
        let multiplier = p.damage_multiplier();
        assert!(multiplier > 1.0);

        let mut fire = InputSnapshot::new().with_shoot(true);
        let out = p.update(&mut fire, 0.0, &mut bullets, &tuning);
        assert_eq!(out.bullets_fired, 1);
        let dmg = bullets.get(0).map(|b| b.damage).unwrap_or_default();
        assert!((dmg - tuning.player.fire_damage * multiplier).abs() < 1e-4);
        assert_eq!(bullets.get(0).map(|b| b.owner), Some(BulletOwner::Player));
    }

    #[test]
    fn test_graze_bonus_clamped() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        for _ in 0..600 {
            p.register_graze();
            step(&mut p, &mut InputSnapshot::new(), &tuning);
        }
        assert!((p.graze_bonus() - (tuning.graze.max_multiplier - 1.0)).abs() < 1e-5);
        for _ in 0..600 {
            step(&mut p, &mut InputSnapshot::new(), &tuning);
        }
        assert_eq!(p.graze_bonus(), 0.0);
        assert_eq!(p.damage_multiplier(), 1.0);
    }

    #[test]
    fn test_shield_cycle() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        assert_eq!(p.active_shield(), BulletEnergy::Red);
        let out = step(&mut p, &mut InputSnapshot::new().with_switch_shield(), &tuning);
        assert!(out.shield_switched);
        assert_eq!(p.active_shield(), BulletEnergy::Blue);
        step(&mut p, &mut InputSnapshot::new().with_switch_shield(), &tuning);
        assert_eq!(p.active_shield(), BulletEnergy::Red);
    }

    #[test]
    fn test_ability_buys_highest_affordable_tier() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        p.ability_charge = 70.0;

        let out = step(&mut p, &mut InputSnapshot::new().with_ability(), &tuning);
        assert_eq!(out.ability_activated, Some(1));
        let expected = 70.0 + tuning.ability.fill_rate * DT - tuning.ability.tiers[1].cost;
        assert!((p.ability_charge() - expected).abs() < 1e-3);
        assert_eq!(p.shooter().pattern(), &tuning.ability.tiers[1].pattern);

        // No passive fill while the upgrade runs
        let before = p.ability_charge();
        step(&mut p, &mut InputSnapshot::new(), &tuning);
        assert_eq!(p.ability_charge(), before);
    }

    #[test]
    fn test_ability_expiry_restores_base_pattern() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let base = p.shooter().pattern().clone();
        p.ability_charge = 40.0;
        step(&mut p, &mut InputSnapshot::new().with_ability(), &tuning);
        assert_eq!(p.active_tier(), Some(0));

        let mut bullets = BulletManager::new();
        let out = p.update(
            &mut InputSnapshot::new(),
            tuning.ability.tiers[0].duration,
            &mut bullets,
            &tuning,
        );
        assert!(out.ability_expired);
        assert_eq!(p.active_tier(), None);
        assert_eq!(p.shooter().pattern(), &base);
        assert_eq!(p.shooter().cooldown(), tuning.player.fire_cooldown);
    }

    #[test]
    fn test_ability_unaffordable_does_nothing() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let out = step(&mut p, &mut InputSnapshot::new().with_ability(), &tuning);
        assert_eq!(out.ability_activated, None);
    }

    #[test]
    fn test_absorb_fills_bar() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        p.absorb(&tuning);
        assert_eq!(p.ability_charge(), tuning.ability.absorb_fill_amount);
        assert_eq!(p.shield_flash(), tuning.player.shield_flash_duration);
    }

    #[test]
    fn test_regen_one_point_per_delay() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        p.take_hit(2.0, &tuning);
        let mut bullets = BulletManager::new();
        let delay = tuning.player.regen_delay;

        p.update(&mut InputSnapshot::new(), delay / 2.0, &mut bullets, &tuning);
        assert_eq!(p.body().health(), tuning.player.max_health - 2.0);
        p.update(&mut InputSnapshot::new(), delay / 2.0, &mut bullets, &tuning);
        assert_eq!(p.body().health(), tuning.player.max_health - 1.0);
        p.update(&mut InputSnapshot::new(), delay, &mut bullets, &tuning);
        assert_eq!(p.body().health(), tuning.player.max_health);
        p.update(&mut InputSnapshot::new(), delay, &mut bullets, &tuning);
        assert_eq!(p.body().health(), tuning.player.max_health);
    }

    #[test]
    fn test_flash_window_flickers_then_clears() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        p.take_hit(1.0, &tuning);
        assert!(p.is_invulnerable());

        let mut toggles = 0;
        let mut last = p.is_visible();
        for _ in 0..50 {
            step(&mut p, &mut InputSnapshot::new(), &tuning);
            if p.is_visible() != last {
                toggles += 1;
                last = p.is_visible();
            }
        }
        assert!(toggles >= 2);

        for _ in 0..30 {
            step(&mut p, &mut InputSnapshot::new(), &tuning);
        }
        assert!(!p.is_invulnerable());
        assert!(p.is_visible());
    }

    #[test]
    fn test_invulnerable_until_both_sources_clear() {
        let mut tuning = Tuning::default();
        tuning.dash.invulnerability = 0.5;
        tuning.player.flash_duration = 0.1;
        let mut p = player(&tuning);

        step(&mut p, &mut InputSnapshot::new().with_dash(), &tuning);
        p.take_hit(1.0, &tuning);
        let mut bullets = BulletManager::new();
        p.update(&mut InputSnapshot::new(), 0.2, &mut bullets, &tuning);
        // Flash window closed, dash window still open
        assert!(p.is_invulnerable());
        p.update(&mut InputSnapshot::new(), 0.4, &mut bullets, &tuning);
        assert!(!p.is_invulnerable());
    }

    #[test]
    fn test_lethal_hit_reports_death_once() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        assert!(!p.take_hit(tuning.player.max_health - 1.0, &tuning));
        assert!(p.take_hit(5.0, &tuning));
        assert!(!p.take_hit(5.0, &tuning));
        assert!(p.is_dying());
        assert_eq!(p.body().health(), 0.0);
    }

    #[test]
    fn test_debug_pattern_cycle() {
        let tuning = Tuning::default();
        let mut p = player(&tuning);
        let first = p.shooter().pattern().clone();
        step(&mut p, &mut InputSnapshot::new().with_switch_pattern(), &tuning);
        assert_ne!(p.shooter().pattern(), &first);
    }
}
