//! Actors: the shared body data plus the component pipeline
//!
//! Absolute position is authoritative. A screen-relative copy is refreshed on
//! every write so a resize can re-derive the absolute position later.

use glam::Vec2;

use super::animation::{AnimKey, Animation, Animator};
use super::component::{EntityComponent, Movement};
use super::geometry::{Rect, ScreenSize};
use super::pattern::FiringFrame;
use crate::consts::{DEATH_DURATION, HITBOX_SHRINK};
use crate::platform::Texture;
use crate::{absolute_to_relative, relative_to_absolute};

/// Position, size, health and death state shared by every actor
#[derive(Debug, Clone)]
pub struct Body {
    position: Vec2,
    relative: Vec2,
    screen: ScreenSize,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub velocity: Vec2,
    max_health: f32,
    health: f32,
    hitbox_shrink: f32,
    dying: bool,
    dead: bool,
    death_timer: f32,
    death_duration: f32,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2, screen: ScreenSize) -> Self {
        Self {
            position,
            relative: absolute_to_relative(position, screen.as_vec2()),
            screen,
            rotation: 0.0,
            width: size.x,
            height: size.y,
            scale: 1.0,
            velocity: Vec2::ZERO,
            max_health: 100.0,
            health: 100.0,
            hitbox_shrink: HITBOX_SHRINK,
            dying: false,
            dead: false,
            death_timer: 0.0,
            death_duration: DEATH_DURATION,
        }
    }

    pub fn with_health(mut self, max_health: f32) -> Self {
        self.set_max_health(max_health);
        self
    }

    pub fn with_hitbox_shrink(mut self, shrink: f32) -> Self {
        self.hitbox_shrink = shrink.clamp(0.0, 0.5);
        self
    }

    pub fn with_death_duration(mut self, duration: f32) -> Self {
        self.death_duration = duration.max(0.0);
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    // --- position ---

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Screen-relative position (0..1 per axis when on screen)
    #[inline]
    pub fn relative_position(&self) -> Vec2 {
        self.relative
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.relative = absolute_to_relative(position, self.screen.as_vec2());
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    /// Re-derive the absolute position for a new screen size
    pub fn on_resize(&mut self, screen: ScreenSize) {
        self.screen = screen;
        self.position = relative_to_absolute(self.relative, screen.as_vec2());
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size() / 2.0
    }

    /// Full sprite bounds
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size())
    }

    /// Shrunk hit rectangle; `None` once dying
    pub fn hitbox(&self) -> Option<Rect> {
        if self.dying {
            return None;
        }
        Some(self.bounds().shrink(self.hitbox_shrink))
    }

    // --- health ---

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Sets the maximum and refills to it
    pub fn set_max_health(&mut self, max_health: f32) {
        self.max_health = max_health.max(0.0);
        self.health = self.max_health;
    }

    pub fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }

    /// Returns true when health is now depleted
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        self.set_health(self.health - amount.max(0.0));
        self.health <= 0.0
    }

    pub fn heal(&mut self, amount: f32) {
        self.set_health(self.health + amount.max(0.0));
    }

    // --- death ---

    #[inline]
    pub fn is_dying(&self) -> bool {
        self.dying
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn death_timer(&self) -> f32 {
        self.death_timer
    }

    /// Enter the death sequence. Returns false if already dying.
    pub fn kill(&mut self) -> bool {
        if self.dying {
            return false;
        }
        self.dying = true;
        self.velocity = Vec2::ZERO;
        self.death_timer = self.death_duration;
        true
    }

    pub fn update_death(&mut self, dt: f32) {
        if !self.dying || self.dead {
            return;
        }
        self.death_timer = (self.death_timer - dt).max(0.0);
        if self.death_timer <= 0.0 {
            self.dead = true;
        }
    }
}

/// A body with behaviour components, an optional movement directive and sprites
#[derive(Debug, Clone)]
pub struct Entity {
    pub body: Body,
    components: Vec<EntityComponent>,
    pub movement: Option<Movement>,
    pub texture: Texture,
    pub animator: Animator,
}

impl Entity {
    pub fn new(body: Body, texture: Texture) -> Self {
        Self {
            body,
            components: Vec::new(),
            movement: None,
            texture,
            animator: Animator::new(),
        }
    }

    /// Register the one-shot death animation (32x32 frames)
    pub fn with_death_animation(mut self, death: Texture) -> Self {
        self.animator
            .add(AnimKey::Death, Animation::new(death, 32, 32, 10, 0.08, false));
        self
    }

    /// Attach a component; it captures the entity's current state first
    pub fn add_component(&mut self, component: impl Into<EntityComponent>) {
        let mut component = component.into();
        component.attach(&self.body);
        self.components.push(component);
    }

    pub fn components(&self) -> &[EntityComponent] {
        &self.components
    }

    pub fn set_movement(&mut self, movement: Movement) {
        self.movement = Some(movement);
    }

    /// Components in attachment order, then the movement directive
    pub fn update(&mut self, dt: f32) {
        self.animator.update(dt);

        if self.body.is_dying() {
            self.body.update_death(dt);
            return;
        }

        for component in &mut self.components {
            component.update(&mut self.body, &mut self.movement, dt);
        }

        if let Some(movement) = &mut self.movement {
            movement.update(&mut self.body, dt);
        }
    }

    /// Enter the death sequence once; later calls are no-ops
    pub fn kill(&mut self) -> bool {
        if !self.body.kill() {
            return false;
        }
        self.components.clear();
        self.animator.play(AnimKey::Death);
        true
    }

    /// True once an attached exit component finished driving the entity away
    pub fn has_exited(&self) -> bool {
        self.components.iter().any(EntityComponent::is_expired)
    }

    /// Live value of the first attached rotation component
    pub fn live_rotation(&self) -> f32 {
        self.components
            .iter()
            .find_map(|c| match c {
                EntityComponent::Rotation(rotation) => Some(rotation.current_rotation()),
                _ => None,
            })
            .unwrap_or(0.0)
    }

    /// Snapshot for bullet patterns: static rotation plus live component rotation
    pub fn firing_frame(&self) -> FiringFrame {
        FiringFrame {
            position: self.body.position(),
            size: self.body.size(),
            rotation: self.body.rotation + self.live_rotation(),
            screen: self.body.screen(),
        }
    }

    pub fn on_resize(&mut self, screen: ScreenSize) {
        self.body.on_resize(screen);
    }
}
