//! Per-frame input snapshot
//!
//! The host fills one of these each frame from its keyboard/gamepad polling.
//! Held state is peeked freely; presses are consumed so a single press can
//! never trigger two actions.

use glam::Vec2;

#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    move_axis: Vec2,
    pub shoot_held: bool,
    dash_pressed: bool,
    switch_shield_pressed: bool,
    switch_pattern_pressed: bool,
    ability_pressed: bool,
    pause_pressed: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Movement axis, magnitude never above 1
    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    /// Set the movement axis; longer vectors are normalized
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.move_axis = if axis.length_squared() > 1.0 {
            axis.normalize_or_zero()
        } else {
            axis
        };
    }

    pub fn press_dash(&mut self) {
        self.dash_pressed = true;
    }

    pub fn press_switch_shield(&mut self) {
        self.switch_shield_pressed = true;
    }

    pub fn press_switch_pattern(&mut self) {
        self.switch_pattern_pressed = true;
    }

    pub fn press_ability(&mut self) {
        self.ability_pressed = true;
    }

    pub fn press_pause(&mut self) {
        self.pause_pressed = true;
    }

    pub fn consume_dash(&mut self) -> bool {
        std::mem::take(&mut self.dash_pressed)
    }

    pub fn consume_switch_shield(&mut self) -> bool {
        std::mem::take(&mut self.switch_shield_pressed)
    }

    pub fn consume_switch_pattern(&mut self) -> bool {
        std::mem::take(&mut self.switch_pattern_pressed)
    }

    pub fn consume_ability(&mut self) -> bool {
        std::mem::take(&mut self.ability_pressed)
    }

    pub fn consume_pause(&mut self) -> bool {
        std::mem::take(&mut self.pause_pressed)
    }

    // Builder helpers for scripted input

    pub fn with_move(mut self, axis: Vec2) -> Self {
        self.set_move_axis(axis);
        self
    }

    pub fn with_shoot(mut self, held: bool) -> Self {
        self.shoot_held = held;
        self
    }

    pub fn with_dash(mut self) -> Self {
        self.press_dash();
        self
    }

    pub fn with_ability(mut self) -> Self {
        self.press_ability();
        self
    }

    pub fn with_switch_shield(mut self) -> Self {
        self.press_switch_shield();
        self
    }

    pub fn with_switch_pattern(mut self) -> Self {
        self.press_switch_pattern();
        self
    }

    pub fn with_pause(mut self) -> Self {
        self.press_pause();
        self
    }
}
