//! Sprite-sheet animation bookkeeping
//!
//! Only frame indices are tracked here; the renderer turns `(texture, frame)`
//! into pixels.

use std::collections::BTreeMap;

use crate::platform::Texture;

/// Named animation slots used across entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimKey {
    Idle,
    Up,
    Down,
    Left,
    Right,
    Travel,
    Death,
}

/// A strip of frames advanced on a fixed frame time
#[derive(Debug, Clone)]
pub struct Animation {
    pub texture: Texture,
    pub frame_width: u32,
    pub frame_height: u32,
    frame_count: u32,
    frame_time: f32,
    time_left: f32,
    frame: u32,
    looping: bool,
}

impl Animation {
    /// `frame_count` is capped to what the texture actually holds
    pub fn new(
        texture: Texture,
        frame_width: u32,
        frame_height: u32,
        frame_count: u32,
        frame_time: f32,
        looping: bool,
    ) -> Self {
        let frame_count = frame_count.min(texture.frame_rows(frame_height)).max(1);
        Self {
            texture,
            frame_width,
            frame_height,
            frame_count,
            frame_time,
            time_left: frame_time,
            frame: 0,
            looping,
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.time_left = self.frame_time;
    }

    pub fn update(&mut self, dt: f32) {
        if self.frame_time <= 0.0 || self.is_finished() {
            return;
        }
        self.time_left -= dt;
        while self.time_left <= 0.0 {
            self.time_left += self.frame_time;
            if self.frame + 1 < self.frame_count {
                self.frame += 1;
            } else if self.looping {
                self.frame = 0;
            } else {
                self.time_left = 0.0;
                break;
            }
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Non-looping animation sitting on its last frame
    pub fn is_finished(&self) -> bool {
        !self.looping && self.frame + 1 >= self.frame_count && self.time_left <= 0.0
    }

    /// Total play time of one pass
    pub fn length(&self) -> f32 {
        self.frame_time * self.frame_count as f32
    }
}

/// Keyed set of animations with one active at a time
#[derive(Debug, Clone, Default)]
pub struct Animator {
    animations: BTreeMap<AnimKey, Animation>,
    current: Option<AnimKey>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first animation added becomes current
    pub fn add(&mut self, key: AnimKey, animation: Animation) {
        self.animations.insert(key, animation);
        if self.current.is_none() {
            self.current = Some(key);
        }
    }

    /// Switch to `key`, restarting it only if it was not already playing
    pub fn play(&mut self, key: AnimKey) {
        if self.current == Some(key) || !self.animations.contains_key(&key) {
            return;
        }
        if let Some(anim) = self.animations.get_mut(&key) {
            anim.reset();
        }
        self.current = Some(key);
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(anim) = self.current.and_then(|k| self.animations.get_mut(&k)) {
            anim.update(dt);
        }
    }

    pub fn current_key(&self) -> Option<AnimKey> {
        self.current
    }

    pub fn current(&self) -> Option<&Animation> {
        self.current.and_then(|k| self.animations.get(&k))
    }

    pub fn get(&self, key: AnimKey) -> Option<&Animation> {
        self.animations.get(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::TextureId;

    fn sheet(frames: u32) -> Texture {
        Texture {
            id: TextureId(1),
            width: 16,
            height: 16 * frames,
        }
    }

    #[test]
    fn test_looping_wraps() {
        let mut anim = Animation::new(sheet(4), 16, 16, 4, 0.1, true);
        for _ in 0..4 {
            anim.update(0.1);
        }
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn test_one_shot_holds_last_frame() {
        let mut anim = Animation::new(sheet(3), 16, 16, 3, 0.1, false);
        anim.update(1.0);
        assert_eq!(anim.frame(), 2);
        assert!(anim.is_finished());
    }

    #[test]
    fn test_frame_count_capped_by_texture() {
        let anim = Animation::new(sheet(2), 16, 16, 10, 0.1, true);
        assert_eq!(anim.frame_count(), 2);
    }

    #[test]
    fn test_animator_play_keeps_running_animation() {
        let mut animator = Animator::new();
        animator.add(AnimKey::Idle, Animation::new(sheet(4), 16, 16, 4, 0.1, true));
        animator.add(AnimKey::Up, Animation::new(sheet(4), 16, 16, 4, 0.1, true));
        assert_eq!(animator.current_key(), Some(AnimKey::Idle));

        animator.update(0.1);
        animator.play(AnimKey::Idle);
        assert_eq!(animator.current().map(|a| a.frame()), Some(1));

        animator.play(AnimKey::Up);
        assert_eq!(animator.current_key(), Some(AnimKey::Up));
        assert_eq!(animator.current().map(|a| a.frame()), Some(0));

        // Unknown keys are ignored
        animator.play(AnimKey::Death);
        assert_eq!(animator.current_key(), Some(AnimKey::Up));
    }
}
