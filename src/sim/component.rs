//! Per-frame behaviours attached to entities
//!
//! Components run in attachment order every frame the owning entity is alive.
//! They mutate the body's rotation or position and may report completion.

use glam::Vec2;

use super::entity::Body;

/// Linear movement for a fixed duration
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    direction: Vec2,
    speed: f32,
    duration: f32,
    elapsed: f32,
}

impl Movement {
    pub fn new(direction: Vec2, speed: f32, duration: f32) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            speed,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn update(&mut self, body: &mut Body, dt: f32) {
        if self.is_finished() {
            return;
        }
        self.elapsed += dt;
        body.translate(self.direction * self.speed * dt);
    }
}

/// Interpolates rotation by `delta` over `duration`, then holds for `pause_after`
#[derive(Debug, Clone, PartialEq)]
pub struct Rotation {
    delta: f32,
    duration: f32,
    pause_after: f32,
    looping: bool,
    elapsed: f32,
    start: f32,
    finished: bool,
}

impl Rotation {
    pub fn new(delta: f32, duration: f32, pause_after: f32, looping: bool) -> Self {
        Self {
            delta,
            duration: duration.max(0.0),
            pause_after: pause_after.max(0.0),
            looping,
            elapsed: 0.0,
            start: 0.0,
            finished: false,
        }
    }

    pub fn attach(&mut self, body: &Body) {
        self.start = body.rotation;
        self.elapsed = 0.0;
        self.finished = false;
    }

    pub fn is_finished(&self) -> bool {
        self.finished && !self.looping
    }

    fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        }
    }

    pub fn current_rotation(&self) -> f32 {
        if self.is_finished() {
            return self.start + self.delta;
        }
        self.start + self.delta * self.progress()
    }

    pub fn update(&mut self, body: &mut Body, dt: f32) {
        if self.is_finished() {
            return;
        }

        self.elapsed += dt;

        if self.elapsed <= self.duration {
            body.rotation = self.start + self.delta * self.progress();
        } else if self.elapsed <= self.duration + self.pause_after {
            body.rotation = self.start + self.delta;
        } else if self.looping {
            body.rotation = self.start + self.delta;
            self.start = body.rotation;
            self.elapsed = 0.0;
        } else {
            body.rotation = self.start + self.delta;
            self.finished = true;
        }
    }
}

/// Immutable template for one step of a [`RotationSequence`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep {
    pub delta: f32,
    pub duration: f32,
    pub pause_after: f32,
}

impl RotationStep {
    pub fn new(delta: f32, duration: f32, pause_after: f32) -> Self {
        Self {
            delta,
            duration,
            pause_after,
        }
    }

    fn start(&self, body: &Body) -> Rotation {
        let mut rotation = Rotation::new(self.delta, self.duration, self.pause_after, false);
        rotation.attach(body);
        rotation
    }
}

/// Plays rotation steps in order; loops back to step 0 or goes idle
#[derive(Debug, Clone, PartialEq)]
pub struct RotationSequence {
    steps: Vec<RotationStep>,
    looping: bool,
    index: usize,
    current: Option<Rotation>,
}

impl RotationSequence {
    pub fn new(looping: bool, steps: Vec<RotationStep>) -> Self {
        Self {
            steps,
            looping,
            index: 0,
            current: None,
        }
    }

    pub fn attach(&mut self, body: &Body) {
        self.restart(body);
    }

    fn restart(&mut self, body: &Body) {
        self.index = 0;
        self.current = self.steps.first().map(|step| step.start(body));
    }

    /// Index of the step currently playing
    pub fn step_index(&self) -> Option<usize> {
        self.current.as_ref().map(|_| self.index)
    }

    pub fn is_finished(&self) -> bool {
        !self.looping && self.current.is_none()
    }

    pub fn update(&mut self, body: &mut Body, dt: f32) {
        let Some(current) = &mut self.current else {
            return;
        };

        current.update(body, dt);
        if !current.is_finished() {
            return;
        }

        self.index += 1;
        if let Some(step) = self.steps.get(self.index) {
            self.current = Some(step.start(body));
        } else if self.looping {
            self.restart(body);
        } else {
            self.current = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitState {
    Waiting,
    Moving,
    Done,
}

/// Waits, installs a timed exit movement, then reports expiry
#[derive(Debug, Clone, PartialEq)]
pub struct TimedExit {
    wait_time: f32,
    direction: Vec2,
    speed: f32,
    move_duration: f32,
    timer: f32,
    move_timer: f32,
    state: ExitState,
}

impl TimedExit {
    pub fn new(wait_time: f32, direction: Vec2, speed: f32, move_duration: f32) -> Self {
        Self {
            wait_time,
            direction: direction.normalize_or_zero(),
            speed,
            move_duration,
            timer: 0.0,
            move_timer: 0.0,
            state: ExitState::Waiting,
        }
    }

    pub fn attach(&mut self) {
        self.timer = 0.0;
        self.move_timer = 0.0;
        self.state = ExitState::Waiting;
    }

    pub fn is_expired(&self) -> bool {
        self.state == ExitState::Done
    }

    pub fn is_moving(&self) -> bool {
        self.state == ExitState::Moving
    }

    pub fn update(&mut self, movement: &mut Option<Movement>, dt: f32) {
        match self.state {
            ExitState::Waiting => {
                self.timer += dt;
                if self.timer >= self.wait_time {
                    *movement = Some(Movement::new(self.direction, self.speed, self.move_duration));
                    self.state = ExitState::Moving;
                }
            }
            ExitState::Moving => {
                self.move_timer += dt;
                if self.move_timer >= self.move_duration {
                    self.state = ExitState::Done;
                }
            }
            ExitState::Done => {}
        }
    }
}

/// Behaviours an entity can carry
#[derive(Debug, Clone, PartialEq)]
pub enum EntityComponent {
    Rotation(Rotation),
    RotationSequence(RotationSequence),
    TimedExit(TimedExit),
    Movement(Movement),
}

impl EntityComponent {
    pub fn attach(&mut self, body: &Body) {
        match self {
            EntityComponent::Rotation(r) => r.attach(body),
            EntityComponent::RotationSequence(s) => s.attach(body),
            EntityComponent::TimedExit(e) => e.attach(),
            EntityComponent::Movement(_) => {}
        }
    }

    pub fn update(&mut self, body: &mut Body, movement: &mut Option<Movement>, dt: f32) {
        match self {
            EntityComponent::Rotation(r) => r.update(body, dt),
            EntityComponent::RotationSequence(s) => s.update(body, dt),
            EntityComponent::TimedExit(e) => e.update(movement, dt),
            EntityComponent::Movement(m) => m.update(body, dt),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            EntityComponent::Rotation(r) => r.is_finished(),
            EntityComponent::RotationSequence(s) => s.is_finished(),
            EntityComponent::TimedExit(e) => e.is_expired(),
            EntityComponent::Movement(m) => m.is_finished(),
        }
    }

    /// Removal signal for the play state
    pub fn is_expired(&self) -> bool {
        matches!(self, EntityComponent::TimedExit(e) if e.is_expired())
    }
}

impl From<Rotation> for EntityComponent {
    fn from(value: Rotation) -> Self {
        EntityComponent::Rotation(value)
    }
}

impl From<RotationSequence> for EntityComponent {
    fn from(value: RotationSequence) -> Self {
        EntityComponent::RotationSequence(value)
    }
}

impl From<TimedExit> for EntityComponent {
    fn from(value: TimedExit) -> Self {
        EntityComponent::TimedExit(value)
    }
}

impl From<Movement> for EntityComponent {
    fn from(value: Movement) -> Self {
        EntityComponent::Movement(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::ScreenSize;
    use std::f32::consts::FRAC_PI_2;

    fn body() -> Body {
        Body::new(Vec2::ZERO, Vec2::splat(10.0), ScreenSize::new(100.0, 100.0))
    }

    #[test]
    fn test_movement_stops_after_duration() {
        let mut b = body();
        let mut m = Movement::new(Vec2::new(2.0, 0.0), 100.0, 0.5);
        m.update(&mut b, 0.25);
        m.update(&mut b, 0.25);
        assert!(m.is_finished());
        m.update(&mut b, 0.25);
        assert!((b.position().x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_interpolates_then_finishes() {
        let mut b = body();
        let mut r = Rotation::new(1.0, 1.0, 0.5, false);
        r.attach(&b);

        r.update(&mut b, 0.5);
        assert!((b.rotation - 0.5).abs() < 1e-6);
        r.update(&mut b, 0.75);
        assert!((b.rotation - 1.0).abs() < 1e-6);
        assert!(!r.is_finished());
        r.update(&mut b, 0.5);
        assert!(r.is_finished());
        assert!((r.current_rotation() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_loop_restarts_from_current() {
        let mut b = body();
        let mut r = Rotation::new(1.0, 1.0, 0.0, true);
        r.attach(&b);
        r.update(&mut b, 1.0);
        r.update(&mut b, 0.1); // past the end: loop
        assert!((b.rotation - 1.0).abs() < 1e-6);
        r.update(&mut b, 0.5);
        assert!((b.rotation - 1.5).abs() < 1e-6);
        assert!(!r.is_finished());
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut b = body();
        let mut r = Rotation::new(FRAC_PI_2, 0.0, 1.0, false);
        r.attach(&b);
        r.update(&mut b, 0.016);
        assert!((b.rotation - FRAC_PI_2).abs() < 1e-6);
        assert!(r.current_rotation().is_finite());
    }

    #[test]
    fn test_sequence_advances_and_loops() {
        let mut b = body();
        let mut seq = RotationSequence::new(
            true,
            vec![RotationStep::new(1.0, 0.0, 0.5), RotationStep::new(2.0, 0.0, 0.5)],
        );
        seq.attach(&b);
        assert_eq!(seq.step_index(), Some(0));

        seq.update(&mut b, 0.25);
        assert!((b.rotation - 1.0).abs() < 1e-6);
        seq.update(&mut b, 0.5); // step 0 done
        assert_eq!(seq.step_index(), Some(1));

        seq.update(&mut b, 0.25);
        assert!((b.rotation - 3.0).abs() < 1e-6);
        seq.update(&mut b, 0.5); // step 1 done, loop to 0
        assert_eq!(seq.step_index(), Some(0));

        seq.update(&mut b, 0.25);
        assert!((b.rotation - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_sequence_without_loop_goes_idle() {
        let mut b = body();
        let mut seq = RotationSequence::new(false, vec![RotationStep::new(1.0, 0.0, 0.1)]);
        seq.attach(&b);
        seq.update(&mut b, 0.05);
        seq.update(&mut b, 0.1);
        assert!(seq.is_finished());
        seq.update(&mut b, 1.0);
        assert!((b.rotation - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_sequence_is_idle() {
        let b = body();
        let mut seq = RotationSequence::new(true, Vec::new());
        seq.attach(&b);
        assert_eq!(seq.step_index(), None);
    }

    #[test]
    fn test_timed_exit_states() {
        let mut movement = None;
        let mut exit = TimedExit::new(1.0, Vec2::NEG_Y, 200.0, 0.5);
        exit.update(&mut movement, 0.5);
        assert!(movement.is_none());
        exit.update(&mut movement, 0.5);
        assert!(exit.is_moving());
        assert_eq!(movement.as_ref().map(Movement::direction), Some(Vec2::NEG_Y));

        exit.update(&mut movement, 0.4);
        assert!(!exit.is_expired());
        exit.update(&mut movement, 0.1);
        assert!(exit.is_expired());
    }
}
