//! Stage timelines
//!
//! A stage is a list of one-shot events sorted by trigger time. The composer
//! owns a clock and fires every due event exactly once, in order.

use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;

use glam::Vec2;

use super::bullet::BulletEnergy;
use super::component::{Movement, Rotation, RotationSequence, RotationStep, TimedExit};
use super::enemy::{Enemy, EnemyKind, EnemySprites};
use super::geometry::ScreenSize;
use crate::consts::{ENEMY_FRAME, ENTITY_SCALE};

/// Builds an enemy for the screen size current at spawn time
pub type EnemyFactory = Box<dyn Fn(ScreenSize) -> Enemy>;

pub enum StageAction {
    SpawnEnemy(EnemyFactory),
}

impl fmt::Debug for StageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageAction::SpawnEnemy(_) => f.write_str("SpawnEnemy(..)"),
        }
    }
}

#[derive(Debug)]
pub struct StageEvent {
    pub trigger_time: f32,
    pub action: StageAction,
}

impl StageEvent {
    pub fn spawn(trigger_time: f32, factory: impl Fn(ScreenSize) -> Enemy + 'static) -> Self {
        Self {
            trigger_time,
            action: StageAction::SpawnEnemy(Box::new(factory)),
        }
    }

    fn execute(&self, screen: ScreenSize, roster: &mut Vec<Enemy>) {
        match &self.action {
            StageAction::SpawnEnemy(factory) => {
                let enemy = factory(screen);
                log::debug!(
                    "t={:.2} spawn {:?} at {:?}",
                    self.trigger_time,
                    enemy.kind(),
                    enemy.entity.body.position()
                );
                roster.push(enemy);
            }
        }
    }
}

/// Time-ordered one-shot event scheduler
#[derive(Debug)]
pub struct StageComposer {
    events: Vec<StageEvent>,
    time: f32,
    next: usize,
}

impl StageComposer {
    /// Events with equal trigger times keep their given order
    pub fn new(mut events: Vec<StageEvent>) -> Self {
        events.sort_by(|a, b| a.trigger_time.total_cmp(&b.trigger_time));
        Self {
            events,
            time: 0.0,
            next: 0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events not yet fired
    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.events.len()
    }

    /// Advance the clock and run every event now due. Returns how many fired.
    pub fn update(&mut self, dt: f32, screen: ScreenSize, roster: &mut Vec<Enemy>) -> usize {
        self.time += dt.max(0.0);

        let mut fired = 0;
        while let Some(event) = self.events.get(self.next) {
            if event.trigger_time > self.time {
                break;
            }
            event.execute(screen, roster);
            self.next += 1;
            fired += 1;
        }
        fired
    }
}

/// Built-in stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageId {
    One,
    Two,
    Three,
}

impl StageId {
    pub const ALL: [StageId; 3] = [StageId::One, StageId::Two, StageId::Three];

    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(StageId::One),
            2 => Some(StageId::Two),
            3 => Some(StageId::Three),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            StageId::One => 1,
            StageId::Two => 2,
            StageId::Three => 3,
        }
    }

    pub fn build(self, sprites: EnemySprites) -> StageComposer {
        match self {
            StageId::One => stage_one(sprites),
            StageId::Two => stage_two(sprites),
            StageId::Three => stage_three(sprites),
        }
    }
}

fn enemy_size() -> Vec2 {
    Vec2::splat(ENEMY_FRAME * ENTITY_SCALE)
}

/// Fly in from above, hover, leave upward
fn descend_and_exit(enemy: &mut Enemy) {
    enemy.entity.set_movement(Movement::new(Vec2::Y, 100.0, 2.0));
    enemy
        .entity
        .add_component(TimedExit::new(8.0, Vec2::NEG_Y, 250.0, 3.0));
}

fn quarter_turn_sequence() -> RotationSequence {
    RotationSequence::new(true, vec![RotationStep::new(FRAC_PI_2, 0.0, 1.0)])
}

/// Weaving pair plus a spinner dashing in from both edges
pub fn stage_one(sprites: EnemySprites) -> StageComposer {
    StageComposer::new(vec![
        StageEvent::spawn(0.0, move |screen| {
            let pos = screen.centered_at(0.666, -0.2, enemy_size());
            let mut enemy = Enemy::new(EnemyKind::CardinalSeparatorWeave, pos, screen, sprites)
                .with_energy(BulletEnergy::Green);
            enemy.entity.set_movement(Movement::new(Vec2::Y, 1500.0, 0.3));
            enemy
                .entity
                .add_component(TimedExit::new(15.0, Vec2::NEG_Y, 1000.0, 0.5));
            enemy
        }),
        StageEvent::spawn(0.0, move |screen| {
            let pos = screen.centered_at(0.333, 1.2, enemy_size());
            let mut enemy = Enemy::new(EnemyKind::CardinalSeparatorWeave, pos, screen, sprites)
                .with_energy(BulletEnergy::Green);
            enemy.entity.set_movement(Movement::new(Vec2::NEG_Y, 1500.0, 0.3));
            enemy
                .entity
                .add_component(TimedExit::new(15.0, Vec2::Y, 1000.0, 0.5));
            enemy
        }),
        StageEvent::spawn(0.0, move |screen| {
            let pos = screen.centered_at(0.5, 1.2, enemy_size());
            let mut enemy = Enemy::new(EnemyKind::CardinalSpinnerSpread, pos, screen, sprites)
                .with_energy(BulletEnergy::Red);
            enemy.entity.set_movement(Movement::new(Vec2::NEG_Y, 1500.0, 0.45));
            enemy
                .entity
                .add_component(TimedExit::new(15.0, Vec2::Y, 1000.0, 0.5));
            enemy
        }),
    ])
}

/// A single spinner stepping through quarter turns
pub fn stage_two(sprites: EnemySprites) -> StageComposer {
    StageComposer::new(vec![StageEvent::spawn(0.0, move |screen| {
        let mut enemy = Enemy::new(EnemyKind::Spinner, Vec2::new(800.0, -10.0), screen, sprites);
        descend_and_exit(&mut enemy);
        enemy.entity.add_component(RotationSequence::new(
            true,
            vec![RotationStep::new(FRAC_PI_2, 0.0, 1.0); 4],
        ));
        enemy
    })])
}

/// A fork opener, then three blue shooters four seconds in
pub fn stage_three(sprites: EnemySprites) -> StageComposer {
    StageComposer::new(vec![
        StageEvent::spawn(0.0, move |screen| {
            let mut enemy =
                Enemy::new(EnemyKind::ThreeFork, Vec2::new(600.0, -10.0), screen, sprites)
                    .with_energy(BulletEnergy::Red);
            descend_and_exit(&mut enemy);
            enemy
        }),
        StageEvent::spawn(4.0, move |screen| {
            let mut enemy = Enemy::new(EnemyKind::Spinner, Vec2::new(200.0, -10.0), screen, sprites)
                .with_energy(BulletEnergy::Blue);
            descend_and_exit(&mut enemy);
            enemy.entity.add_component(Rotation::new(TAU, 2.0, 0.0, true));
            enemy
        }),
        StageEvent::spawn(4.0, move |screen| {
            let mut enemy =
                Enemy::new(EnemyKind::SpreadShot, Vec2::new(800.0, -10.0), screen, sprites)
                    .with_energy(BulletEnergy::Blue);
            descend_and_exit(&mut enemy);
            enemy.entity.add_component(quarter_turn_sequence());
            enemy
        }),
        StageEvent::spawn(4.0, move |screen| {
            let mut enemy =
                Enemy::new(EnemyKind::OmniShotRotate, Vec2::new(1400.0, -10.0), screen, sprites)
                    .with_energy(BulletEnergy::Blue);
            descend_and_exit(&mut enemy);
            enemy.entity.add_component(quarter_turn_sequence());
            enemy
        }),
    ])
}
