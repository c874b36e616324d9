//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! device access:
//! - One `tick` per frame, driven by the host
//! - Stable iteration order (roster and bullet insertion order)
//! - No global state; collaborators are passed in

pub mod animation;
pub mod bullet;
pub mod collision;
pub mod component;
pub mod enemy;
pub mod entity;
pub mod geometry;
pub mod pattern;
pub mod player;
pub mod shooter;
pub mod stage;
pub mod state;
pub mod tick;

pub use animation::{AnimKey, Animation, Animator};
pub use bullet::{Bullet, BulletEnergy, BulletManager, BulletOwner};
pub use collision::{CollisionReport, resolve_collisions};
pub use component::{EntityComponent, Movement, Rotation, RotationSequence, RotationStep, TimedExit};
pub use enemy::{Enemy, EnemyKind, EnemySprites};
pub use entity::{Body, Entity};
pub use geometry::{Rect, ScreenSize};
pub use pattern::{BulletPattern, FiringFrame};
pub use player::{Afterimage, Player, PlayerSprites, PlayerUpdate};
pub use shooter::Shooter;
pub use stage::{StageAction, StageComposer, StageEvent, StageId};
pub use state::{GameEvent, GamePhase, PlayState};
pub use tick::{Services, TickReport, tick};
