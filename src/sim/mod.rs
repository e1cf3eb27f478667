//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only, capped per tick
//! - No randomness
//! - Stable iteration order (platform list order, roster spawn order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod animation;
pub mod collision;
pub mod combat;
pub mod entity;
pub mod geometry;
pub mod projectile;
pub mod state;
pub mod tick;

pub use ai::{AiDecision, platform_under, update_zombie};
pub use animation::{Action, AnimationSet, Animator, FrameClock, FrameRef};
pub use collision::{Contact, integrate, smooth_render_position};
pub use combat::{Projectile, shoot};
pub use entity::{Entity, EntityKind};
pub use geometry::{Hitbox, Rect};
pub use projectile::{RemovalReason, Viewport, step_projectiles};
pub use state::{Camera, GameEvent, GamePhase, GameState, Level};
pub use tick::{TickInput, tick};
