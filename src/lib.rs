//! Zombie Survival - simulation core for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (animation, physics, combat, AI, world state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation options handed to the renderer
//! - `hud`: Read model for the heads-up display

pub mod hud;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use hud::HudView;
pub use settings::Settings;
pub use tuning::{EntityProfile, Tuning};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest elapsed time a single tick will integrate
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Right edge of the playable world
    pub const WORLD_RIGHT: f32 = 3000.0;
    /// Distance from the right edge where the goal starts
    pub const GOAL_MARGIN: f32 = 50.0;
    /// Vertical band (player y) that counts as reaching the goal
    pub const GOAL_Y_MIN: f32 = 450.0;
    pub const GOAL_Y_MAX: f32 = 550.0;

    /// Camera starts scrolling once the player is this far from its left edge
    pub const CAMERA_FOLLOW_THRESHOLD: f32 = VIEWPORT_WIDTH / 2.0;

    /// Seconds the player's corpse lies before the run counts as lost
    pub const DEATH_SETTLE_SECS: f32 = 2.0;

    /// Projectile box size
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;
    /// Slack past the viewport edges before a projectile is culled
    pub const PROJECTILE_CULL_MARGIN: f32 = 10.0;

    /// Size of the stand-in frame reported for missing animation data
    pub const PLACEHOLDER_FRAME_SIZE: f32 = 50.0;
}
