//! Heads-up display read model
//!
//! Turns the world state into the handful of numbers the HUD draws, so the
//! presentation layer never does game arithmetic.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Health represented by one heart icon
pub const HEALTH_PER_HEART: i32 = 20;

/// Everything the HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub health: i32,
    pub max_health: i32,
    /// Filled share of the health bar, 0.0 to 1.0
    pub health_fraction: f32,
    /// Filled width of the health bar in pixels
    pub health_bar_fill: f32,
    pub hearts: u32,
    pub kills: u32,
    /// Zombies still in the roster, including ones mid-death
    pub enemies_left: usize,
    pub phase: GamePhase,
}

impl HudView {
    pub fn from_state(state: &GameState, settings: &Settings) -> Self {
        let player = &state.player;
        let health_fraction = if player.max_health > 0 {
            (player.health as f32 / player.max_health as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            health: player.health,
            max_health: player.max_health,
            health_fraction,
            health_bar_fill: settings.health_bar_width * health_fraction,
            hearts: (player.health.max(0) / HEALTH_PER_HEART) as u32,
            kills: state.kills,
            enemies_left: state.enemies.len(),
            phase: state.phase,
        }
    }

    /// "health/max" label
    pub fn health_label(&self) -> String {
        format!("{}/{}", self.health, self.max_health)
    }
}
