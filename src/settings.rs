//! Presentation settings
//!
//! Read by the renderer and HUD only; nothing here changes the simulation.

use serde::{Deserialize, Serialize};

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Debug ===
    /// Outline every live entity's collision box
    pub debug_hitboxes: bool,

    // === HUD ===
    /// Numeric "health/max" label next to the bar
    pub show_health_text: bool,
    /// Heart icons under the health bar
    pub show_hearts: bool,
    /// Kill counter
    pub show_kills: bool,
    /// Width of the full health bar in pixels
    pub health_bar_width: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_hitboxes: false,

            show_health_text: true,
            show_hearts: true,
            show_kills: true,
            health_bar_width: 200.0,
        }
    }
}

impl Settings {
    /// Parse settings, filling missing fields from the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}; using default settings", path.display(), e);
                Self::default()
            }
        }
    }
}
