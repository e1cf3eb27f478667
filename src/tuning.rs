//! Data-driven game balance
//!
//! Every number the simulation reads per entity class lives here so a level
//! designer can override it from JSON without touching code. Missing fields
//! fall back to the shipped defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::animation::{Action, AnimationSet, FrameClock};
use crate::sim::geometry::Hitbox;

/// Sprite height of the zombie sheets; the hitbox hangs from the bottom of it
pub const ZOMBIE_FRAME_HEIGHT: f32 = 128.0;

/// Static parameters shared by every entity of one class.
///
/// Inside a [`Tuning`] document a profile may be partial: the fields given
/// are laid over the defaults for that kind (see [`ProfilePatch`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProfile {
    pub max_health: i32,
    /// Damage dealt per hit (projectile for the player, swing for zombies)
    pub attack_damage: i32,
    /// Horizontal speed in units per tick
    pub speed: f32,
    /// Multiplier applied to `speed` while running
    pub run_multiplier: f32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_strength: f32,
    /// Cap on downward velocity
    pub max_fall_speed: f32,
    pub hitbox: Hitbox,
    pub frame_clock: FrameClock,
    pub clips: AnimationSet,
    /// Seconds between strikes
    pub attack_cooldown: f32,
    /// Nominal reach; melee actually triggers on hitbox overlap
    pub attack_range: f32,
}

impl EntityProfile {
    pub fn player() -> Self {
        Self {
            max_health: 100,
            attack_damage: 10,
            speed: 3.0,
            run_multiplier: 1.2,
            gravity: 0.5,
            jump_strength: -12.0,
            max_fall_speed: 10.0,
            hitbox: Hitbox::new(49.0, 68.0, 30.0, 60.0),
            frame_clock: FrameClock::Ticks(5),
            clips: AnimationSet::new()
                .with(Action::Idle, 7)
                .with(Action::Walk, 7)
                .with(Action::Run, 7)
                .with(Action::Shoot, 4)
                .with(Action::Dead, 4),
            attack_cooldown: 0.5,
            attack_range: 0.0,
        }
    }

    pub fn zombie() -> Self {
        Self {
            max_health: 30,
            attack_damage: 15,
            speed: 2.0,
            run_multiplier: 1.0,
            gravity: 0.5,
            jump_strength: -12.0,
            max_fall_speed: 10.0,
            hitbox: Hitbox::new(20.0, ZOMBIE_FRAME_HEIGHT - 60.0, 40.0, 60.0),
            frame_clock: FrameClock::Seconds(0.2),
            clips: AnimationSet::new()
                .with(Action::Idle, 8)
                .with(Action::Walk, 8)
                .with(Action::Attack, 5)
                .with(Action::Dead, 5),
            attack_cooldown: 1.0,
            attack_range: 50.0,
        }
    }
}

/// Player weapon parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Muzzle offset from the player position when facing right
    pub muzzle_right: (f32, f32),
    /// Muzzle offset from the player position when facing left
    pub muzzle_left: (f32, f32),
    /// Units per tick
    pub projectile_speed: f32,
    /// Seconds before a projectile expires on its own
    pub projectile_lifetime: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            muzzle_right: (80.0, 90.0),
            muzzle_left: (48.0, 90.0),
            projectile_speed: 10.0,
            projectile_lifetime: 30.0,
        }
    }
}

/// Zombie decision thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Horizontal distance inside which a zombie stops closing in
    pub near_distance: f32,
    /// Vertical distance beyond which a zombie gives up chasing
    pub vertical_band: f32,
    /// Scales `speed * dt` back to units per 60 Hz frame
    pub speed_normalization: f32,
    /// Per-step easing of the reported render position
    pub smoothing_factor: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            near_distance: 20.0,
            vertical_band: 50.0,
            speed_normalization: 60.0,
            smoothing_factor: 0.2,
        }
    }
}

/// Field-by-field override of an [`EntityProfile`]. Nested values
/// (`hitbox`, `frame_clock`, `clips`) replace the default whole.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    pub max_health: Option<i32>,
    pub attack_damage: Option<i32>,
    pub speed: Option<f32>,
    pub run_multiplier: Option<f32>,
    pub gravity: Option<f32>,
    pub jump_strength: Option<f32>,
    pub max_fall_speed: Option<f32>,
    pub hitbox: Option<Hitbox>,
    pub frame_clock: Option<FrameClock>,
    pub clips: Option<AnimationSet>,
    pub attack_cooldown: Option<f32>,
    pub attack_range: Option<f32>,
}

impl ProfilePatch {
    /// Lay the present fields over `base`
    pub fn apply(self, base: EntityProfile) -> EntityProfile {
        EntityProfile {
            max_health: self.max_health.unwrap_or(base.max_health),
            attack_damage: self.attack_damage.unwrap_or(base.attack_damage),
            speed: self.speed.unwrap_or(base.speed),
            run_multiplier: self.run_multiplier.unwrap_or(base.run_multiplier),
            gravity: self.gravity.unwrap_or(base.gravity),
            jump_strength: self.jump_strength.unwrap_or(base.jump_strength),
            max_fall_speed: self.max_fall_speed.unwrap_or(base.max_fall_speed),
            hitbox: self.hitbox.unwrap_or(base.hitbox),
            frame_clock: self.frame_clock.unwrap_or(base.frame_clock),
            clips: self.clips.unwrap_or(base.clips),
            attack_cooldown: self.attack_cooldown.unwrap_or(base.attack_cooldown),
            attack_range: self.attack_range.unwrap_or(base.attack_range),
        }
    }
}

/// On-disk shape of [`Tuning`]: every section optional, profiles patched
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TuningDocument {
    player: ProfilePatch,
    zombie: ProfilePatch,
    weapon: WeaponTuning,
    ai: AiTuning,
    viewport_width: f32,
    viewport_height: f32,
    world_right: f32,
}

impl Default for TuningDocument {
    fn default() -> Self {
        Self {
            player: ProfilePatch::default(),
            zombie: ProfilePatch::default(),
            weapon: WeaponTuning::default(),
            ai: AiTuning::default(),
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            world_right: WORLD_RIGHT,
        }
    }
}

impl From<TuningDocument> for Tuning {
    fn from(doc: TuningDocument) -> Self {
        Self {
            player: doc.player.apply(EntityProfile::player()),
            zombie: doc.zombie.apply(EntityProfile::zombie()),
            weapon: doc.weapon,
            ai: doc.ai,
            viewport_width: doc.viewport_width,
            viewport_height: doc.viewport_height,
            world_right: doc.world_right,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TuningDocument")]
pub struct Tuning {
    pub player: EntityProfile,
    pub zombie: EntityProfile,
    pub weapon: WeaponTuning,
    pub ai: AiTuning,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub world_right: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: EntityProfile::player(),
            zombie: EntityProfile::zombie(),
            weapon: WeaponTuning::default(),
            ai: AiTuning::default(),
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            world_right: WORLD_RIGHT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning =
            Tuning::from_json(r#"{"ai": {"near_distance": 35}, "world_right": 4000}"#).unwrap();
        assert_eq!(tuning.ai.near_distance, 35.0);
        assert_eq!(tuning.ai.vertical_band, 50.0);
        assert_eq!(tuning.world_right, 4000.0);
        assert_eq!(tuning.player, EntityProfile::player());
        assert_eq!(tuning.zombie, EntityProfile::zombie());
    }

    #[test]
    fn test_partial_profile_merges_over_kind_defaults() {
        let tuning = Tuning::from_json(r#"{"zombie": {"max_health": 45}}"#).unwrap();
        assert_eq!(tuning.zombie.max_health, 45);
        // Everything else comes from the zombie defaults, not the player's
        let mut expected = EntityProfile::zombie();
        expected.max_health = 45;
        assert_eq!(tuning.zombie, expected);
        assert_eq!(tuning.player, EntityProfile::player());
    }

    #[test]
    fn test_profile_patch_replaces_nested_hitbox() {
        let tuning = Tuning::from_json(
            r#"{"player": {"hitbox": {"offset_x": 0, "offset_y": 0, "width": 10, "height": 20}}}"#,
        )
        .unwrap();
        assert_eq!(tuning.player.hitbox, Hitbox::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(tuning.player.speed, 3.0);
    }

    #[test]
    fn test_bad_field_type_is_an_error() {
        assert!(Tuning::from_json(r#"{"zombie": {"max_health": "lots"}}"#).is_err());
    }

    #[test]
    fn test_defaults_survive_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_zombie_hitbox_hangs_from_frame_bottom() {
        let z = EntityProfile::zombie();
        assert_eq!(z.hitbox.offset_y + z.hitbox.height, ZOMBIE_FRAME_HEIGHT);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }
}
