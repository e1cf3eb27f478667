//! World state and core simulation types
//!
//! Everything the renderer and HUD read after a tick lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Action;
use super::combat::{Projectile, shoot};
use super::entity::{Entity, EntityKind};
use super::geometry::Rect;
use super::projectile::RemovalReason;
use crate::consts::*;
use crate::tuning::Tuning;

/// Where the run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player's death has settled; the loser screen should show
    Defeat,
    /// Player reached the goal
    Victory,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerShot { projectile_id: u32, pos: Vec2, direction: f32 },
    PlayerDamaged { amount: i32, remaining: i32 },
    PlayerDied,
    ProjectileRemoved { projectile_id: u32, reason: RemovalReason },
    EnemyDamaged { enemy_id: u32, amount: i32, remaining: i32 },
    EnemyDied { enemy_id: u32 },
    /// Death clip finished and the zombie left the roster
    EnemyRemoved { enemy_id: u32, kills: u32 },
    PlayerDefeated,
    GoalReached { kills: u32 },
}

/// Horizontal scroll position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Keep `target_x` between half the threshold and the threshold from the left edge
    pub fn follow(&mut self, target_x: f32, threshold: f32) {
        if target_x - self.x > threshold {
            self.x = target_x - threshold;
        } else if target_x - self.x < threshold / 2.0 {
            self.x = (target_x - threshold / 2.0).max(0.0);
        }
    }
}

/// Static layout of a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Rect>,
    pub player_spawn: Vec2,
    pub zombie_spawns: Vec<Vec2>,
}

impl Default for Level {
    /// The city street layout: ground, stepped rooftops, and a goal wall at the
    /// right edge with a gap to walk through.
    fn default() -> Self {
        Self {
            platforms: vec![
                Rect::new(0.0, 300.0, 50.0, 500.0),
                Rect::new(50.0, 500.0, 600.0, 300.0),
                Rect::new(700.0, 450.0, 500.0, 300.0),
                Rect::new(1250.0, 400.0, 450.0, 350.0),
                Rect::new(1850.0, 350.0, 600.0, 400.0),
                Rect::new(2600.0, 450.0, 400.0, 300.0),
                Rect::new(WORLD_RIGHT - 50.0, 0.0, 50.0, 450.0),
                Rect::new(WORLD_RIGHT - 50.0, 550.0, 50.0, 50.0),
            ],
            player_spawn: Vec2::new(100.0, 400.0),
            zombie_spawns: vec![
                Vec2::new(700.0, 430.0),
                Vec2::new(850.0, 430.0),
                Vec2::new(1000.0, 430.0),
                Vec2::new(1250.0, 380.0),
                Vec2::new(1400.0, 380.0),
                Vec2::new(1850.0, 330.0),
                Vec2::new(2000.0, 330.0),
                Vec2::new(2150.0, 330.0),
                Vec2::new(2600.0, 430.0),
                Vec2::new(2750.0, 430.0),
            ],
        }
    }
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Log degenerate platforms. They stay in the list but never collide.
    /// Returns how many were found.
    pub fn validate(&self) -> usize {
        let mut bad = 0;
        for (i, platform) in self.platforms.iter().enumerate() {
            if platform.is_degenerate() {
                log::warn!("platform {} has no area ({:?}); it will be ignored", i, platform);
                bad += 1;
            }
        }
        bad
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Immutable for the lifetime of the level
    pub platforms: Vec<Rect>,
    pub player: Entity,
    /// Live zombies in spawn order
    pub enemies: Vec<Entity>,
    pub projectiles: Vec<Projectile>,
    pub camera: Camera,
    /// Zombies whose death clip has finished
    pub kills: u32,
    pub phase: GamePhase,
    /// Seconds since the player's death settled
    pub death_timer: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised during the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let degenerate = level.validate();
        log::info!(
            "level loaded: {} platforms ({} degenerate), {} zombies",
            level.platforms.len(),
            degenerate,
            level.zombie_spawns.len()
        );

        let player = Entity::new(1, EntityKind::Player, level.player_spawn, &tuning.player);
        let mut state = Self {
            tuning,
            platforms: level.platforms,
            player,
            enemies: Vec::with_capacity(level.zombie_spawns.len()),
            projectiles: Vec::new(),
            camera: Camera::default(),
            kills: 0,
            phase: GamePhase::Playing,
            death_timer: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 2,
        };
        for &pos in &level.zombie_spawns {
            state.spawn_zombie(pos);
        }
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a zombie to the end of the roster
    pub fn spawn_zombie(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let zombie = Entity::new(id, EntityKind::Zombie, pos, &self.tuning.zombie);
        self.enemies.push(zombie);
        id
    }

    /// Fire the player's weapon if the cooldown allows, adding the projectile
    /// to the world pool
    pub fn player_shoot(&mut self) -> Option<u32> {
        let id = self.next_id;
        let projectile = shoot(&mut self.player, &self.tuning.weapon, id)?;
        self.next_id += 1;
        self.events.push(GameEvent::PlayerShot {
            projectile_id: id,
            pos: projectile.pos,
            direction: projectile.direction,
        });
        self.projectiles.push(projectile);
        Some(id)
    }

    /// Zombie whose death clip has played out and should leave the roster
    pub fn is_spent(zombie: &Entity) -> bool {
        zombie.is_dead
            && zombie.action() == Action::Dead
            && zombie.anim.on_last_frame(&zombie.profile.clips)
    }

    /// Player's death clip has finished
    pub fn player_death_settled(&self) -> bool {
        self.player.is_dead
    }

    /// Player is inside the goal area at the right edge of the world
    pub fn reached_goal(&self) -> bool {
        let pos = self.player.pos;
        pos.x >= self.tuning.world_right - GOAL_MARGIN
            && (GOAL_Y_MIN..=GOAL_Y_MAX).contains(&pos.y)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Level::default(), Tuning::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_population() {
        let state = GameState::default();
        assert_eq!(state.platforms.len(), 8);
        assert_eq!(state.enemies.len(), 10);
        assert_eq!(state.player.kind, EntityKind::Player);
        assert!(state.enemies.iter().all(|z| z.kind == EntityKind::Zombie));

        // IDs are unique
        let mut ids: Vec<u32> = state.enemies.iter().map(|z| z.id).collect();
        ids.push(state.player.id);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_spawned_zombie_joins_roster_end() {
        let mut state = GameState::default();
        let id = state.spawn_zombie(Vec2::new(500.0, 430.0));
        assert_eq!(state.enemies.len(), 11);
        assert_eq!(state.enemies[10].id, id);
        assert_eq!(state.enemies[10].kind, EntityKind::Zombie);
        assert!(state.enemies[..10].iter().all(|z| z.id < id));
        // Projectile IDs come from the same allocator
        let shot = state.player_shoot().unwrap();
        assert!(shot > id);
    }

    #[test]
    fn test_camera_follow() {
        let mut camera = Camera::default();
        camera.follow(300.0, 400.0);
        assert_eq!(camera.x, 0.0);
        camera.follow(600.0, 400.0);
        assert_eq!(camera.x, 200.0);
        camera.follow(450.0, 400.0);
        assert_eq!(camera.x, 200.0);
        camera.follow(250.0, 400.0);
        assert_eq!(camera.x, 50.0);
        camera.follow(10.0, 400.0);
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn test_second_shot_blocked_by_cooldown() {
        let mut state = GameState::default();
        let first = state.player_shoot();
        assert!(first.is_some());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].direction, 1.0);
        assert_eq!(state.player.attack_cooldown, 0.5);

        assert!(state.player_shoot().is_none());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_goal_band() {
        let mut state = GameState::default();
        state.player.pos = Vec2::new(2960.0, 500.0);
        assert!(state.reached_goal());
        state.player.pos = Vec2::new(2960.0, 400.0);
        assert!(!state.reached_goal());
        state.player.pos = Vec2::new(2900.0, 500.0);
        assert!(!state.reached_goal());
    }

    #[test]
    fn test_level_validate_counts_degenerate() {
        let level = Level {
            platforms: vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 0.0, 0.0, 10.0)],
            player_spawn: Vec2::ZERO,
            zombie_spawns: Vec::new(),
        };
        assert_eq!(level.validate(), 1);
    }

    #[test]
    fn test_level_from_json() {
        let json = r#"{
            "platforms": [{"x": 0, "y": 500, "w": 800, "h": 100}],
            "player_spawn": [100, 372],
            "zombie_spawns": [[400, 372]]
        }"#;
        let level = Level::from_json(json).unwrap();
        let state = GameState::new(level, Tuning::default());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(400.0, 372.0));
    }
}
