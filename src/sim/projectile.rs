//! Projectile advance, expiry and hit resolution
//!
//! Each projectile gets at most one outcome per tick. Checks run in a fixed
//! order: expiry, viewport culling, platforms, then enemies, and the first
//! match wins.

use super::combat::Projectile;
use super::entity::Entity;
use super::geometry::Rect;
use crate::consts::PROJECTILE_CULL_MARGIN;

/// Visible window used for culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub camera_x: f32,
    pub width: f32,
}

impl Viewport {
    /// Whether a world x coordinate is past the culling margin on either side
    pub fn is_outside(&self, world_x: f32) -> bool {
        let screen_x = world_x - self.camera_x;
        screen_x < -PROJECTILE_CULL_MARGIN || screen_x > self.width + PROJECTILE_CULL_MARGIN
    }
}

/// Why a projectile left play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    Expired,
    OffScreen,
    HitPlatform,
    HitEnemy,
}

/// Damage a projectile dealt to a roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyHit {
    /// Index into the roster as it was during this tick
    pub index: usize,
    pub damage: i32,
    pub remaining: i32,
    /// This hit brought the enemy down
    pub killed: bool,
}

/// Result of resolving one removed projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileOutcome {
    pub projectile_id: u32,
    pub reason: RemovalReason,
    pub hit: Option<EnemyHit>,
}

/// Advance all projectiles one tick and resolve their hits.
///
/// Removed projectiles are dropped from `projectiles` in place; survivors keep
/// their relative order.
pub fn step_projectiles(
    projectiles: &mut Vec<Projectile>,
    platforms: &[Rect],
    enemies: &mut [Entity],
    viewport: Viewport,
    damage: i32,
    dt: f32,
) -> Vec<ProjectileOutcome> {
    let mut outcomes = Vec::new();

    projectiles.retain_mut(|projectile| {
        projectile.pos.x += projectile.speed * projectile.direction;
        projectile.lifetime -= dt;

        let reason = if projectile.lifetime <= 0.0 {
            Some(RemovalReason::Expired)
        } else if viewport.is_outside(projectile.pos.x) {
            Some(RemovalReason::OffScreen)
        } else {
            None
        };
        if let Some(reason) = reason {
            outcomes.push(ProjectileOutcome {
                projectile_id: projectile.id,
                reason,
                hit: None,
            });
            return false;
        }

        let body = projectile.rect();
        if platforms.iter().any(|platform| body.intersects(platform)) {
            outcomes.push(ProjectileOutcome {
                projectile_id: projectile.id,
                reason: RemovalReason::HitPlatform,
                hit: None,
            });
            return false;
        }

        let target = enemies
            .iter()
            .position(|enemy| !enemy.is_dead && body.intersects(&enemy.hitbox()));
        if let Some(index) = target {
            let enemy = &mut enemies[index];
            let was_alive = enemy.is_alive();
            enemy.take_damage(damage);
            outcomes.push(ProjectileOutcome {
                projectile_id: projectile.id,
                reason: RemovalReason::HitEnemy,
                hit: Some(EnemyHit {
                    index,
                    damage,
                    remaining: enemy.health,
                    killed: was_alive && !enemy.is_alive(),
                }),
            });
            return false;
        }

        true
    });

    outcomes
}
