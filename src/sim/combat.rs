//! Player shooting
//!
//! Firing is cooldown gated and puts the player into the busy shoot clip;
//! the projectile itself is handed back to the caller for the world pool.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Action;
use super::entity::Entity;
use super::geometry::Rect;
use crate::consts::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH};
use crate::tuning::WeaponTuning;

/// A bullet in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner of the bullet box
    pub pos: Vec2,
    /// +1 right, -1 left
    pub direction: f32,
    /// Units per tick
    pub speed: f32,
    /// Seconds until it expires
    pub lifetime: f32,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// Fire if the cooldown allows. Returns the spawned projectile.
pub fn shoot(player: &mut Entity, weapon: &WeaponTuning, id: u32) -> Option<Projectile> {
    if player.attack_cooldown > 0.0 || player.is_dying() {
        return None;
    }

    let (muzzle_x, muzzle_y) = if player.facing_right {
        weapon.muzzle_right
    } else {
        weapon.muzzle_left
    };
    let projectile = Projectile {
        id,
        pos: player.pos + Vec2::new(muzzle_x, muzzle_y),
        direction: if player.facing_right { 1.0 } else { -1.0 },
        speed: weapon.projectile_speed,
        lifetime: weapon.projectile_lifetime,
    };

    player.anim.restart(Action::Shoot);
    player.is_animating = true;
    player.attack_cooldown = player.profile.attack_cooldown;
    Some(projectile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use crate::tuning::EntityProfile;

    fn player() -> Entity {
        Entity::new(1, EntityKind::Player, Vec2::new(100.0, 372.0), &EntityProfile::player())
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let weapon = WeaponTuning::default();
        let mut p = player();

        let shot = shoot(&mut p, &weapon, 1).expect("first shot fires");
        assert_eq!(shot.direction, 1.0);
        assert_eq!(shot.pos, Vec2::new(180.0, 462.0));
        assert_eq!(p.attack_cooldown, 0.5);
        assert_eq!(p.action(), Action::Shoot);
        assert!(p.is_animating);

        assert!(shoot(&mut p, &weapon, 2).is_none());

        p.update_combat(0.5);
        assert!(shoot(&mut p, &weapon, 3).is_some());
    }

    #[test]
    fn test_shoot_left_uses_left_muzzle() {
        let weapon = WeaponTuning::default();
        let mut p = player();
        p.facing_right = false;
        let shot = shoot(&mut p, &weapon, 1).unwrap();
        assert_eq!(shot.direction, -1.0);
        assert_eq!(shot.pos, Vec2::new(148.0, 462.0));
    }

    #[test]
    fn test_dead_player_cannot_shoot() {
        let weapon = WeaponTuning::default();
        let mut p = player();
        p.take_damage(1000);
        assert!(shoot(&mut p, &weapon, 1).is_none());
        assert_eq!(p.action(), Action::Dead);
    }
}
