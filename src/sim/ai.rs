//! Zombie decision making
//!
//! The behaviour is re-derived from spatial relationships every tick rather
//! than stored as a transition table; only the attack cooldown carries over.
//! Later checks override earlier ones, so the order below matters.

use super::animation::Action;
use super::entity::Entity;
use super::geometry::Rect;
use crate::tuning::AiTuning;

/// Which branch the zombie took this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AiDecision {
    /// Playing the death clip; `settled` is true on the tick the terminal flag was set
    Dying { settled: bool },
    /// Health was found at zero and the death clip just started
    Died,
    /// Player is on a different platform
    Isolated,
    /// Swung at the player for `damage`
    Strike { damage: i32 },
    /// In melee range but still cooling down
    Recovering,
    /// Walked toward the player by `dx`
    Chase { dx: f32 },
    Idle,
}

/// Index of the platform a hitbox is standing on or overlapping.
/// When several match, the last one in list order wins.
pub fn platform_under(body: &Rect, platforms: &[Rect]) -> Option<usize> {
    platforms
        .iter()
        .rposition(|platform| body.intersects(platform) || body.rests_on(platform))
}

/// Run one tick of zombie behaviour against the player
pub fn update_zombie(
    zombie: &mut Entity,
    player: &mut Entity,
    platforms: &[Rect],
    ai: &AiTuning,
    dt: f32,
) -> AiDecision {
    if zombie.is_dying() || zombie.is_dead {
        let settled = zombie.is_dying()
            && zombie.anim.on_last_frame(&zombie.profile.clips)
            && zombie.settle_death();
        return AiDecision::Dying { settled };
    }

    if zombie.health <= 0 {
        zombie.begin_death();
        return AiDecision::Died;
    }

    let zombie_box = zombie.hitbox();
    let player_box = player.hitbox();
    if platform_under(&player_box, platforms) != platform_under(&zombie_box, platforms) {
        zombie.set_action(Action::Idle);
        return AiDecision::Isolated;
    }

    let dist_x = player.pos.x - zombie.pos.x;
    let dist_y = player.pos.y - zombie.pos.y;
    zombie.facing_right = dist_x > 0.0;

    if zombie_box.intersects(&player_box) {
        if zombie.attack_cooldown <= 0.0 {
            let damage = zombie.profile.attack_damage;
            zombie.anim.restart(Action::Attack);
            player.take_damage(damage);
            zombie.attack_cooldown = zombie.profile.attack_cooldown;
            log::debug!("zombie #{} hit player for {}", zombie.id, damage);
            return AiDecision::Strike { damage };
        }
        zombie.update_combat(dt);
        if zombie.action() != Action::Attack {
            zombie.set_action(Action::Idle);
        }
        return AiDecision::Recovering;
    }

    if dist_x.abs() > ai.near_distance {
        if dist_y.abs() < ai.vertical_band {
            let step = zombie.speed * dt * ai.speed_normalization;
            let dx = if dist_x > 0.0 { step } else { -step };
            zombie.pos.x += dx;
            zombie.vel.x = dx;
            zombie.set_action(Action::Walk);
            return AiDecision::Chase { dx };
        }
        zombie.set_action(Action::Idle);
        return AiDecision::Idle;
    }

    zombie.set_action(Action::Idle);
    AiDecision::Idle
}
