//! Gravity integration and platform collision resolution
//!
//! A small resolver: every overlapping platform is classified as
//! ceiling, floor or wall from the entity's vertical velocity and intent, and
//! the entity is snapped out of it. Platforms are visited in list order and a
//! later platform may override an earlier snap.

use super::entity::Entity;
use super::geometry::Rect;

/// How a single platform contact was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    Ceiling,
    Floor,
    /// Pushed back out of a platform too tall to step onto
    Wall,
    /// Stepped up onto a low platform while walking into it
    Ledge,
}

/// Integrate one tick of motion for `entity` and resolve platform contacts.
///
/// `move_x` is the horizontal intent (-1, 0, 1). Returns the contacts in the
/// order they were resolved.
pub fn integrate(entity: &mut Entity, platforms: &[Rect], move_x: i8) -> Vec<Contact> {
    let profile = &entity.profile;
    let gravity = profile.gravity;
    let max_fall = profile.max_fall_speed;
    let run_multiplier = if entity.is_running {
        profile.run_multiplier
    } else {
        1.0
    };
    let hitbox = profile.hitbox;
    let jump_strength = profile.jump_strength;

    entity.vel.y += gravity;
    entity.pos.y += entity.vel.y;

    let dx = f32::from(move_x) * entity.speed * run_multiplier;
    entity.pos.x += dx;
    entity.vel.x = dx;

    // Computed once and not refreshed between platforms
    let body = hitbox.at(entity.pos);
    let mut contacts = Vec::new();

    for platform in platforms {
        if !body.intersects(platform) {
            continue;
        }

        if entity.vel.y < 0.0 && body.top() < platform.bottom() {
            entity.pos.y = platform.bottom() - hitbox.offset_y;
            entity.vel.y = 0.0;
            contacts.push(Contact::Ceiling);
        } else if entity.vel.y > 0.0 && body.bottom() > platform.top() {
            land_on(entity, platform);
            contacts.push(Contact::Floor);
        } else if move_x != 0 {
            // Literal reachability heuristic: jump_strength is negative, so the
            // threshold sits jump_strength * 10 units below the hitbox top.
            let too_tall = platform.top() < entity.pos.y + hitbox.offset_y - jump_strength * 10.0;
            if too_tall {
                if move_x > 0 && body.right() > platform.left() && body.left() < platform.left() {
                    entity.pos.x = platform.left() - hitbox.width - hitbox.offset_x;
                    contacts.push(Contact::Wall);
                } else if move_x < 0
                    && body.left() < platform.right()
                    && body.right() > platform.right()
                {
                    entity.pos.x = platform.right() - hitbox.offset_x;
                    contacts.push(Contact::Wall);
                }
            } else {
                land_on(entity, platform);
                contacts.push(Contact::Ledge);
            }
        }
    }

    entity.vel.y = entity.vel.y.min(max_fall);
    contacts
}

fn land_on(entity: &mut Entity, platform: &Rect) {
    let hitbox = entity.profile.hitbox;
    entity.pos.y = platform.top() - hitbox.height - hitbox.offset_y;
    entity.vel.y = 0.0;
    entity.is_jumping = false;
}

/// Ease the render position toward the simulated one
pub fn smooth_render_position(entity: &mut Entity, factor: f32) {
    entity.render_pos += (entity.pos - entity.render_pos) * factor;
}
