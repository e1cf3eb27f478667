//! Per-frame simulation tick
//!
//! Advances the world in a fixed order: player controller, player animation,
//! player physics, player cooldown, then each zombie (animation, physics, AI),
//! projectiles, roster pruning and finally the outcome checks.

use super::ai::{AiDecision, update_zombie};
use super::animation::Action;
use super::collision::{integrate, smooth_render_position};
use super::entity::AnimationOutcome;
use super::projectile::{Viewport, step_projectiles};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal intent: -1 left, 0 none, 1 right
    pub move_x: i8,
    /// Jump pressed
    pub jump: bool,
    /// Run held
    pub run: bool,
    /// Attack pressed
    pub attack: bool,
}

/// Advance the game state by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Defeat and victory are terminal for the core; the outer layer switches screens
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.time_ticks += 1;

    let player_was_alive = !state.player.is_dying();
    let move_x = if player_was_alive {
        input.move_x.signum()
    } else {
        0
    };

    control_player(state, input, move_x);

    if state.player.advance_animation(dt, move_x) == AnimationOutcome::DeathSettled {
        log::info!("player death settled at tick {}", state.time_ticks);
    }

    integrate(&mut state.player, &state.platforms, move_x);
    let world_right = state.tuning.world_right;
    state.player.pos.x = state.player.pos.x.clamp(0.0, world_right);

    if state.player.pos.y > state.tuning.viewport_height && state.player.is_alive() {
        let amount = state.player.max_health;
        state.player.take_damage(amount);
        state.events.push(GameEvent::PlayerDamaged {
            amount,
            remaining: state.player.health,
        });
        log::info!("player fell out of the world");
    }

    if move_x != 0 {
        state
            .camera
            .follow(state.player.pos.x, CAMERA_FOLLOW_THRESHOLD);
    }

    state.player.update_combat(dt);

    update_enemies(state, dt);

    resolve_projectiles(state, dt);

    prune_roster(state);

    if player_was_alive && state.player.is_dying() {
        state.events.push(GameEvent::PlayerDied);
    }

    check_outcome(state, dt);
}

/// Apply input to the living player: shooting, facing, locomotion and jumping
fn control_player(state: &mut GameState, input: &TickInput, move_x: i8) {
    state.player.is_running = input.run;
    if state.player.is_dying() {
        return;
    }

    if input.attack {
        state.player_shoot();
    }

    let player = &mut state.player;
    if move_x != 0 {
        player.facing_right = move_x > 0;
    }
    if !player.is_animating {
        player.set_action(Action::locomotion(move_x, player.is_running));
    }

    if input.jump && !player.is_jumping {
        player.vel.y = player.profile.jump_strength;
        player.is_jumping = true;
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let smoothing = state.tuning.ai.smoothing_factor;
    for zombie in state.enemies.iter_mut() {
        zombie.advance_animation(dt, 0);
        integrate(zombie, &state.platforms, 0);
        smooth_render_position(zombie, smoothing);

        match update_zombie(zombie, &mut state.player, &state.platforms, &state.tuning.ai, dt) {
            AiDecision::Strike { damage } => state.events.push(GameEvent::PlayerDamaged {
                amount: damage,
                remaining: state.player.health,
            }),
            AiDecision::Died => state.events.push(GameEvent::EnemyDied {
                enemy_id: zombie.id,
            }),
            AiDecision::Dying { settled: true } => {
                log::debug!("zombie #{} finished dying", zombie.id);
            }
            _ => {}
        }
    }
}

fn resolve_projectiles(state: &mut GameState, dt: f32) {
    let viewport = Viewport {
        camera_x: state.camera.x,
        width: state.tuning.viewport_width,
    };
    let damage = state.player.profile.attack_damage;
    let outcomes = step_projectiles(
        &mut state.projectiles,
        &state.platforms,
        &mut state.enemies,
        viewport,
        damage,
        dt,
    );

    for outcome in outcomes {
        if let Some(hit) = outcome.hit {
            let enemy_id = state.enemies[hit.index].id;
            state.events.push(GameEvent::EnemyDamaged {
                enemy_id,
                amount: hit.damage,
                remaining: hit.remaining,
            });
            if hit.killed {
                state.events.push(GameEvent::EnemyDied { enemy_id });
            }
        }
        state.events.push(GameEvent::ProjectileRemoved {
            projectile_id: outcome.projectile_id,
            reason: outcome.reason,
        });
    }
}

/// Drop zombies whose death clip has finished, counting each as a kill
fn prune_roster(state: &mut GameState) {
    let mut removed = Vec::new();
    state.enemies.retain(|zombie| {
        if GameState::is_spent(zombie) {
            removed.push(zombie.id);
            false
        } else {
            true
        }
    });

    for enemy_id in removed {
        state.kills += 1;
        log::info!("zombie #{} removed, kills: {}", enemy_id, state.kills);
        state.events.push(GameEvent::EnemyRemoved {
            enemy_id,
            kills: state.kills,
        });
    }
}

fn check_outcome(state: &mut GameState, dt: f32) {
    if state.player_death_settled() {
        state.death_timer += dt;
        if state.death_timer >= DEATH_SETTLE_SECS {
            state.phase = GamePhase::Defeat;
            state.events.push(GameEvent::PlayerDefeated);
            log::info!("run lost after {} ticks, kills: {}", state.time_ticks, state.kills);
        }
        return;
    }

    if state.player.is_alive() && state.reached_goal() {
        state.phase = GamePhase::Victory;
        state.events.push(GameEvent::GoalReached { kills: state.kills });
        log::info!("goal reached after {} ticks, kills: {}", state.time_ticks, state.kills);
    }
}
