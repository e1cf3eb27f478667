//! Player and zombie entities
//!
//! One record type serves both kinds; the [`EntityKind`] tag selects the
//! behaviour that differs (strike recovery, which actions are legal) and the
//! copied [`EntityProfile`] carries the per-kind numbers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Action, AnimationEvent, Animator, FrameRef};
use super::geometry::Rect;
use crate::tuning::EntityProfile;

/// Entity variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Zombie,
}

impl EntityKind {
    /// Action to fall back to when a strike clip finishes
    pub fn recovery_action(&self, move_x: i8, running: bool) -> Action {
        match self {
            EntityKind::Player => Action::locomotion(move_x, running),
            EntityKind::Zombie => Action::Idle,
        }
    }
}

/// What happened to an entity during its animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    None,
    StrikeFinished,
    /// Terminal death flag was just set
    DeathSettled,
}

/// A simulated character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// `x` is the horizontal displacement applied last tick, `y` the vertical velocity
    pub vel: Vec2,
    /// Base horizontal speed; zeroed when a zombie dies
    pub speed: f32,
    pub facing_right: bool,
    pub health: i32,
    pub max_health: i32,
    pub anim: Animator,
    /// Seconds until the next strike is allowed
    pub attack_cooldown: f32,
    pub is_jumping: bool,
    pub is_running: bool,
    /// Busy with a strike or death clip; locomotion must not overwrite the action
    pub is_animating: bool,
    /// Death animation has played out
    pub is_dead: bool,
    /// Smoothed position for drawing
    pub render_pos: Vec2,
    pub profile: EntityProfile,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, profile: &EntityProfile) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            speed: profile.speed,
            facing_right: true,
            health: profile.max_health,
            max_health: profile.max_health,
            anim: Animator::new(Action::Idle),
            attack_cooldown: 0.0,
            is_jumping: false,
            is_running: false,
            is_animating: false,
            is_dead: false,
            render_pos: pos,
            profile: profile.clone(),
        }
    }

    #[inline]
    pub fn action(&self) -> Action {
        self.anim.action
    }

    #[inline]
    pub fn frame_index(&self) -> u32 {
        self.anim.frame_index
    }

    /// World-space collision box
    #[inline]
    pub fn hitbox(&self) -> Rect {
        self.profile.hitbox.at(self.pos)
    }

    /// Health above zero
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// In the dead state, whether or not the clip has finished
    #[inline]
    pub fn is_dying(&self) -> bool {
        self.anim.action == Action::Dead
    }

    /// Frame for the renderer
    pub fn frame(&self) -> FrameRef {
        self.anim.frame(&self.profile.clips)
    }

    /// Change action unless the current one must not be interrupted
    pub fn set_action(&mut self, action: Action) {
        if self.is_dying() {
            return;
        }
        self.anim.set_action(action, &self.profile.clips);
    }

    /// Apply damage. Returns whether health is now zero.
    ///
    /// The switch to [`Action::Dead`] happens only on the first lethal hit.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount.max(0))
            .max(0)
            .min(self.max_health.max(0));
        if self.health <= 0 && !self.is_dying() {
            log::debug!("{:?} #{} died", self.kind, self.id);
            self.enter_death();
        }
        self.health <= 0
    }

    /// Force the dead state without damage (health already zero)
    pub fn begin_death(&mut self) {
        if !self.is_dying() {
            self.enter_death();
        }
    }

    /// Start the death clip and stop horizontal motion
    fn enter_death(&mut self) {
        self.anim.restart(Action::Dead);
        self.is_animating = true;
        self.speed = 0.0;
        self.vel.x = 0.0;
    }

    /// Set the terminal flag once. Returns true only on the call that sets it.
    pub fn settle_death(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        self.is_dead = true;
        log::debug!("{:?} #{} death settled", self.kind, self.id);
        true
    }

    /// Advance the animation by one tick
    pub fn advance_animation(&mut self, dt: f32, move_x: i8) -> AnimationOutcome {
        let recover = self.kind.recovery_action(move_x, self.is_running);
        let event = self.anim.advance(
            &self.profile.clips,
            self.profile.frame_clock,
            dt,
            recover,
        );
        match event {
            Some(AnimationEvent::StrikeFinished) => {
                self.is_animating = false;
                AnimationOutcome::StrikeFinished
            }
            Some(AnimationEvent::DeathHeld) => {
                if self.settle_death() {
                    AnimationOutcome::DeathSettled
                } else {
                    AnimationOutcome::None
                }
            }
            None => AnimationOutcome::None,
        }
    }

    /// Decay the strike cooldown toward zero
    pub fn update_combat(&mut self, dt: f32) {
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zombie() -> Entity {
        Entity::new(1, EntityKind::Zombie, Vec2::ZERO, &EntityProfile::zombie())
    }

    fn player() -> Entity {
        Entity::new(1, EntityKind::Player, Vec2::ZERO, &EntityProfile::player())
    }

    #[test]
    fn test_two_hits_kill_zombie() {
        let mut z = zombie();
        assert!(!z.take_damage(15));
        assert_eq!(z.health, 15);
        assert!(z.take_damage(15));
        assert_eq!(z.health, 0);
        assert_eq!(z.action(), Action::Dead);
        assert_eq!(z.frame_index(), 0);
        assert!(z.is_animating);
    }

    #[test]
    fn test_lethal_damage_is_idempotent() {
        let mut p = player();
        p.take_damage(500);
        p.anim.frame_index = 2;
        assert!(p.take_damage(10));
        // Second lethal hit must not rewind the death clip
        assert_eq!(p.frame_index(), 2);
        assert_eq!(p.health, 0);
    }

    #[test]
    fn test_locomotion_cannot_overwrite_death() {
        let mut p = player();
        p.take_damage(100);
        p.set_action(Action::Walk);
        assert_eq!(p.action(), Action::Dead);
    }

    #[test]
    fn test_death_settles_once() {
        let mut p = player();
        p.take_damage(100);
        let mut settled = 0;
        for _ in 0..100 {
            if p.advance_animation(1.0 / 60.0, 0) == AnimationOutcome::DeathSettled {
                settled += 1;
            }
        }
        assert_eq!(settled, 1);
        assert!(p.is_dead);
        assert_eq!(p.frame_index(), 3);
    }

    #[test]
    fn test_lethal_hit_halts_corpse() {
        let mut z = zombie();
        z.vel.x = -2.0;
        z.take_damage(30);
        assert_eq!(z.speed, 0.0);
        assert_eq!(z.vel.x, 0.0);
    }

    #[test]
    fn test_negative_max_health_does_not_panic() {
        let mut profile = EntityProfile::zombie();
        profile.max_health = -5;
        let mut z = Entity::new(1, EntityKind::Zombie, Vec2::ZERO, &profile);
        assert!(z.take_damage(1));
        assert_eq!(z.health, 0);
        assert!(z.is_dying());
    }

    #[test]
    fn test_cooldown_never_negative() {
        let mut p = player();
        p.attack_cooldown = 0.3;
        p.update_combat(0.2);
        assert!((p.attack_cooldown - 0.1).abs() < 1e-6);
        p.update_combat(0.2);
        assert_eq!(p.attack_cooldown, 0.0);
    }

    #[test]
    fn test_zombie_strike_recovers_to_idle() {
        let mut z = zombie();
        z.anim.restart(Action::Attack);
        for _ in 0..5 {
            z.advance_animation(0.2, 1);
        }
        assert_eq!(z.action(), Action::Idle);
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(hits in prop::collection::vec(-50i32..200, 0..32)) {
            let mut z = zombie();
            let mut deaths = 0;
            for amount in hits {
                let was_dying = z.is_dying();
                z.take_damage(amount);
                if !was_dying && z.is_dying() {
                    deaths += 1;
                }
                prop_assert!(z.health >= 0 && z.health <= z.max_health);
            }
            prop_assert!(deaths <= 1);
            prop_assert_eq!(deaths == 1, z.health == 0);
        }

        #[test]
        fn prop_frame_index_in_bounds(steps in prop::collection::vec((0u8..4, 0.0f32..0.5), 1..128)) {
            let mut p = player();
            for (choice, dt) in steps {
                match choice {
                    0 => p.set_action(Action::Walk),
                    1 => {
                        p.anim.restart(Action::Shoot);
                        p.is_animating = true;
                    }
                    2 => p.set_action(Action::Idle),
                    _ => {}
                }
                p.advance_animation(dt, 1);
                let count = p.profile.clips.frame_count(p.action()).unwrap();
                prop_assert!(p.frame_index() < count);
            }
        }
    }
}
