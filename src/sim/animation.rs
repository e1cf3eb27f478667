//! Animation state machine
//!
//! Maps an entity's current [`Action`] to a frame index. Frame timing is
//! per entity class: the player counts ticks, zombies accumulate elapsed time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::PLACEHOLDER_FRAME_SIZE;

/// Named animation/behaviour state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    #[default]
    Idle,
    Walk,
    Run,
    /// Player firing animation
    Shoot,
    /// Zombie melee swing
    Attack,
    Dead,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Idle => "idle",
            Action::Walk => "walk",
            Action::Run => "run",
            Action::Shoot => "shoot",
            Action::Attack => "attack",
            Action::Dead => "dead",
        }
    }

    /// One-shot actions that hand control back to locomotion when they finish
    pub fn is_strike(&self) -> bool {
        matches!(self, Action::Shoot | Action::Attack)
    }

    /// Pick the locomotion action for the given movement intent
    pub fn locomotion(move_x: i8, running: bool) -> Action {
        match (move_x != 0, running) {
            (true, true) => Action::Run,
            (true, false) => Action::Walk,
            (false, _) => Action::Idle,
        }
    }
}

/// How long each frame stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameClock {
    /// Advance one frame every N ticks
    Ticks(u32),
    /// Advance one frame every N seconds of elapsed time
    Seconds(f32),
}

impl FrameClock {
    /// Feed one tick into `timer`; returns true when the frame should advance
    fn step(&self, timer: &mut f32, dt: f32) -> bool {
        match *self {
            FrameClock::Ticks(n) => {
                *timer += 1.0;
                if *timer >= n.max(1) as f32 {
                    *timer = 0.0;
                    true
                } else {
                    false
                }
            }
            FrameClock::Seconds(d) => {
                *timer += dt;
                if d <= 0.0 {
                    *timer = 0.0;
                    true
                } else if *timer >= d {
                    *timer -= d;
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// Frame counts per action for one entity class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSet {
    clips: BTreeMap<Action, u32>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style clip registration
    pub fn with(mut self, action: Action, frames: u32) -> Self {
        self.insert(action, frames);
        self
    }

    /// Register a clip. Empty clips count as missing.
    pub fn insert(&mut self, action: Action, frames: u32) {
        if frames == 0 {
            self.clips.remove(&action);
        } else {
            self.clips.insert(action, frames);
        }
    }

    pub fn frame_count(&self, action: Action) -> Option<u32> {
        self.clips.get(&action).copied().filter(|&n| n > 0)
    }

    /// Index of the final frame (0 for missing clips)
    pub fn last_index(&self, action: Action) -> u32 {
        self.frame_count(action).map_or(0, |n| n - 1)
    }
}

/// Frame the renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FrameRef {
    /// Frame `index` of the sheet for `action`
    Sheet { action: Action, index: u32 },
    /// No frame data for the current action; draw a blank stand-in
    Placeholder { width: f32, height: f32 },
}

impl FrameRef {
    pub fn placeholder() -> Self {
        FrameRef::Placeholder {
            width: PLACEHOLDER_FRAME_SIZE,
            height: PLACEHOLDER_FRAME_SIZE,
        }
    }
}

/// Something notable that happened while advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// A shoot/attack clip played out; the animator is back on locomotion
    StrikeFinished,
    /// The death clip is holding on its final frame
    DeathHeld,
}

/// Per-entity sequencer state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Animator {
    pub action: Action,
    pub frame_index: u32,
    /// Tick count or seconds since the last frame change, depending on the clock
    pub timer: f32,
    /// Last action reported as missing, so the warning fires once per switch
    #[serde(skip)]
    missing_reported: Option<Action>,
}

impl Animator {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            ..Default::default()
        }
    }

    /// Switch action, keeping the current frame index when it still fits
    pub fn set_action(&mut self, action: Action, set: &AnimationSet) {
        if self.action == action {
            return;
        }
        self.action = action;
        let last = set.last_index(action);
        if self.frame_index > last {
            log::debug!(
                "frame {} out of range for {}, clamping to {}",
                self.frame_index,
                action.as_str(),
                last
            );
            self.frame_index = last;
        }
    }

    /// Switch action and rewind to its first frame
    pub fn restart(&mut self, action: Action) {
        self.action = action;
        self.frame_index = 0;
    }

    /// Advance by one tick of `dt` seconds. `recover` is the action to return
    /// to when a strike clip finishes.
    pub fn advance(
        &mut self,
        set: &AnimationSet,
        clock: FrameClock,
        dt: f32,
        recover: Action,
    ) -> Option<AnimationEvent> {
        let Some(count) = set.frame_count(self.action) else {
            if self.missing_reported != Some(self.action) {
                log::warn!(
                    "no frame data for action '{}', using placeholder",
                    self.action.as_str()
                );
                self.missing_reported = Some(self.action);
            }
            self.frame_index = 0;
            return None;
        };
        self.missing_reported = None;

        if !clock.step(&mut self.timer, dt) {
            return None;
        }

        self.frame_index += 1;
        match self.action {
            action if action.is_strike() => {
                if self.frame_index >= count {
                    self.action = recover;
                    self.frame_index = 0;
                    return Some(AnimationEvent::StrikeFinished);
                }
            }
            Action::Dead => {
                if self.frame_index >= count {
                    self.frame_index = count - 1;
                    return Some(AnimationEvent::DeathHeld);
                }
            }
            _ => self.frame_index %= count,
        }
        None
    }

    /// Frame to draw for the current action
    pub fn frame(&self, set: &AnimationSet) -> FrameRef {
        match set.frame_count(self.action) {
            Some(count) => FrameRef::Sheet {
                action: self.action,
                index: self.frame_index.min(count - 1),
            },
            None => FrameRef::placeholder(),
        }
    }

    /// True once the current action is showing its final frame
    pub fn on_last_frame(&self, set: &AnimationSet) -> bool {
        self.frame_index >= set.last_index(self.action)
    }
}
