//! Zombie Survival headless driver
//!
//! Runs the default level (or one loaded from JSON) with a seeded autoplay
//! controller and logs what happens. Usage:
//!
//! ```text
//! zombie-survival [seed] [tuning.json] [level.json] [settings.json]
//! ```

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use zombie_survival::consts::*;
use zombie_survival::sim::{GameEvent, GamePhase, GameState, Level, TickInput, tick};
use zombie_survival::{HudView, Settings, Tuning};

/// Give up after this many ticks (five minutes at 60 Hz)
const MAX_TICKS: u64 = 60 * 60 * 5;

/// Autoplay controller: mostly pushes right, with random jumps, sprints and shots
struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn next_input(&mut self) -> TickInput {
        let move_x = match self.rng.random_range(0..10) {
            0 => -1,
            1 => 0,
            _ => 1,
        };
        TickInput {
            move_x,
            jump: self.rng.random_bool(0.04),
            run: self.rng.random_bool(0.3),
            attack: self.rng.random_bool(0.2),
        }
    }
}

fn load_json<T>(path: &str, what: &str, parse: fn(&str) -> Result<T, serde_json::Error>) -> Option<T> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {} from {}: {}; using defaults", what, path, e);
            return None;
        }
    };
    match parse(&json) {
        Ok(value) => {
            log::info!("Loaded {} from {}", what, path);
            Some(value)
        }
        Err(e) => {
            log::warn!("Invalid {} in {}: {}; using defaults", what, path, e);
            None
        }
    }
}

fn log_event(event: &GameEvent, tick_no: u64) {
    match event {
        GameEvent::PlayerDamaged { amount, remaining } => {
            log::info!("[{}] player took {} damage, {} left", tick_no, amount, remaining)
        }
        GameEvent::PlayerDied => log::info!("[{}] player died", tick_no),
        GameEvent::EnemyDied { enemy_id } => log::info!("[{}] zombie #{} down", tick_no, enemy_id),
        GameEvent::PlayerDefeated => log::info!("[{}] defeat", tick_no),
        GameEvent::GoalReached { kills } => {
            log::info!("[{}] victory with {} kills", tick_no, kills)
        }
        other => log::debug!("[{}] {:?}", tick_no, other),
    }
}

fn main() {
    env_logger::init();
    log::info!("Zombie Survival (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.first() {
        Some(arg) => arg.parse().unwrap_or_else(|e| {
            log::warn!("Bad seed {:?}: {}; using 0", arg, e);
            0
        }),
        None => 0,
    };
    let tuning = args
        .get(1)
        .and_then(|path| load_json(path, "tuning", Tuning::from_json))
        .unwrap_or_default();
    let level = args
        .get(2)
        .and_then(|path| load_json(path, "level", Level::from_json))
        .unwrap_or_default();
    let settings = args
        .get(3)
        .map(|path| Settings::load(Path::new(path)))
        .unwrap_or_default();

    log::info!("Autoplay seed: {}", seed);
    let mut state = GameState::new(level, tuning);
    let mut pilot = Autopilot::new(seed);

    while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
        let input = pilot.next_input();
        tick(&mut state, &input, SIM_DT);
        for event in &state.events {
            log_event(event, state.time_ticks);
        }
    }

    let hud = HudView::from_state(&state, &settings);
    println!("Result:      {:?}", state.phase);
    println!("Ticks:       {}", state.time_ticks);
    println!("Health:      {}", hud.health_label());
    println!("Kills:       {}", hud.kills);
    println!("Zombies left: {}", hud.enemies_left);
    println!("Player x:    {:.1}", state.player.pos.x);
}
