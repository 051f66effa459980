//! Per-frame simulation tick
//!
//! Core game loop that advances the session by exactly one frame. Component
//! order is fixed: difficulty, scroll, spawn, physics, collision, magnet,
//! distance. Later stages always see what earlier stages produced.

use super::collision::resolve;
use super::difficulty::{self, Difficulty};
use super::magnet::attract;
use super::physics::{MoveIntent, advance};
use super::spawn::{spawn_coin, spawn_obstacle, spawn_power_up};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{COIN_AWARD, DISTANCE_DIVISOR};
use crate::tuning::PowerUpSchedule;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held horizontal direction (-1 left, 1 right)
    pub move_x: f32,
    /// Held vertical direction (-1 up, 1 down), free-move only
    pub move_y: f32,
    /// Jump (edge-triggered)
    pub jump: bool,
    /// Pause toggle
    pub toggle_pause: bool,
    /// Start over (only honored after game over)
    pub restart: bool,
}

impl TickInput {
    fn intent(&self) -> MoveIntent {
        MoveIntent {
            x: self.move_x,
            y: self.move_y,
            jump: self.jump,
        }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        if state.phase == GamePhase::GameOver {
            state.restart();
            return;
        }
        log::debug!("Restart ignored in {:?}", state.phase);
    }

    // Handle pause toggle
    if input.toggle_pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Running {
        return;
    }

    state.frame += 1;

    update_difficulty(state);
    scroll(state);
    spawn(state);

    let scheme = state.tuning.control;
    advance(&mut state.player, input.intent(), scheme, state.viewport);

    let outcome = resolve(&state.player, &state.obstacles, &mut state.coins);
    if outcome.game_over {
        end_run(state);
        return;
    }
    if outcome.coins > 0 {
        state.score += COIN_AWARD * outcome.coins as u64;
        state.events.push(GameEvent::CoinsCollected {
            count: outcome.coins,
            score: state.score,
        });
    }
    if outcome.power_ups > 0 {
        state.magnet.activate(state.tuning.magnet.duration);
        refresh_speed(state);
        state.events.push(GameEvent::MagnetActivated);
        log::debug!("Magnet active for {} frames", state.magnet.remaining);
    }

    update_magnet(state);

    state.distance += state.game_speed / DISTANCE_DIVISOR;
}

fn refresh_speed(state: &mut GameState) {
    state.game_speed = difficulty::game_speed(
        state.base_speed,
        state.magnet.active,
        state.tuning.magnet.speed_multiplier,
    );
}

fn update_difficulty(state: &mut GameState) {
    let d = Difficulty::for_distance(state.distance, &state.tuning.difficulty);
    if d.level > state.level {
        state.events.push(GameEvent::LevelUp { level: d.level });
        log::debug!(
            "Level {}: obstacle every {} frames, speed {:.1}",
            d.level,
            d.spawn_frequency,
            d.base_speed
        );
    }
    state.level = d.level;
    state.spawn_frequency = d.spawn_frequency;
    state.base_speed = d.base_speed;
    refresh_speed(state);
}

/// Move everything down by the scroll speed and drop what left the screen
fn scroll(state: &mut GameState) {
    let dy = state.game_speed;
    let bottom = state.viewport.height;
    state.obstacles.sweep(|o| {
        o.pos.y += dy;
        o.pos.y >= bottom
    });
    state.coins.sweep(|c| {
        c.pos.y += dy;
        c.pos.y >= bottom
    });
}

fn spawn(state: &mut GameState) {
    let frame = state.frame;
    if frame % state.spawn_frequency as u64 == 0 {
        spawn_obstacle(state);
    }
    if frame % state.tuning.coin.interval as u64 == 0 {
        spawn_coin(state);
    }
    if let PowerUpSchedule::Periodic { interval } = state.tuning.magnet.schedule {
        if frame % interval as u64 == 0 {
            spawn_power_up(state);
        }
    }
}

fn update_magnet(state: &mut GameState) {
    if !state.magnet.active {
        return;
    }
    if state.magnet.tick() {
        refresh_speed(state);
        state.events.push(GameEvent::MagnetExpired);
        log::debug!("Magnet expired");
        return;
    }
    let magnet = &state.tuning.magnet;
    attract(&mut state.coins, state.player.pos, magnet.radius, magnet.pull);
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver {
        score: state.score,
        distance: state.distance,
        level: state.level,
    });
    log::info!(
        "Game over: score {}, distance {:.0}m, level {}",
        state.score,
        state.distance,
        state.level
    );
}
