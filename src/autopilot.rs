//! Scripted player for headless runs
//!
//! Sidesteps obstacles falling into the player's lane, jumps when a hit is
//! imminent, and otherwise drifts toward the nearest coin.

use crate::sim::{CoinKind, Entity, GameState, TickInput};
use crate::tuning::ControlScheme;

/// Frames of warning before an obstacle reaches the player
const LOOKAHEAD_FRAMES: f32 = 45.0;
/// Horizontal dead zone when lining up with a coin
const COIN_DEADBAND: f32 = 8.0;

/// Pick this frame's input
pub fn steer(state: &GameState) -> TickInput {
    let player = &state.player;
    let hitbox = player.hitbox();
    let reach = state.game_speed.max(1.0) * LOOKAHEAD_FRAMES;

    // Closest obstacle in our lane that is still above the hitbox bottom
    let threat = state
        .obstacles
        .iter()
        .map(|o| o.bounds())
        .filter(|b| b.right() > hitbox.left() && b.left() < hitbox.right())
        .filter(|b| b.top() < hitbox.bottom() && hitbox.top() - b.bottom() < reach)
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));

    if let Some(b) = threat {
        let center = hitbox.pos.x + hitbox.size.x / 2.0;
        let room_left = b.left();
        let room_right = state.viewport.width - b.right();
        let mut move_x = if center < b.left() + b.size.x / 2.0 { -1.0 } else { 1.0 };
        // Don't dodge into a wall
        if move_x < 0.0 && room_left < hitbox.size.x {
            move_x = 1.0;
        } else if move_x > 0.0 && room_right < hitbox.size.x {
            move_x = -1.0;
        }

        let imminent = b.bottom() > hitbox.top() - state.game_speed * 2.0;
        return TickInput {
            move_x,
            jump: imminent && state.tuning.control == ControlScheme::Jump,
            ..Default::default()
        };
    }

    let center = player.pos.x + player.size.x / 2.0;
    let target = state
        .coins
        .iter()
        .filter(|c| c.kind == CoinKind::Coin)
        .map(|c| c.bounds())
        .filter(|b| b.top() < player.pos.y + player.size.y)
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));

    let move_x = match target {
        Some(b) => {
            let dx = b.pos.x + b.size.x / 2.0 - center;
            if dx.abs() > COIN_DEADBAND { dx.signum() } else { 0.0 }
        }
        None => 0.0,
    };

    TickInput {
        move_x,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Coin, Obstacle, tick};
    use crate::{Tuning, Viewport};
    use glam::Vec2;

    fn state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.difficulty.base_frequency = 1_000_000;
        tuning.difficulty.min_frequency = 1_000_000;
        tuning.coin.interval = 1_000_000;
        tuning.magnet.schedule = crate::tuning::PowerUpSchedule::Periodic { interval: 1_000_000 };
        GameState::new(11, tuning, Viewport::new(834.0, 750.0), 3).unwrap()
    }

    fn obstacle(state: &mut GameState, pos: Vec2, size: Vec2) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos,
            size,
            variant: 0,
        });
    }

    #[test]
    fn test_sidesteps_obstacle_in_lane() {
        let mut state = state();
        // Player spans x 362..472; obstacle slightly left of center, well above
        obstacle(&mut state, Vec2::new(370.0, 420.0), Vec2::new(60.0, 60.0));
        let input = steer(&state);
        assert_eq!(input.move_x, 1.0);
        assert!(!input.jump);
    }

    #[test]
    fn test_jumps_when_hit_is_imminent() {
        let mut state = state();
        obstacle(&mut state, Vec2::new(400.0, 520.0), Vec2::new(50.0, 60.0));
        assert!(steer(&state).jump);
    }

    #[test]
    fn test_goes_for_coins() {
        let mut state = state();
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: Vec2::new(700.0, 100.0),
            size: 100.0,
            kind: CoinKind::Coin,
        });
        assert_eq!(steer(&state).move_x, 1.0);
    }

    #[test]
    fn test_idle_without_targets() {
        let state = state();
        let input = steer(&state);
        assert_eq!(input.move_x, 0.0);
        assert!(!input.jump);
    }

    #[test]
    fn test_dodges_a_falling_obstacle_end_to_end() {
        let mut state = state();
        obstacle(&mut state, Vec2::new(380.0, 300.0), Vec2::new(60.0, 60.0));
        for _ in 0..200 {
            let input = steer(&state);
            tick(&mut state, &input);
        }
        assert!(!state.is_over());
    }
}
