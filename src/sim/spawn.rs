//! Procedural placement of obstacles, coins and power-ups
//!
//! Everything spawns just above the top edge at a uniformly random x.
//! Coins and power-ups are rejection-sampled so they don't land on top of
//! something already there. Sampling is capped; when the board is too
//! crowded the least-overlapping candidate wins.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geom::Rect;
use super::pool::Pool;
use super::state::{Coin, CoinKind, GameState, Obstacle};
use crate::tuning::PowerUpSchedule;
use crate::{Viewport, placement_span};

/// Uniform draw in `[lo, hi)`; `lo` when the range is empty
fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        lo + rng.random::<f32>() * (hi - lo)
    } else {
        lo
    }
}

/// Rejection-sample a spawn position for a box of `size`
fn find_clear_spot(
    rng: &mut Pcg32,
    viewport: Viewport,
    size: Vec2,
    obstacles: &Pool<Obstacle>,
    coins: Option<&Pool<Coin>>,
    max_attempts: u32,
) -> Vec2 {
    let y = -size.y;
    let span = placement_span(viewport.width, size.x);
    let mut best = Vec2::new(0.0, y);
    let mut best_overlap = f32::INFINITY;

    for _ in 0..max_attempts {
        let candidate = Vec2::new(uniform(rng, 0.0, span), y);
        let rect = Rect::new(candidate, size);
        let blocked = obstacles.any_overlapping(&rect)
            || coins.is_some_and(|c| c.any_overlapping(&rect));
        if !blocked {
            return candidate;
        }

        let overlap = obstacles.overlap_area(&rect) + coins.map_or(0.0, |c| c.overlap_area(&rect));
        if overlap < best_overlap {
            best_overlap = overlap;
            best = candidate;
        }
    }

    log::warn!(
        "No clear spawn spot after {max_attempts} attempts; accepting overlap of {best_overlap:.1}"
    );
    best
}

/// Drop one obstacle of random size and look
pub fn spawn_obstacle(state: &mut GameState) {
    let tuning = &state.tuning.obstacle;
    let width = uniform(&mut state.rng, tuning.min_width, tuning.max_width);
    let height = uniform(&mut state.rng, tuning.min_height, tuning.max_height);
    let x = uniform(&mut state.rng, 0.0, placement_span(state.viewport.width, width));
    let variant = state.rng.random_range(0..state.obstacle_variants);

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, -height),
        size: Vec2::new(width, height),
        variant,
    });
}

/// Drop a coin, or a vertical run of coins, clear of obstacles.
///
/// Only the lead (lowest) coin of a run is checked; the rest stack upward
/// edge to edge. With the `WithCoins` power-up schedule this may also drop a
/// magnet.
pub fn spawn_coin(state: &mut GameState) {
    let size = state.tuning.coin.size;
    let count = if state.rng.random_bool(state.tuning.coin.stack_chance) {
        state.tuning.coin.stack_count
    } else {
        1
    };

    let lead = find_clear_spot(
        &mut state.rng,
        state.viewport,
        Vec2::splat(size),
        &state.obstacles,
        None,
        state.tuning.max_spawn_attempts,
    );

    for i in 0..count {
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            pos: lead - Vec2::new(0.0, i as f32 * size),
            size,
            kind: CoinKind::Coin,
        });
    }

    if let PowerUpSchedule::WithCoins { chance } = state.tuning.magnet.schedule {
        if state.rng.random_bool(chance) {
            spawn_power_up(state);
        }
    }
}

/// Drop a magnet power-up clear of obstacles and coins
pub fn spawn_power_up(state: &mut GameState) {
    let size = state.tuning.magnet.size;
    let pos = find_clear_spot(
        &mut state.rng,
        state.viewport,
        Vec2::splat(size),
        &state.obstacles,
        Some(&state.coins),
        state.tuning.max_spawn_attempts,
    );

    let id = state.next_entity_id();
    state.coins.push(Coin {
        id,
        pos,
        size,
        kind: CoinKind::Magnet,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::pool::Entity;
    use proptest::prelude::*;

    fn state_with(seed: u64, width: f32, tuning: Tuning) -> GameState {
        GameState::new(seed, tuning, Viewport::new(width, 800.0), 3).unwrap()
    }

    fn push_obstacle(state: &mut GameState, x: f32, width: f32, height: f32) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, -height),
            size: Vec2::new(width, height),
            variant: 0,
        });
    }

    #[test]
    fn test_obstacle_within_bounds() {
        let mut state = state_with(1, 800.0, Tuning::default());
        for _ in 0..200 {
            spawn_obstacle(&mut state);
        }
        for o in &state.obstacles {
            assert!(o.size.x >= 50.0 && o.size.x < 100.0);
            assert!(o.size.y >= 50.0 && o.size.y < 100.0);
            assert!(o.pos.x >= 0.0 && o.pos.x + o.size.x <= 800.0);
            assert_eq!(o.pos.y, -o.size.y);
            assert!(o.variant < 3);
        }
    }

    #[test]
    fn test_coin_runs_are_stacked() {
        let mut tuning = Tuning::default();
        tuning.coin.stack_chance = 1.0;
        let mut state = state_with(2, 800.0, tuning);
        spawn_coin(&mut state);

        let mut ys: Vec<f32> = state.coins.iter().map(|c| c.pos.y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ys, vec![-300.0, -200.0, -100.0]);
        let x = state.coins.as_slice()[0].pos.x;
        assert!(state.coins.iter().all(|c| c.pos.x == x));
    }

    #[test]
    fn test_single_coin_when_no_stacking() {
        let mut tuning = Tuning::default();
        tuning.coin.stack_chance = 0.0;
        let mut state = state_with(3, 800.0, tuning);
        spawn_coin(&mut state);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.coins.as_slice()[0].kind, CoinKind::Coin);
    }

    #[test]
    fn test_crowded_board_still_terminates() {
        let mut state = state_with(4, 800.0, Tuning::default());
        // One obstacle covering the whole spawn row
        push_obstacle(&mut state, 0.0, 800.0, 100.0);
        spawn_coin(&mut state);
        spawn_power_up(&mut state);
        assert!(!state.coins.is_empty());
        assert!(state.coins.iter().any(|c| c.is_power_up()));
    }

    #[test]
    fn test_narrow_viewport_never_nan() {
        // Narrower than a coin: x collapses to 0
        let mut state = state_with(5, 40.0, Tuning::default());
        spawn_coin(&mut state);
        spawn_obstacle(&mut state);
        for c in &state.coins {
            assert_eq!(c.pos.x, 0.0);
        }
        for o in &state.obstacles {
            assert!(o.pos.x.is_finite());
        }
    }

    #[test]
    fn test_power_up_with_coins_schedule() {
        let mut tuning = Tuning::default();
        tuning.coin.stack_chance = 0.0;
        tuning.magnet.schedule = PowerUpSchedule::WithCoins { chance: 1.0 };
        let mut state = state_with(6, 1600.0, tuning);
        spawn_coin(&mut state);

        assert_eq!(state.coins.len(), 2);
        let coin = state.coins.iter().find(|c| !c.is_power_up()).unwrap();
        let magnet = state.coins.iter().find(|c| c.is_power_up()).unwrap();
        assert!(!coin.bounds().intersects(&magnet.bounds()));
    }

    proptest! {
        #[test]
        fn prop_spawns_avoid_obstacles_and_each_other(
            seed in any::<u64>(),
            obstacles in prop::collection::vec((0.0f32..1900.0, 50.0f32..100.0, 50.0f32..100.0), 0..4),
        ) {
            let mut state = state_with(seed, 2000.0, Tuning::default());
            for &(x, w, h) in &obstacles {
                push_obstacle(&mut state, x.min(2000.0 - w), w, h);
            }

            spawn_coin(&mut state);
            let coins: Vec<Rect> = state.coins.iter().map(|c| c.bounds()).collect();
            for (i, a) in coins.iter().enumerate() {
                for b in &coins[i + 1..] {
                    prop_assert!(!a.intersects(b));
                }
                for o in &state.obstacles {
                    prop_assert!(!a.intersects(&o.bounds()));
                }
            }

            spawn_power_up(&mut state);
            let magnet = state.coins.iter().find(|c| c.is_power_up()).unwrap().bounds();
            for o in &state.obstacles {
                prop_assert!(!magnet.intersects(&o.bounds()));
            }
            for c in state.coins.iter().filter(|c| !c.is_power_up()) {
                prop_assert!(!magnet.intersects(&c.bounds()));
            }
        }
    }
}
