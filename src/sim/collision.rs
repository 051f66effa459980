//! Player vs obstacle/coin collision resolution
//!
//! The player collides with a hitbox inset 20% on every side, which is more
//! forgiving than the sprite. Airborne players sail over obstacles but still
//! pick up coins.

use super::pool::{Entity, Pool};
use super::state::{Coin, Obstacle, Player};

/// What one resolution pass found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Grounded player hit an obstacle
    pub game_over: bool,
    /// Regular coins picked up (already removed)
    pub coins: u32,
    /// Magnet power-ups picked up (already removed)
    pub power_ups: u32,
}

/// First overlapping obstacle in pool order, if the player is grounded.
///
/// Pool order is not spawn order after removals, so with several overlaps
/// this need not be the oldest one.
pub fn obstacle_hit<'a>(player: &Player, obstacles: &'a Pool<Obstacle>) -> Option<&'a Obstacle> {
    if player.airborne {
        return None;
    }
    let hitbox = player.hitbox();
    obstacles.iter().find(|o| hitbox.intersects(&o.bounds()))
}

/// Resolve all collisions for this frame.
///
/// An obstacle hit ends resolution immediately: nothing is collected on the
/// frame the run ends. Otherwise every overlapping coin is removed.
pub fn resolve(player: &Player, obstacles: &Pool<Obstacle>, coins: &mut Pool<Coin>) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();

    if let Some(obstacle) = obstacle_hit(player, obstacles) {
        log::debug!("Player hit obstacle {} at {:?}", obstacle.id, obstacle.pos);
        outcome.game_over = true;
        return outcome;
    }

    let hitbox = player.hitbox();
    coins.sweep(|coin| {
        if !hitbox.intersects(&coin.bounds()) {
            return false;
        }
        if coin.is_power_up() {
            outcome.power_ups += 1;
        } else {
            outcome.coins += 1;
        }
        true
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::state::CoinKind;
    use crate::tuning::PlayerTuning;
    use glam::Vec2;

    fn player_at(x: f32, y: f32) -> Player {
        let mut p = Player::new(&PlayerTuning::default(), Viewport::new(834.0, 750.0));
        p.pos = Vec2::new(x, y);
        p
    }

    fn obstacles(rects: &[(f32, f32, f32, f32)]) -> Pool<Obstacle> {
        let mut pool = Pool::new();
        for (i, &(x, y, w, h)) in rects.iter().enumerate() {
            pool.push(Obstacle {
                id: i as u32 + 1,
                pos: Vec2::new(x, y),
                size: Vec2::new(w, h),
                variant: 0,
            });
        }
        pool
    }

    fn coins(items: &[(f32, f32, CoinKind)]) -> Pool<Coin> {
        let mut pool = Pool::new();
        for (i, &(x, y, kind)) in items.iter().enumerate() {
            pool.push(Coin {
                id: i as u32 + 100,
                pos: Vec2::new(x, y),
                size: 50.0,
                kind,
            });
        }
        pool
    }

    // Player at (100, 100) size 110x150 -> hitbox x 122..188, y 130..220

    #[test]
    fn test_grounded_hit_ends_run() {
        let player = player_at(100.0, 100.0);
        let obs = obstacles(&[(150.0, 150.0, 50.0, 50.0)]);
        let mut c = coins(&[(130.0, 140.0, CoinKind::Coin)]);

        let outcome = resolve(&player, &obs, &mut c);
        assert!(outcome.game_over);
        // Nothing collected on the fatal frame
        assert_eq!(outcome.coins, 0);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_airborne_passes_over() {
        let mut player = player_at(100.0, 100.0);
        player.airborne = true;
        let obs = obstacles(&[(150.0, 150.0, 50.0, 50.0)]);
        let mut c = coins(&[]);
        assert!(!resolve(&player, &obs, &mut c).game_over);
    }

    #[test]
    fn test_sprite_overlap_outside_hitbox_is_safe() {
        let player = player_at(100.0, 100.0);
        // Overlaps the sprite's left margin (100..122) only
        let obs = obstacles(&[(60.0, 150.0, 50.0, 50.0)]);
        let mut c = coins(&[]);
        assert!(!resolve(&player, &obs, &mut c).game_over);

        // Touching the hitbox edge exactly is not a hit
        let obs = obstacles(&[(72.0, 150.0, 50.0, 50.0)]);
        assert!(!resolve(&player, &obs, &mut c).game_over);
    }

    #[test]
    fn test_multiple_pickups_in_one_frame() {
        let mut player = player_at(100.0, 100.0);
        player.airborne = true;
        let obs = obstacles(&[]);
        let mut c = coins(&[
            (130.0, 140.0, CoinKind::Coin),
            (140.0, 160.0, CoinKind::Coin),
            (150.0, 180.0, CoinKind::Magnet),
            (600.0, 600.0, CoinKind::Coin),
        ]);

        let outcome = resolve(&player, &obs, &mut c);
        assert_eq!(outcome.coins, 2);
        assert_eq!(outcome.power_ups, 1);
        assert_eq!(c.len(), 1);
        assert!(c.iter().any(|e| e.id == 103));

        // Already-collected coins can't be collected again
        let again = resolve(&player, &obs, &mut c);
        assert_eq!(again, CollisionOutcome::default());
    }
}
