//! Magnet power-up: timed speed boost plus coin attraction

use glam::Vec2;

use super::pool::Pool;
use super::state::Coin;
use crate::tuning::MagnetPull;

/// Frame-counted magnet effect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagnetEffect {
    pub active: bool,
    /// Frames left while active
    pub remaining: u32,
}

impl MagnetEffect {
    /// Start (or restart) the effect. Never stacks.
    pub fn activate(&mut self, duration: u32) {
        self.active = true;
        self.remaining = duration;
    }

    /// Count one frame down. Returns true on the frame the effect expires.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

/// Drag regular coins within `radius` of `target` toward it.
///
/// Power-ups are never pulled.
pub fn attract(coins: &mut Pool<Coin>, target: Vec2, radius: f32, pull: MagnetPull) {
    for coin in coins.iter_mut().filter(|c| !c.is_power_up()) {
        let delta = target - coin.pos;
        let dist = delta.length();
        if dist >= radius {
            continue;
        }
        coin.pos += pull_step(delta, dist, pull);
    }
}

fn pull_step(delta: Vec2, dist: f32, pull: MagnetPull) -> Vec2 {
    match pull {
        MagnetPull::Ease { fraction } => delta * fraction,
        // Don't overshoot the target
        MagnetPull::ConstantSpeed { speed } => delta.normalize_or_zero() * speed.min(dist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pool::Entity;
    use crate::sim::state::CoinKind;

    fn pool_with(coins: &[(u32, Vec2, CoinKind)]) -> Pool<Coin> {
        let mut pool = Pool::new();
        for &(id, pos, kind) in coins {
            pool.push(Coin {
                id,
                pos,
                size: 100.0,
                kind,
            });
        }
        pool
    }

    #[test]
    fn test_activate_resets_not_stacks() {
        let mut magnet = MagnetEffect::default();
        magnet.activate(600);
        for _ in 0..100 {
            magnet.tick();
        }
        assert_eq!(magnet.remaining, 500);

        magnet.activate(600);
        assert!(magnet.active);
        assert_eq!(magnet.remaining, 600);
    }

    #[test]
    fn test_expires_on_last_tick() {
        let mut magnet = MagnetEffect::default();
        magnet.activate(5);
        for _ in 0..4 {
            assert!(!magnet.tick());
            assert!(magnet.active);
        }
        assert!(magnet.tick());
        assert!(!magnet.active);
        // Inactive ticks do nothing
        assert!(!magnet.tick());
    }

    #[test]
    fn test_ease_pull() {
        let mut coins = pool_with(&[
            (1, Vec2::new(100.0, 0.0), CoinKind::Coin),
            (2, Vec2::new(500.0, 0.0), CoinKind::Coin),
            (3, Vec2::new(50.0, 0.0), CoinKind::Magnet),
        ]);
        attract(&mut coins, Vec2::ZERO, 200.0, MagnetPull::Ease { fraction: 0.1 });

        assert!((coins.iter().find(|e| e.id == 1).unwrap().pos.x - 90.0).abs() < 1e-4);
        // Out of range
        assert_eq!(coins.iter().find(|e| e.id == 2).unwrap().pos.x, 500.0);
        // Power-ups stay put
        assert_eq!(coins.iter().find(|e| e.id == 3).unwrap().pos.x, 50.0);
    }

    #[test]
    fn test_constant_speed_pull() {
        let mut coins = pool_with(&[
            (1, Vec2::new(0.0, 100.0), CoinKind::Coin),
            (2, Vec2::new(3.0, 0.0), CoinKind::Coin),
        ]);
        attract(
            &mut coins,
            Vec2::ZERO,
            200.0,
            MagnetPull::ConstantSpeed { speed: 8.0 },
        );

        assert!((coins.iter().find(|e| e.id == 1).unwrap().pos.y - 92.0).abs() < 1e-4);
        // Closer than one step: lands exactly on target
        assert_eq!(coins.iter().find(|e| e.id == 2).unwrap().bounds().pos, Vec2::ZERO);
    }

    #[test]
    fn test_pull_is_deterministic() {
        let start = [
            (1, Vec2::new(120.0, 40.0), CoinKind::Coin),
            (2, Vec2::new(-30.0, 75.0), CoinKind::Coin),
        ];
        for pull in [
            MagnetPull::Ease { fraction: 0.1 },
            MagnetPull::ConstantSpeed { speed: 6.0 },
        ] {
            let mut a = pool_with(&start);
            let mut b = pool_with(&start);
            for _ in 0..10 {
                attract(&mut a, Vec2::new(10.0, 10.0), 200.0, pull);
                attract(&mut b, Vec2::new(10.0, 10.0), 200.0, pull);
            }
            for (ca, cb) in a.iter().zip(b.iter()) {
                assert_eq!(ca.pos, cb.pos);
            }
        }
    }
}
