//! Distance-based difficulty curve

use crate::consts::LEVEL_DISTANCE;
use crate::tuning::DifficultyTuning;

/// Derived difficulty for a given distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// 1-indexed level
    pub level: u32,
    /// Frames between obstacle spawns
    pub spawn_frequency: u32,
    /// Scroll speed without magnet boost
    pub base_speed: f32,
}

impl Difficulty {
    pub fn for_distance(distance: f32, tuning: &DifficultyTuning) -> Self {
        let level = level_for_distance(distance);
        Self {
            level,
            spawn_frequency: spawn_frequency(level, tuning),
            base_speed: tuning.base_speed + level as f32 * tuning.speed_step,
        }
    }
}

/// `floor(distance / 1000) + 1`. Negative or NaN distance counts as 0.
pub fn level_for_distance(distance: f32) -> u32 {
    if distance.is_nan() || distance <= 0.0 {
        return 1;
    }
    // `as` saturates at u32::MAX for huge distances
    ((distance / LEVEL_DISTANCE).floor() as u32).saturating_add(1)
}

/// Obstacle interval for `level`, never below the configured floor
pub fn spawn_frequency(level: u32, tuning: &DifficultyTuning) -> u32 {
    let step_down = level.saturating_mul(tuning.frequency_step);
    tuning
        .base_frequency
        .saturating_sub(step_down)
        .max(tuning.min_frequency)
}

/// Effective scroll speed
pub fn game_speed(base_speed: f32, magnet_active: bool, multiplier: f32) -> f32 {
    if magnet_active {
        base_speed * multiplier
    } else {
        base_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for_distance(0.0), 1);
        assert_eq!(level_for_distance(999.0), 1);
        assert_eq!(level_for_distance(1000.0), 2);
        assert_eq!(level_for_distance(1500.0), 2);
        assert_eq!(level_for_distance(-5.0), 1);
        assert_eq!(level_for_distance(f32::NAN), 1);
    }

    #[test]
    fn test_default_curve() {
        let tuning = DifficultyTuning::default();
        let d = Difficulty::for_distance(0.0, &tuning);
        assert_eq!(d.level, 1);
        assert_eq!(d.spawn_frequency, 115);
        assert!((d.base_speed - 3.2).abs() < 1e-6);

        // Floor reached at level 12 (120 - 60 = 60)
        assert_eq!(spawn_frequency(12, &tuning), 60);
        assert_eq!(spawn_frequency(50, &tuning), 60);
    }

    #[test]
    fn test_game_speed_magnet() {
        assert_eq!(game_speed(3.2, false, 2.0), 3.2);
        assert_eq!(game_speed(3.2, true, 2.0), 6.4);
    }

    proptest! {
        #[test]
        fn prop_level_matches_formula(d in 0.0f32..1.0e7) {
            prop_assert_eq!(level_for_distance(d), (d / 1000.0).floor() as u32 + 1);
        }

        #[test]
        fn prop_level_monotonic(a in 0.0f32..1.0e7, b in 0.0f32..1.0e7) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for_distance(lo) <= level_for_distance(hi));
        }

        #[test]
        fn prop_spawn_frequency_floored_and_non_increasing(level in 1u32..10_000) {
            let tuning = DifficultyTuning::default();
            let here = spawn_frequency(level, &tuning);
            prop_assert!(here >= tuning.min_frequency);
            prop_assert!(spawn_frequency(level + 1, &tuning) <= here);
        }

        #[test]
        fn prop_base_speed_increasing(distance in 0.0f32..1.0e6, extra in 1000.0f32..1.0e6) {
            let tuning = DifficultyTuning::default();
            let a = Difficulty::for_distance(distance, &tuning);
            let b = Difficulty::for_distance(distance + extra, &tuning);
            prop_assert!(b.base_speed >= a.base_speed);
        }
    }
}
