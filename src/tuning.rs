//! Data-driven game balance
//!
//! `Tuning::default()` is the shipped game. Overrides can be loaded from JSON;
//! any field left out keeps its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_SPAWN_ATTEMPTS;

/// Tuning validation/parse failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// How vertical input moves the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// Grounded runner; jump to clear obstacles
    #[default]
    Jump,
    /// Up/down moves directly, no gravity
    FreeMove,
}

/// How an active magnet drags coins toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MagnetPull {
    /// Move a fixed fraction of the remaining offset each frame
    Ease { fraction: f32 },
    /// Move a fixed distance per frame along the offset
    ConstantSpeed { speed: f32 },
}

impl Default for MagnetPull {
    fn default() -> Self {
        MagnetPull::Ease { fraction: 0.1 }
    }
}

/// When magnet power-ups appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PowerUpSchedule {
    /// One every `interval` frames
    Periodic { interval: u32 },
    /// Rolled after every coin spawn
    WithCoins { chance: f64 },
}

impl Default for PowerUpSchedule {
    fn default() -> Self {
        PowerUpSchedule::Periodic { interval: 600 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal (and free-move vertical) pixels per frame
    pub speed: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_impulse: f32,
    /// Pixels/frame² while airborne
    pub gravity: f32,
    /// Highest a jump may carry the player above the ground
    pub jump_height: f32,
    /// Absolute ceiling (screen y) the player can never pass
    pub min_y: f32,
    /// Ground level measured up from the bottom edge
    pub ground_offset: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 110.0,
            height: 150.0,
            speed: 5.0,
            jump_impulse: -20.0,
            gravity: 0.8,
            jump_height: 600.0,
            min_y: 100.0,
            ground_offset: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            min_width: 50.0,
            max_width: 100.0,
            min_height: 50.0,
            max_height: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinTuning {
    pub size: f32,
    /// Frames between coin spawns
    pub interval: u32,
    /// Probability a spawn is a vertical run instead of a single coin
    pub stack_chance: f64,
    /// Coins in a vertical run
    pub stack_count: u32,
}

impl Default for CoinTuning {
    fn default() -> Self {
        Self {
            size: 100.0,
            interval: 60,
            stack_chance: 0.3,
            stack_count: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnetTuning {
    pub size: f32,
    /// Effect length in frames
    pub duration: u32,
    /// Scroll speed multiplier while active
    pub speed_multiplier: f32,
    /// Coins farther than this from the player are left alone
    pub radius: f32,
    pub pull: MagnetPull,
    pub schedule: PowerUpSchedule,
}

impl Default for MagnetTuning {
    fn default() -> Self {
        Self {
            size: 50.0,
            duration: 600,
            speed_multiplier: 2.0,
            radius: 200.0,
            pull: MagnetPull::default(),
            schedule: PowerUpSchedule::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    /// Frames between obstacles before any level bonus
    pub base_frequency: u32,
    /// Frames removed from the obstacle interval per level
    pub frequency_step: u32,
    /// Obstacles never spawn more often than this
    pub min_frequency: u32,
    pub base_speed: f32,
    /// Scroll speed added per level
    pub speed_step: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            base_frequency: 120,
            frequency_step: 5,
            min_frequency: 60,
            base_speed: 3.0,
            speed_step: 0.2,
        }
    }
}

/// Complete balance sheet for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub control: ControlScheme,
    pub player: PlayerTuning,
    pub obstacle: ObstacleTuning,
    pub coin: CoinTuning,
    pub magnet: MagnetTuning,
    pub difficulty: DifficultyTuning,
    /// Rejection sampling cap per spawn call
    pub max_spawn_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            control: ControlScheme::default(),
            player: PlayerTuning::default(),
            obstacle: ObstacleTuning::default(),
            coin: CoinTuning::default(),
            magnet: MagnetTuning::default(),
            difficulty: DifficultyTuning::default(),
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a JSON tuning file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded tuning from {}", path.display());
        Self::from_json(&json)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        positive("player.width", p.width)?;
        positive("player.height", p.height)?;
        non_negative("player.speed", p.speed)?;
        positive("player.gravity", p.gravity)?;
        non_negative("player.jump_height", p.jump_height)?;
        finite("player.min_y", p.min_y)?;
        finite("player.ground_offset", p.ground_offset)?;
        if !(p.jump_impulse.is_finite() && p.jump_impulse < 0.0) {
            return Err(ConfigError::invalid(
                "player.jump_impulse",
                format!("must be negative, got {}", p.jump_impulse),
            ));
        }

        let o = &self.obstacle;
        positive("obstacle.min_width", o.min_width)?;
        positive("obstacle.min_height", o.min_height)?;
        ordered("obstacle.max_width", o.min_width, o.max_width)?;
        ordered("obstacle.max_height", o.min_height, o.max_height)?;

        let c = &self.coin;
        positive("coin.size", c.size)?;
        probability("coin.stack_chance", c.stack_chance)?;
        if c.interval == 0 {
            return Err(ConfigError::invalid("coin.interval", "must be at least 1"));
        }
        if c.stack_count == 0 {
            return Err(ConfigError::invalid("coin.stack_count", "must be at least 1"));
        }

        let m = &self.magnet;
        positive("magnet.size", m.size)?;
        positive("magnet.speed_multiplier", m.speed_multiplier)?;
        non_negative("magnet.radius", m.radius)?;
        if m.duration == 0 {
            return Err(ConfigError::invalid("magnet.duration", "must be at least 1"));
        }
        match m.pull {
            MagnetPull::Ease { fraction } => {
                if !(fraction.is_finite() && fraction > 0.0 && fraction <= 1.0) {
                    return Err(ConfigError::invalid(
                        "magnet.pull.fraction",
                        format!("must be in (0, 1], got {fraction}"),
                    ));
                }
            }
            MagnetPull::ConstantSpeed { speed } => positive("magnet.pull.speed", speed)?,
        }
        match m.schedule {
            PowerUpSchedule::Periodic { interval } if interval == 0 => {
                return Err(ConfigError::invalid(
                    "magnet.schedule.interval",
                    "must be at least 1",
                ));
            }
            PowerUpSchedule::WithCoins { chance } => {
                probability("magnet.schedule.chance", chance)?
            }
            _ => {}
        }

        let d = &self.difficulty;
        if d.min_frequency == 0 {
            return Err(ConfigError::invalid(
                "difficulty.min_frequency",
                "must be at least 1",
            ));
        }
        positive("difficulty.base_speed", d.base_speed)?;
        non_negative("difficulty.speed_step", d.speed_step)?;

        if self.max_spawn_attempts == 0 {
            return Err(ConfigError::invalid(
                "max_spawn_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn finite(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite, got {v}")))
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {v}")))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {v}")))
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if max.is_finite() && max >= min {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{max} is below minimum {min}")))
    }
}

fn probability(field: &'static str, p: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be in [0, 1], got {p}")))
    }
}
