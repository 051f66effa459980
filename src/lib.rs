//! Koala Dash - An endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (spawning, physics, collisions, difficulty)
//! - `tuning`: Data-driven game balance
//! - `assets`: Image manifest the platform layer must load before a session starts
//! - `renderer`: Read-only frame snapshot for drawing
//! - `platform`: Browser input translation into simulation intents
//! - `ui`: Menu/game-over hit testing
//! - `persistence`: Best-effort score submission
//! - `autopilot`: Scripted input for headless runs

pub mod assets;
pub mod autopilot;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::GameError;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Display refresh the simulation is tuned for (one tick per frame)
    pub const FRAME_RATE: u32 = 60;

    /// Points awarded per regular coin
    pub const COIN_AWARD: u64 = 10;

    /// Distance units per level
    pub const LEVEL_DISTANCE: f32 = 1000.0;
    /// Scroll speed is divided by this to get distance per frame
    pub const DISTANCE_DIVISOR: f32 = 10.0;

    /// Player hitbox inset on each side, as a fraction of sprite size
    pub const HITBOX_INSET: f32 = 0.2;

    /// Rejection sampling attempts before accepting an overlapping placement
    pub const MAX_SPAWN_ATTEMPTS: u32 = 50;
}

/// Size of the visible play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and positive
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Upper bound of a uniform draw for an entity of `extent` inside `span`.
///
/// Collapses to 0 when the entity doesn't fit, so degenerate viewports never
/// produce an empty range or a NaN coordinate.
#[inline]
pub fn placement_span(span: f32, extent: f32) -> f32 {
    let room = span - extent;
    if room.is_finite() { room.max(0.0) } else { 0.0 }
}
