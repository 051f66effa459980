//! Game state and core simulation types
//!
//! Everything a session owns lives in [`GameState`]; restart rebuilds it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use super::geom::Rect;
use super::magnet::MagnetEffect;
use super::pool::{Entity, Pool};
use crate::assets::AssetError;
use crate::consts::HITBOX_INSET;
use crate::error::GameError;
use crate::tuning::{PlayerTuning, Tuning};
use crate::Viewport;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advances every frame
    Running,
    /// Frames are no-ops until unpaused
    Paused,
    /// Run ended; only restart leaves this phase
    GameOver,
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Per-frame velocity; only `y` is integrated (x comes from intent)
    pub vel: Vec2,
    pub speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    /// Mid-jump; obstacles can't hurt an airborne player
    pub airborne: bool,
    /// Resting y; jumps land back here
    pub ground_y: f32,
    /// Highest y a jump can reach
    pub min_y: f32,
}

impl Player {
    /// Player standing centered on the ground
    pub fn new(tuning: &PlayerTuning, viewport: Viewport) -> Self {
        let ground_y = viewport.height - tuning.ground_offset;
        Self {
            pos: Vec2::new(viewport.width / 2.0 - tuning.width / 2.0, ground_y),
            size: Vec2::new(tuning.width, tuning.height),
            vel: Vec2::ZERO,
            speed: tuning.speed,
            jump_impulse: tuning.jump_impulse,
            gravity: tuning.gravity,
            airborne: false,
            ground_y,
            min_y: tuning.min_y.max(ground_y - tuning.jump_height),
        }
    }

    /// Full sprite box
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Collision box, inset from the sprite on every side
    pub fn hitbox(&self) -> Rect {
        self.bounds().inset(HITBOX_INSET)
    }
}

/// A falling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Index into the loaded obstacle images
    pub variant: usize,
}

impl Entity for Obstacle {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinKind {
    /// Worth points
    Coin,
    /// Activates the magnet
    Magnet,
}

/// A collectible (coin or magnet power-up)
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    /// Square edge length
    pub size: f32,
    pub kind: CoinKind,
}

impl Coin {
    pub fn is_power_up(&self) -> bool {
        self.kind == CoinKind::Magnet
    }
}

impl Entity for Coin {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.size))
    }
}

/// Things that happened during a tick, for the platform layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CoinsCollected { count: u32, score: u64 },
    MagnetActivated,
    MagnetExpired,
    LevelUp { level: u32 },
    Paused,
    Resumed,
    GameOver { score: u64, distance: f32, level: u32 },
    Restarted { seed: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Number of obstacle images available
    pub obstacle_variants: usize,
    /// Frames simulated while running
    pub frame: u64,
    pub score: u64,
    /// Accumulated distance; drives difficulty
    pub distance: f32,
    pub level: u32,
    /// Scroll speed before any magnet boost
    pub base_speed: f32,
    /// Scroll speed applied to entities this frame
    pub game_speed: f32,
    /// Frames between obstacle spawns
    pub spawn_frequency: u32,
    pub phase: GamePhase,
    pub player: Player,
    pub obstacles: Pool<Obstacle>,
    pub coins: Pool<Coin>,
    pub magnet: MagnetEffect,
    /// Undrained events, oldest first
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session.
    ///
    /// Fails on invalid tuning, a degenerate viewport, or no obstacle images.
    pub fn new(
        seed: u64,
        tuning: Tuning,
        viewport: Viewport,
        obstacle_variants: usize,
    ) -> Result<Self, GameError> {
        tuning.validate()?;
        if !viewport.is_valid() {
            return Err(GameError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if obstacle_variants == 0 {
            return Err(AssetError::Empty("obstacle").into());
        }

        let difficulty = Difficulty::for_distance(0.0, &tuning.difficulty);
        let player = Player::new(&tuning.player, viewport);
        log::info!(
            "Session started: seed {seed}, viewport {}x{}",
            viewport.width,
            viewport.height
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            obstacle_variants,
            frame: 0,
            score: 0,
            distance: 0.0,
            level: difficulty.level,
            base_speed: difficulty.base_speed,
            game_speed: difficulty.base_speed,
            spawn_frequency: difficulty.spawn_frequency,
            phase: GamePhase::Running,
            player,
            obstacles: Pool::new(),
            coins: Pool::new(),
            magnet: MagnetEffect::default(),
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Reinitialize everything under a new seed drawn from the current RNG
    pub fn restart(&mut self) {
        let seed = self.rng.random();
        self.restart_with_seed(seed);
    }

    /// Reinitialize everything under `seed`, keeping tuning and viewport
    pub fn restart_with_seed(&mut self, seed: u64) {
        let difficulty = Difficulty::for_distance(0.0, &self.tuning.difficulty);
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.frame = 0;
        self.score = 0;
        self.distance = 0.0;
        self.level = difficulty.level;
        self.base_speed = difficulty.base_speed;
        self.game_speed = difficulty.base_speed;
        self.spawn_frequency = difficulty.spawn_frequency;
        self.phase = GamePhase::Running;
        self.player = Player::new(&self.tuning.player, self.viewport);
        self.obstacles.clear();
        self.coins.clear();
        self.magnet = MagnetEffect::default();
        self.next_id = 1;
        self.events.push(GameEvent::Restarted { seed });
        log::info!("Session restarted with seed {seed}");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
