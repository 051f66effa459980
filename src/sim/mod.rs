//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One tick per frame, fixed component order
//! - Seeded RNG only
//! - Entities owned exclusively by `GameState`

pub mod collision;
pub mod difficulty;
pub mod geom;
pub mod magnet;
pub mod physics;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, resolve};
pub use difficulty::{Difficulty, level_for_distance};
pub use geom::Rect;
pub use magnet::MagnetEffect;
pub use physics::MoveIntent;
pub use pool::{Entity, Pool};
pub use state::{Coin, CoinKind, GameEvent, GamePhase, GameState, Obstacle, Player};
pub use tick::{TickInput, tick};
