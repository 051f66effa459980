//! Error types
//!
//! The frame tick itself never fails; errors only come from startup
//! (assets, tuning, viewport) and from score persistence.

use thiserror::Error;

pub use crate::assets::AssetError;
pub use crate::persistence::PersistError;
pub use crate::tuning::ConfigError;

/// Top-level error for session creation and startup
#[derive(Error, Debug)]
pub enum GameError {
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("invalid tuning: {0}")]
    Config(#[from] ConfigError),

    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
