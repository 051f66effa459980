//! Best-effort score submission
//!
//! When a run ends the final score and the player's name are handed to a
//! [`ScoreSink`]. A failing sink is logged and otherwise ignored; it never
//! feeds back into the session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{GamePhase, GameState};

/// Persistence failures
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: u64,
    /// Whole meters traveled
    pub distance: u32,
    pub level: u32,
}

impl ScoreSubmission {
    /// Build a submission from a finished session (None while still playing)
    pub fn from_state(state: &GameState, name: &str) -> Option<Self> {
        if state.phase != GamePhase::GameOver {
            return None;
        }
        Some(Self {
            name: name.trim().to_string(),
            score: state.score,
            distance: state.distance.max(0.0).floor() as u32,
            level: state.level,
        })
    }
}

/// Anything that can store a final score
pub trait ScoreSink {
    fn submit(&mut self, submission: &ScoreSubmission) -> Result<(), PersistError>;
}

/// Submit the final score of a finished session, logging any failure
pub fn submit_final_score<S: ScoreSink + ?Sized>(sink: &mut S, state: &GameState, name: &str) {
    let Some(submission) = ScoreSubmission::from_state(state, name) else {
        log::debug!("Score submission skipped: run still in progress");
        return;
    };
    match sink.submit(&submission) {
        Ok(()) => log::info!("Submitted score {} for {}", submission.score, submission.name),
        Err(e) => log::warn!("Score submission failed: {e}"),
    }
}
