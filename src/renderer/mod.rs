//! Canvas rendering module
//!
//! The simulation is drawn from a read-only [`FrameView`]. [`scene`] turns a
//! view into a flat list of draw commands; the browser backend replays them
//! on a 2D canvas context.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{DrawCmd, Sprite, build_scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::Viewport;
use crate::sim::{Coin, GamePhase, GameState, Obstacle, Player};

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub viewport: Viewport,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub coins: &'a [Coin],
    pub score: u64,
    pub distance: f32,
    pub level: u32,
    pub phase: GamePhase,
    /// Frames of magnet left (0 when inactive)
    pub magnet_remaining: u32,
    /// Background layer for the current level
    pub background: usize,
    pub fps: Option<u32>,
}

impl<'a> FrameView<'a> {
    /// Snapshot `state`; `background_layers` is the number of loaded backgrounds
    pub fn new(state: &'a GameState, background_layers: usize) -> Self {
        Self {
            viewport: state.viewport,
            player: &state.player,
            obstacles: state.obstacles.as_slice(),
            coins: state.coins.as_slice(),
            score: state.score,
            distance: state.distance,
            level: state.level,
            phase: state.phase,
            magnet_remaining: if state.magnet.active { state.magnet.remaining } else { 0 },
            background: background_index(state.level, background_layers),
            fps: None,
        }
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }
}

/// Background layer for a 1-indexed level, cycling through `layers`
pub fn background_index(level: u32, layers: usize) -> usize {
    if layers == 0 {
        return 0;
    }
    level.saturating_sub(1) as usize % layers
}

/// Score line shown at the top left
pub fn hud_line(score: u64, distance: f32, level: u32) -> String {
    format!(
        "Score: {score}  Distance: {}m  Level: {level}",
        distance.max(0.0).floor() as u64
    )
}

/// Something that can replay a frame's draw commands
pub trait Renderer {
    fn draw(&mut self, commands: &[DrawCmd]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_hud_line_floors_distance() {
        assert_eq!(hud_line(30, 123.9, 1), "Score: 30  Distance: 123m  Level: 1");
        assert_eq!(hud_line(0, 0.0, 1), "Score: 0  Distance: 0m  Level: 1");
    }

    #[test]
    fn test_background_cycles() {
        assert_eq!(background_index(1, 7), 0);
        assert_eq!(background_index(7, 7), 6);
        assert_eq!(background_index(8, 7), 0);
        assert_eq!(background_index(3, 0), 0);
    }

    #[test]
    fn test_view_tracks_state() {
        let mut state = GameState::new(1, Tuning::default(), Viewport::new(800.0, 600.0), 3).unwrap();
        state.level = 9;
        state.magnet.activate(100);
        let view = FrameView::new(&state, 7);
        assert_eq!(view.background, 1);
        assert_eq!(view.magnet_remaining, 100);
        assert_eq!(view.fps, None);
        assert_eq!(view.with_fps(58).fps, Some(58));
    }
}
