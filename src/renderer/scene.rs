//! Draw command generation
//!
//! Back to front: background, obstacles, pickups, player, HUD, overlays.

use glam::Vec2;

use super::{FrameView, hud_line};
use crate::consts::FRAME_RATE;
use crate::sim::{CoinKind, GamePhase, Rect};
use crate::ui::{self, UiAction, UiState};

/// Loaded image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background(usize),
    Character,
    Coin,
    Magnet,
    Obstacle(usize),
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Image { sprite: Sprite, rect: Rect },
    Fill { rect: Rect, color: &'static str },
    Text {
        text: String,
        pos: Vec2,
        size: u32,
        color: &'static str,
    },
}

const HUD_FONT: u32 = 25;
const MENU_FONT: u32 = 20;
const TITLE_FONT: u32 = 30;

const PANEL: &str = "rgba(0, 0, 0, 0.7)";
const BUTTON: &str = "rgba(255, 255, 255, 0.5)";
const WHITE: &str = "white";

fn text(text: impl Into<String>, x: f32, y: f32, size: u32, color: &'static str) -> DrawCmd {
    DrawCmd::Text {
        text: text.into(),
        pos: Vec2::new(x, y),
        size,
        color,
    }
}

/// Build the full command list for a frame
pub fn build_scene(view: &FrameView) -> Vec<DrawCmd> {
    let vp = view.viewport;
    let mut cmds = Vec::with_capacity(view.obstacles.len() + view.coins.len() + 16);

    cmds.push(DrawCmd::Image {
        sprite: Sprite::Background(view.background),
        rect: Rect::new(Vec2::ZERO, vp.size()),
    });

    for o in view.obstacles {
        cmds.push(DrawCmd::Image {
            sprite: Sprite::Obstacle(o.variant),
            rect: Rect::new(o.pos, o.size),
        });
    }

    for c in view.coins {
        let sprite = match c.kind {
            CoinKind::Coin => Sprite::Coin,
            CoinKind::Magnet => Sprite::Magnet,
        };
        cmds.push(DrawCmd::Image {
            sprite,
            rect: Rect::new(c.pos, Vec2::splat(c.size)),
        });
    }

    cmds.push(DrawCmd::Image {
        sprite: Sprite::Character,
        rect: view.player.bounds(),
    });

    cmds.push(text(hud_line(view.score, view.distance, view.level), 10.0, 30.0, HUD_FONT, WHITE));
    if view.magnet_remaining > 0 {
        let secs = view.magnet_remaining.div_ceil(FRAME_RATE);
        cmds.push(text(format!("Magnet: {secs}s"), 10.0, 60.0, MENU_FONT, WHITE));
    }
    if let Some(fps) = view.fps {
        cmds.push(text(format!("{fps} FPS"), 10.0, vp.height - 10.0, MENU_FONT, WHITE));
    }

    let state = UiState::from(view.phase);
    if view.phase == GamePhase::GameOver {
        cmds.push(DrawCmd::Fill {
            rect: Rect::new(Vec2::ZERO, vp.size()),
            color: PANEL,
        });
        let cx = vp.width / 2.0;
        let cy = vp.height / 2.0;
        cmds.push(text("Game Over", cx - 70.0, cy - 50.0, TITLE_FONT, WHITE));
        cmds.push(text(format!("Final Score: {}", view.score), cx - 80.0, cy, TITLE_FONT, WHITE));
    }
    if state == UiState::Menu {
        // Panel behind the menu rows
        cmds.push(DrawCmd::Fill {
            rect: Rect::new(Vec2::new(vp.width - 200.0, 60.0), Vec2::new(190.0, 130.0)),
            color: PANEL,
        });
    }

    for button in ui::buttons(state, vp) {
        let r = button.rect;
        match button.action {
            UiAction::TogglePause => {
                cmds.push(DrawCmd::Fill { rect: r, color: BUTTON });
                cmds.push(text(button.label, r.left() + 10.0, r.top() + 35.0, TITLE_FONT, "black"));
            }
            UiAction::Restart | UiAction::Exit if state == UiState::GameOver => {
                let color = if button.action == UiAction::Restart { "green" } else { "red" };
                cmds.push(DrawCmd::Fill { rect: r, color });
                cmds.push(text(button.label, r.left() + 15.0, r.top() + 25.0, MENU_FONT, WHITE));
            }
            _ => {
                cmds.push(text(button.label, r.left() + 20.0, r.top() + 28.0, MENU_FONT, WHITE));
            }
        }
    }

    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameView;
    use crate::sim::{GameState, Obstacle};
    use crate::{Tuning, Viewport};

    fn state() -> GameState {
        GameState::new(5, Tuning::default(), Viewport::new(800.0, 600.0), 3).unwrap()
    }

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_layering() {
        let mut state = state();
        state.obstacles.push(Obstacle {
            id: 1,
            pos: Vec2::new(10.0, 20.0),
            size: Vec2::new(50.0, 50.0),
            variant: 2,
        });
        let cmds = build_scene(&FrameView::new(&state, 7));

        assert_eq!(
            cmds[0],
            DrawCmd::Image {
                sprite: Sprite::Background(0),
                rect: Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0)),
            }
        );
        let obstacle = cmds
            .iter()
            .position(|c| matches!(c, DrawCmd::Image { sprite: Sprite::Obstacle(2), .. }));
        let player = cmds
            .iter()
            .position(|c| matches!(c, DrawCmd::Image { sprite: Sprite::Character, .. }));
        assert!(obstacle < player);
    }

    #[test]
    fn test_running_shows_hud_and_menu_button() {
        let state = state();
        let cmds = build_scene(&FrameView::new(&state, 7));
        let texts = texts(&cmds);
        assert!(texts.contains(&"Score: 0  Distance: 0m  Level: 1"));
        assert!(texts.contains(&"☰"));
        assert!(!texts.contains(&"Resume"));
    }

    #[test]
    fn test_paused_shows_menu() {
        let mut state = state();
        state.phase = GamePhase::Paused;
        let cmds = build_scene(&FrameView::new(&state, 7));
        let texts = texts(&cmds);
        assert!(texts.contains(&"Resume"));
        assert!(texts.contains(&"Go to Home"));
        assert!(texts.contains(&"Exit"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = state();
        state.score = 120;
        state.phase = GamePhase::GameOver;
        let cmds = build_scene(&FrameView::new(&state, 7));
        let texts = texts(&cmds);
        assert!(texts.contains(&"Game Over"));
        assert!(texts.contains(&"Final Score: 120"));
        assert!(texts.contains(&"Restart"));
        assert!(!texts.contains(&"☰"));
    }

    #[test]
    fn test_magnet_timer_in_seconds() {
        let mut state = state();
        state.magnet.activate(61);
        let cmds = build_scene(&FrameView::new(&state, 7));
        assert!(texts(&cmds).contains(&"Magnet: 2s"));
    }
}
