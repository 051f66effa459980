//! Menu and game-over buttons
//!
//! The screen layout lives in one table per UI state. Clicks are resolved
//! against that table into [`UiAction`]s; the ones the simulation cares about
//! are folded into the next [`TickInput`].

use glam::Vec2;

use crate::Viewport;
use crate::sim::{GamePhase, Rect, TickInput};

/// Which overlay is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Only the menu button
    Playing,
    /// Pause menu open
    Menu,
    /// Final score with restart/exit
    GameOver,
}

impl From<GamePhase> for UiState {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Running => UiState::Playing,
            GamePhase::Paused => UiState::Menu,
            GamePhase::GameOver => UiState::GameOver,
        }
    }
}

/// What a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Menu (hamburger) button
    TogglePause,
    Resume,
    GoHome,
    Exit,
    Restart,
}

/// A clickable region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub action: UiAction,
    pub rect: Rect,
    pub label: &'static str,
}

const MENU_BUTTON_SIZE: f32 = 50.0;
const MENU_WIDTH: f32 = 190.0;
const MENU_ROW_HEIGHT: f32 = 40.0;
const DIALOG_BUTTON: Vec2 = Vec2::new(90.0, 40.0);

fn button(action: UiAction, label: &'static str, x: f32, y: f32, size: Vec2) -> Button {
    Button {
        action,
        rect: Rect::new(Vec2::new(x, y), size),
        label,
    }
}

/// Buttons visible in `state`, in draw order
pub fn buttons(state: UiState, viewport: Viewport) -> Vec<Button> {
    let w = viewport.width;
    let h = viewport.height;
    let menu_button = button(
        UiAction::TogglePause,
        "☰",
        w - 60.0,
        10.0,
        Vec2::splat(MENU_BUTTON_SIZE),
    );

    match state {
        UiState::Playing => vec![menu_button],
        UiState::Menu => {
            let row = Vec2::new(MENU_WIDTH, MENU_ROW_HEIGHT);
            let items = [
                (UiAction::Resume, "Resume"),
                (UiAction::GoHome, "Go to Home"),
                (UiAction::Exit, "Exit"),
            ];
            let mut all = vec![menu_button];
            for (i, (action, label)) in items.into_iter().enumerate() {
                all.push(button(action, label, w - 200.0, 60.0 + i as f32 * MENU_ROW_HEIGHT, row));
            }
            all
        }
        UiState::GameOver => vec![
            button(UiAction::Restart, "Restart", w / 2.0 - 100.0, h / 2.0 + 20.0, DIALOG_BUTTON),
            button(UiAction::Exit, "Exit", w / 2.0 + 10.0, h / 2.0 + 20.0, DIALOG_BUTTON),
        ],
    }
}

/// Action under `point`, if any
pub fn hit_test(state: UiState, viewport: Viewport, point: Vec2) -> Option<UiAction> {
    buttons(state, viewport)
        .into_iter()
        .find(|b| b.rect.contains(point))
        .map(|b| b.action)
}

/// Fold a simulation-facing action into `input`.
///
/// Returns the action back when it has to be handled by the page instead
/// (navigation, exit).
pub fn apply(action: UiAction, state: UiState, input: &mut TickInput) -> Option<UiAction> {
    match action {
        UiAction::TogglePause => input.toggle_pause = true,
        UiAction::Resume => {
            if state == UiState::Menu {
                input.toggle_pause = true;
            }
        }
        UiAction::Restart => input.restart = true,
        UiAction::GoHome | UiAction::Exit => return Some(action),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0)
    }

    #[test]
    fn test_menu_button_always_there_while_playing() {
        assert_eq!(
            hit_test(UiState::Playing, viewport(), Vec2::new(965.0, 30.0)),
            Some(UiAction::TogglePause)
        );
        assert_eq!(hit_test(UiState::Playing, viewport(), Vec2::new(500.0, 400.0)), None);
        // Menu rows aren't clickable until the menu is open
        assert_eq!(hit_test(UiState::Playing, viewport(), Vec2::new(850.0, 80.0)), None);
    }

    #[test]
    fn test_menu_rows() {
        let vp = viewport();
        assert_eq!(hit_test(UiState::Menu, vp, Vec2::new(850.0, 80.0)), Some(UiAction::Resume));
        assert_eq!(hit_test(UiState::Menu, vp, Vec2::new(850.0, 120.0)), Some(UiAction::GoHome));
        assert_eq!(hit_test(UiState::Menu, vp, Vec2::new(850.0, 160.0)), Some(UiAction::Exit));
        // Row boundary belongs to neither row
        assert_eq!(hit_test(UiState::Menu, vp, Vec2::new(850.0, 100.0)), None);
    }

    #[test]
    fn test_game_over_buttons() {
        let vp = viewport();
        assert_eq!(hit_test(UiState::GameOver, vp, Vec2::new(450.0, 440.0)), Some(UiAction::Restart));
        assert_eq!(hit_test(UiState::GameOver, vp, Vec2::new(550.0, 440.0)), Some(UiAction::Exit));
        assert_eq!(hit_test(UiState::GameOver, vp, Vec2::new(965.0, 30.0)), None);
    }

    #[test]
    fn test_apply_maps_to_intents() {
        let mut input = TickInput::default();
        assert_eq!(apply(UiAction::TogglePause, UiState::Playing, &mut input), None);
        assert!(input.toggle_pause);

        let mut input = TickInput::default();
        apply(UiAction::Resume, UiState::Playing, &mut input);
        assert!(!input.toggle_pause);

        let mut input = TickInput::default();
        apply(UiAction::Restart, UiState::GameOver, &mut input);
        assert!(input.restart);

        let mut input = TickInput::default();
        assert_eq!(apply(UiAction::Exit, UiState::Menu, &mut input), Some(UiAction::Exit));
    }

    #[test]
    fn test_ui_state_from_phase() {
        assert_eq!(UiState::from(GamePhase::Paused), UiState::Menu);
        assert_eq!(UiState::from(GamePhase::GameOver), UiState::GameOver);
    }
}
