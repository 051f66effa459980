//! Keyboard and touch input
//!
//! Held directions persist until released; jump, pause and restart are
//! edge-triggered and consumed by [`InputState::take_tick_input`].

use glam::Vec2;

use crate::Settings;
use crate::Viewport;
use crate::sim::TickInput;
use crate::ui::{self, UiAction, UiState};

/// Accumulated input between simulation ticks
#[derive(Debug, Clone)]
pub struct InputState {
    move_x: f32,
    move_y: f32,
    jump: bool,
    toggle_pause: bool,
    restart: bool,

    /// Where the current finger went down; swipes are measured from here
    touch: Option<Vec2>,
    /// Time (ms) of the previous tap on the pause button
    last_pause_tap: Option<f64>,

    swipe_vertical: f32,
    swipe_horizontal: f32,
    double_tap_ms: f64,
}

impl InputState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            move_x: 0.0,
            move_y: 0.0,
            jump: false,
            toggle_pause: false,
            restart: false,
            touch: None,
            last_pause_tap: None,
            swipe_vertical: settings.swipe_vertical,
            swipe_horizontal: settings.swipe_horizontal,
            double_tap_ms: settings.double_tap_ms,
        }
    }

    /// Handle a `keydown`. Returns false for keys the game doesn't use.
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "ArrowRight" | "d" | "D" => self.move_x = 1.0,
            "ArrowLeft" | "a" | "A" => self.move_x = -1.0,
            "ArrowUp" | "w" | "W" => self.move_y = -1.0,
            "ArrowDown" | "s" | "S" => self.move_y = 1.0,
            " " => self.jump = true,
            "Escape" => self.toggle_pause = true,
            "Enter" => self.restart = true,
            _ => return false,
        }
        true
    }

    /// Handle a `keyup`: releasing any key of an axis stops that axis
    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            "ArrowRight" | "d" | "D" | "ArrowLeft" | "a" | "A" => self.move_x = 0.0,
            "ArrowUp" | "w" | "W" | "ArrowDown" | "s" | "S" => self.move_y = 0.0,
            _ => return false,
        }
        true
    }

    /// Finger down at `point` (canvas coordinates).
    ///
    /// Buttons react to a single tap, except the menu button which needs a
    /// double tap so swipes starting in the corner don't pause the game.
    pub fn touch_start(
        &mut self,
        point: Vec2,
        now_ms: f64,
        state: UiState,
        viewport: Viewport,
    ) -> Option<UiAction> {
        self.touch = Some(point);

        match ui::hit_test(state, viewport, point) {
            Some(UiAction::TogglePause) => {
                let double = self
                    .last_pause_tap
                    .is_some_and(|last| now_ms - last < self.double_tap_ms);
                if double {
                    self.last_pause_tap = None;
                    self.apply_ui(UiAction::TogglePause, state)
                } else {
                    self.last_pause_tap = Some(now_ms);
                    None
                }
            }
            Some(action) => self.apply_ui(action, state),
            None => None,
        }
    }

    /// Finger moved. The swipe spans from the touch origin to `point`;
    /// vertical swipes win over horizontal ones.
    pub fn touch_move(&mut self, point: Vec2) {
        let Some(start) = self.touch else {
            return;
        };
        let dx = point.x - start.x;
        // Screen y grows downward; positive means the finger went up
        let dy = start.y - point.y;

        if dy.abs() > self.swipe_vertical {
            if dy > 0.0 {
                self.move_y = -1.0;
                self.jump = true;
            } else {
                self.move_y = 1.0;
            }
        } else if dx.abs() > self.swipe_horizontal {
            self.move_x = dx.signum();
        }
    }

    /// Finger lifted: horizontal movement stops
    pub fn touch_end(&mut self) {
        self.touch = None;
        self.move_x = 0.0;
    }

    /// Fold a button press into pending input. Page-level actions
    /// (home, exit) are handed back to the caller.
    pub fn apply_ui(&mut self, action: UiAction, state: UiState) -> Option<UiAction> {
        let mut pending = TickInput::default();
        let passthrough = ui::apply(action, state, &mut pending);
        self.toggle_pause |= pending.toggle_pause;
        self.restart |= pending.restart;
        passthrough
    }

    /// Input for the next tick. Edge-triggered flags are cleared.
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_x: self.move_x,
            move_y: self.move_y,
            jump: self.jump,
            toggle_pause: self.toggle_pause,
            restart: self.restart,
        };
        self.jump = false;
        self.toggle_pause = false;
        self.restart = false;
        input
    }

    /// Drop all held and pending input (focus loss, restart)
    pub fn clear(&mut self) {
        self.move_x = 0.0;
        self.move_y = 0.0;
        self.jump = false;
        self.toggle_pause = false;
        self.restart = false;
        self.touch = None;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
