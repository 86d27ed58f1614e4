//! Input state management
//!
//! Polls keyboard, mouse and touch (macroquad) once per frame and folds them
//! into a `FrameInput` the game logic can consume without touching
//! macroquad's global input state.

use macroquad::prelude::*;

/// Jump input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Space, click or tap went down this frame
    pub jump_pressed: bool,
    /// Space is held down
    pub jump_held: bool,
    /// Space went up or a touch ended this frame
    pub jump_released: bool,
}

impl FrameInput {
    /// A single press, as in tests and scripted input
    #[cfg(test)]
    pub fn press() -> Self {
        Self {
            jump_pressed: true,
            jump_held: true,
            jump_released: false,
        }
    }

    #[cfg(test)]
    pub fn release() -> Self {
        Self {
            jump_pressed: false,
            jump_held: false,
            jump_released: true,
        }
    }
}

/// Reads macroquad's input state
pub struct InputState;

impl InputState {
    pub fn new() -> Self {
        Self
    }

    /// Call once per frame before updating the game
    pub fn poll(&self) -> FrameInput {
        let touches = touches();
        let touch_started = touches.iter().any(|t| t.phase == TouchPhase::Started);
        let touch_ended = touches
            .iter()
            .any(|t| matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled));

        FrameInput {
            jump_pressed: is_key_pressed(KeyCode::Space)
                || is_mouse_button_pressed(MouseButton::Left)
                || touch_started,
            jump_held: is_key_down(KeyCode::Space),
            jump_released: is_key_released(KeyCode::Space) || touch_ended,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
