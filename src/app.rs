//! Application state
//!
//! Two screens: the start screen, then runs back to back. The run screen
//! handles its own restarts from the game-over panel.

use macroquad::logging::info;

use crate::config::RushConfig;
use crate::game::runtime::next_seed;
use crate::game::{draw_run, RunState, View};
use crate::input::{FrameInput, InputState};
use crate::landing::draw_landing;

/// The available screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Run,
}

/// Main application state
pub struct AppState {
    pub screen: Screen,
    pub config: RushConfig,
    /// The current run, once one has started
    pub run: Option<RunState>,
    pub input: InputState,
    /// Seconds since launch, for start screen animation
    pub time: f32,
    seed: u64,
}

impl AppState {
    pub fn new(config: RushConfig, seed: u64) -> Self {
        Self {
            screen: Screen::Start,
            config,
            run: None,
            input: InputState::new(),
            time: 0.0,
            seed,
        }
    }

    /// Advance one frame with already-polled input
    pub fn update(&mut self, input: &FrameInput, delta_time: f32) {
        self.time += delta_time;

        match self.screen {
            Screen::Start => {
                if input.jump_pressed {
                    self.seed = next_seed(self.seed);
                    self.run = Some(RunState::new(self.config, self.seed));
                    self.screen = Screen::Run;
                    info!("leaving start screen");
                }
            }
            Screen::Run => {
                if let Some(run) = self.run.as_mut() {
                    run.handle_input(input);
                    run.tick(delta_time);
                }
            }
        }
    }

    /// Poll input and advance one frame
    pub fn frame(&mut self, delta_time: f32) {
        let input = self.input.poll();
        self.update(&input, delta_time);
    }

    pub fn draw(&self) {
        let view = View::for_window(self.config.screen.width, self.config.screen.height);
        match (self.screen, self.run.as_ref()) {
            (Screen::Run, Some(run)) => draw_run(run, &view),
            _ => draw_landing(&view, self.time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_screen_waits_for_jump() {
        let mut app = AppState::new(RushConfig::default(), 1);
        app.update(&FrameInput::default(), 0.016);
        assert_eq!(app.screen, Screen::Start);
        assert!(app.run.is_none());

        app.update(&FrameInput::press(), 0.016);
        assert_eq!(app.screen, Screen::Run);
        let run = app.run.as_ref().unwrap();
        assert!(run.state.is_alive);
        // The starting press is not also a jump
        assert!(run.runner.grounded);
    }

    #[test]
    fn test_run_screen_ticks() {
        let mut app = AppState::new(RushConfig::default(), 1);
        app.update(&FrameInput::press(), 0.016);
        app.update(&FrameInput::default(), 0.05);
        assert!(app.run.as_ref().unwrap().state.distance > 0.0);
    }
}
