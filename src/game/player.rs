//! Runner Controller
//!
//! The runner never moves horizontally; it only jumps. Jump states:
//!
//! - Grounded (`jump_count == 0`)
//! - First jump (`jump_count == 1`): may get the hold bonus, may double jump
//! - Double jump (`jump_count == 2`)
//!
//! Landing is the only way back to grounded.

use macroquad::math::{Rect, Vec2};

use super::components::{palette, Rgb};
use super::entity::Entity;
use super::state::GameState;
use crate::config::{PlayerSettings, RushConfig};

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    FirstJump,
    DoubleJump,
}

#[derive(Debug, Clone)]
pub struct Runner {
    /// Center of the runner's rectangle
    pub position: Vec2,
    pub size: Vec2,
    /// Vertical velocity, positive is down
    pub velocity_y: f32,
    pub grounded: bool,
    pub jump_count: u8,
    /// Clock time of the last grounded jump
    jump_started_at: f32,
    /// Space is still held since the grounded jump
    jump_held: bool,
    high_jump_used: bool,
    pub tint: Rgb,
    /// The shield bubble, while a shield is up
    pub shield: Option<Entity>,
    ground_top: f32,
}

impl Runner {
    /// A runner standing on the ground
    pub fn new(config: &RushConfig) -> Self {
        let settings = &config.player;
        let ground_top = config.screen.ground_top();
        Self {
            position: Vec2::new(settings.x, ground_top - settings.height * 0.5),
            size: Vec2::new(settings.width, settings.height),
            velocity_y: 0.0,
            grounded: true,
            jump_count: 0,
            jump_started_at: 0.0,
            jump_held: false,
            high_jump_used: false,
            tint: palette::RUNNER,
            shield: None,
            ground_top,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x - self.size.x * 0.5,
            self.position.y - self.size.y * 0.5,
            self.size.x,
            self.size.y,
        )
    }

    #[cfg(test)]
    pub fn phase(&self) -> JumpPhase {
        match self.jump_count {
            0 => JumpPhase::Grounded,
            1 => JumpPhase::FirstJump,
            _ => JumpPhase::DoubleJump,
        }
    }

    /// Handle a jump press. Returns true if a jump happened.
    pub fn request_jump(&mut self, now: f32, state: &mut GameState, settings: &PlayerSettings) -> bool {
        if self.grounded {
            self.jump_started_at = now;
            self.jump_held = true;
            self.high_jump_used = false;
            self.velocity_y = -settings.jump_force;
            self.grounded = false;
            self.jump_count = 1;
            state.can_double_jump = state.double_jump;
            true
        } else if state.can_double_jump && self.jump_count == 1 {
            self.velocity_y = -settings.jump_force;
            self.jump_count = 2;
            state.can_double_jump = false;
            true
        } else {
            false
        }
    }

    /// Space (or touch) released
    pub fn release_jump(&mut self) {
        self.jump_held = false;
    }

    /// While the key stays down inside the hold window, boost the first
    /// jump once up to the high jump force.
    pub fn apply_hold(&mut self, now: f32, key_down: bool, settings: &PlayerSettings) {
        if !key_down || !self.jump_held || self.high_jump_used || self.jump_count != 1 {
            return;
        }
        let held_for = now - self.jump_started_at;
        let (start, end) = settings.high_jump_window;
        if held_for > start && held_for < end {
            self.velocity_y -= settings.high_jump_force - settings.jump_force;
            self.high_jump_used = true;
        }
    }

    /// Gravity and ground contact
    pub fn integrate(&mut self, dt: f32, settings: &PlayerSettings) {
        self.velocity_y += settings.gravity * dt;
        self.position.y += self.velocity_y * dt;

        let half_height = self.size.y * 0.5;
        if self.position.y + half_height >= self.ground_top && self.velocity_y >= 0.0 {
            self.position.y = self.ground_top - half_height;
            self.velocity_y = 0.0;
            self.grounded = true;
            self.jump_count = 0;
        } else {
            self.grounded = false;
        }
    }
}
