//! Run State
//!
//! Score, speed, meters and power-up flags for one run. Built fresh by
//! `GameState::reset` every time a run starts; nothing carries over.

use crate::config::RushConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Displayed score: distance points plus `bonus`
    pub score: u32,
    /// Meters travelled
    pub distance: f32,
    /// Current scroll speed (units per second)
    pub speed: f32,
    pub is_alive: bool,

    pub has_shield: bool,
    pub hyper_rush: bool,
    pub slow_motion: bool,
    pub magnet_active: bool,
    pub double_jump: bool,
    pub color_rush: bool,
    /// Armed on a grounded jump while double jump is active; spent on use
    pub can_double_jump: bool,

    /// 0..=100; a full meter starts color rush
    pub adrenaline: f32,
    pub coins: u32,
    /// Points from pickups and smashes
    pub bonus: u32,
    /// Speed to restore when slow motion runs out
    pub speed_before_slow_motion: Option<f32>,
    /// Seconds since the run started
    pub clock: f32,
}

impl GameState {
    pub fn reset(config: &RushConfig) -> Self {
        Self {
            score: 0,
            distance: 0.0,
            speed: config.speed.base,
            is_alive: true,
            has_shield: false,
            hyper_rush: false,
            slow_motion: false,
            magnet_active: false,
            double_jump: false,
            color_rush: false,
            can_double_jump: false,
            adrenaline: 0.0,
            coins: 0,
            bonus: 0,
            speed_before_slow_motion: None,
            clock: 0.0,
        }
    }

    /// Fill the adrenaline meter. Does nothing during color rush.
    pub fn add_adrenaline(&mut self, amount: f32) {
        if !self.color_rush {
            self.adrenaline = (self.adrenaline + amount).clamp(0.0, 100.0);
        }
    }

    pub fn add_bonus(&mut self, points: u32) {
        self.bonus += points;
        self.score += points;
    }

    /// Meters for display
    pub fn meters(&self) -> u32 {
        self.distance.floor() as u32
    }

    /// Speed relative to the starting speed, e.g. 1.5
    pub fn speed_multiplier(&self, base_speed: f32) -> f32 {
        self.speed / base_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_starts_at_base_speed() {
        let config = RushConfig::default();
        let state = GameState::reset(&config);
        assert_eq!(state.speed, 200.0);
        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.adrenaline, 0.0);
    }

    #[test]
    fn test_adrenaline_clamps_and_locks_during_color_rush() {
        let mut state = GameState::reset(&RushConfig::default());
        state.add_adrenaline(95.0);
        state.add_adrenaline(15.0);
        assert_eq!(state.adrenaline, 100.0);

        state.adrenaline = 0.0;
        state.color_rush = true;
        state.add_adrenaline(15.0);
        assert_eq!(state.adrenaline, 0.0);
    }

    #[test]
    fn test_speed_multiplier_display() {
        let mut state = GameState::reset(&RushConfig::default());
        state.speed = 300.0;
        assert_eq!(state.speed_multiplier(200.0), 1.5);
        state.distance = 12.9;
        assert_eq!(state.meters(), 12);
    }
}
