//! Effect Timers
//!
//! Every timed power-up is an entry in one list: which effect, and the game
//! clock time it runs out. The runtime polls `expire` once per tick, so
//! reversals happen synchronously inside the frame like everything else.
//!
//! Entries are stamped with the registry generation. `reset` clears the list
//! and bumps the generation, so nothing scheduled in one run can revert an
//! effect in the next.

use crate::config::EffectSettings;

/// A timed effect that reverts on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    HyperRush,
    SlowMotion,
    Magnet,
    DoubleJump,
    ColorRush,
}

impl Effect {
    pub fn duration(&self, settings: &EffectSettings) -> f32 {
        match self {
            Effect::HyperRush => settings.hyper_rush_secs,
            Effect::SlowMotion => settings.slow_motion_secs,
            Effect::Magnet => settings.magnet_secs,
            Effect::DoubleJump => settings.double_jump_secs,
            Effect::ColorRush => settings.color_rush_secs,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Effect::HyperRush => "Hyper Rush",
            Effect::SlowMotion => "Slow Motion",
            Effect::Magnet => "Magnet",
            Effect::DoubleJump => "Double Jump",
            Effect::ColorRush => "Color Rush",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    effect: Effect,
    expires_at: f32,
    generation: u32,
}

/// Pending effect expirations
#[derive(Debug, Default)]
pub struct EffectTimers {
    pending: Vec<Pending>,
    generation: u32,
}

impl EffectTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `effect` to expire `duration` seconds after `now`.
    /// An effect that is already pending gets its expiry replaced.
    pub fn schedule(&mut self, effect: Effect, now: f32, duration: f32) {
        let expires_at = now + duration;
        let generation = self.generation;
        match self.pending.iter_mut().find(|p| p.effect == effect) {
            Some(existing) => {
                existing.expires_at = expires_at;
                existing.generation = generation;
            }
            None => self.pending.push(Pending { effect, expires_at, generation }),
        }
    }

    /// Remove and return every effect whose time is up, earliest first.
    pub fn expire(&mut self, now: f32) -> Vec<Effect> {
        let generation = self.generation;
        self.pending.retain(|p| p.generation == generation);

        let mut due: Vec<Pending> = self.pending.iter().copied().filter(|p| p.expires_at <= now).collect();
        self.pending.retain(|p| p.expires_at > now);

        due.sort_by(|a, b| a.expires_at.total_cmp(&b.expires_at));
        due.into_iter().map(|p| p.effect).collect()
    }

    #[cfg(test)]
    pub fn is_pending(&self, effect: Effect) -> bool {
        self.pending.iter().any(|p| p.effect == effect && p.generation == self.generation)
    }

    /// Seconds left on an effect (for the HUD)
    pub fn remaining(&self, effect: Effect, now: f32) -> Option<f32> {
        self.pending
            .iter()
            .find(|p| p.effect == effect && p.generation == self.generation)
            .map(|p| (p.expires_at - now).max(0.0))
    }

    /// Drop everything and invalidate the current generation
    pub fn reset(&mut self) {
        self.pending.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    #[cfg(test)]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
