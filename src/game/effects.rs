//! Power-up Effects
//!
//! Turning effects on (from pickups or a full adrenaline meter) and back off
//! when their timers run out. Each effect owns exactly one flag in
//! `GameState`; effects never combine, a second pickup of the same kind
//! just restarts its timer.

use super::components::{palette, PowerUpKind};
use super::event::{Events, RunEvent};
use super::player::Runner;
use super::state::GameState;
use super::timers::{Effect, EffectTimers};
use super::world::World;
use crate::config::RushConfig;

/// Put a shield bubble on the runner, replacing any existing one
pub fn raise_shield(state: &mut GameState, world: &mut World, runner: &mut Runner) {
    if let Some(old) = runner.shield.take() {
        world.despawn(old);
    }
    runner.shield = Some(world.spawn_shield(runner.position));
    state.has_shield = true;
}

/// Pop the shield. Safe to call with no shield up.
pub fn drop_shield(state: &mut GameState, world: &mut World, runner: &mut Runner) {
    if let Some(shield) = runner.shield.take() {
        world.despawn(shield);
    }
    state.has_shield = false;
}

fn start(effect: Effect, state: &GameState, timers: &mut EffectTimers, config: &RushConfig) {
    timers.schedule(effect, state.clock, effect.duration(&config.effects));
}

/// Apply a collected power-up
pub fn activate_power_up(
    kind: PowerUpKind,
    state: &mut GameState,
    world: &mut World,
    runner: &mut Runner,
    timers: &mut EffectTimers,
    config: &RushConfig,
) {
    match kind {
        PowerUpKind::Shield => raise_shield(state, world, runner),
        PowerUpKind::HyperRush => {
            state.hyper_rush = true;
            runner.tint = palette::RUNNER_HYPER;
            start(Effect::HyperRush, state, timers, config);
        }
        PowerUpKind::SlowMotion => {
            // A refresh keeps the speed from before the first pickup
            if !state.slow_motion {
                state.speed_before_slow_motion = Some(state.speed);
                state.speed *= config.speed.slow_motion_factor;
                state.slow_motion = true;
            }
            world.tint_buildings(palette::BUILDING_SLOW);
            start(Effect::SlowMotion, state, timers, config);
        }
        PowerUpKind::Magnet => {
            state.magnet_active = true;
            start(Effect::Magnet, state, timers, config);
        }
        PowerUpKind::DoubleJump => {
            state.double_jump = true;
            start(Effect::DoubleJump, state, timers, config);
        }
    }
}

/// Start color rush if the meter is full. Returns true if it started.
pub fn try_start_color_rush(
    state: &mut GameState,
    timers: &mut EffectTimers,
    config: &RushConfig,
    events: &mut Events,
) -> bool {
    if state.adrenaline < 100.0 || state.color_rush {
        return false;
    }
    state.color_rush = true;
    state.adrenaline = 0.0;
    start(Effect::ColorRush, state, timers, config);
    events.run.send(RunEvent::ColorRushStarted);
    true
}

/// Undo one effect
pub fn revert(effect: Effect, state: &mut GameState, world: &mut World, runner: &mut Runner) {
    match effect {
        Effect::HyperRush => {
            state.hyper_rush = false;
            if state.is_alive {
                runner.tint = palette::RUNNER;
            }
        }
        Effect::SlowMotion => {
            state.slow_motion = false;
            if let Some(speed) = state.speed_before_slow_motion.take() {
                state.speed = speed;
            }
        }
        Effect::Magnet => state.magnet_active = false,
        Effect::DoubleJump => state.double_jump = false,
        Effect::ColorRush => {
            state.color_rush = false;
            world.tint_buildings(palette::BUILDING);
        }
    }
}

/// Revert every effect whose timer ran out
pub fn expire_effects(
    state: &mut GameState,
    world: &mut World,
    runner: &mut Runner,
    timers: &mut EffectTimers,
    events: &mut Events,
) {
    for effect in timers.expire(state.clock) {
        revert(effect, state, world, runner);
        events.run.send(RunEvent::EffectExpired(effect));
    }
}
