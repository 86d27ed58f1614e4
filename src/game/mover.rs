//! Entity Mover
//!
//! Scrolling entities do not keep the velocity they spawned with: speed
//! changes every frame, so each tick retargets every velocity from the
//! current speed before positions integrate.

use macroquad::math::Vec2;

use super::components::{EntityKind, Rgb};
use super::player::Runner;
use super::state::GameState;
use super::world::World;
use crate::config::RushConfig;

/// Leftward speed of one entity kind at the given scroll speed
pub fn scroll_speed_for(kind: &EntityKind, speed: f32, config: &RushConfig) -> f32 {
    match kind {
        EntityKind::Bullet => speed + config.speed.bullet_extra,
        EntityKind::Building { .. } => speed * config.speed.building_parallax,
        EntityKind::Shield => 0.0,
        _ => speed,
    }
}

/// Re-assert every scrolling velocity from the current speed
pub fn retarget_velocities(world: &mut World, speed: f32, config: &RushConfig) {
    for (entity, kind) in world.kinds.iter() {
        if !kind.category().scrolls() {
            continue;
        }
        if let Some(velocity) = world.velocities.get_mut(entity) {
            velocity.0 = Vec2::new(-scroll_speed_for(kind, speed, config), 0.0);
        }
    }
}

/// Bob pickups up and down, pull coins in with the magnet, cycle building
/// colors during color rush.
pub fn animate(world: &mut World, state: &GameState, runner: &Runner, dt: f32, config: &RushConfig) {
    let rush_tint = state.color_rush.then(|| rainbow(state.clock));
    let magnet = &config.effects;

    for (entity, kind) in world.kinds.iter_mut() {
        let Some(body) = world.bodies.get_mut(entity) else { continue };
        match kind {
            EntityKind::PowerUp { float_phase, .. } => {
                *float_phase += dt * 3.0;
                body.position.y += float_phase.sin() * 2.0;
            }
            EntityKind::Coin { float_phase } => {
                *float_phase += dt * 4.0;
                body.position.y += float_phase.sin() * 1.5;

                if state.magnet_active {
                    let offset = runner.position - body.position;
                    let dist = offset.length();
                    if dist > 0.0 && dist < magnet.magnet_radius {
                        body.position += offset / dist * magnet.magnet_pull * dt;
                    }
                }
            }
            EntityKind::Building { tint } => {
                if let Some(color) = rush_tint {
                    *tint = color;
                }
            }
            _ => {}
        }
    }
}

/// Color rush building color at a point in time
pub fn rainbow(time: f32) -> Rgb {
    let t = time * 3.0;
    let channel = |offset: f32| ((t + offset).sin().abs() * 255.0) as u8;
    [channel(0.0), channel(2.0), channel(4.0)]
}

/// Apply velocities to positions
pub fn integrate(world: &mut World, dt: f32) {
    for (entity, velocity) in world.velocities.iter() {
        if let Some(body) = world.bodies.get_mut(entity) {
            body.position += velocity.0 * dt;
        }
    }
}

/// Keep the shield bubble on the runner
pub fn sync_shield(world: &mut World, runner: &Runner) {
    if let Some(shield) = runner.shield {
        if let Some(body) = world.bodies.get_mut(shield) {
            body.position = runner.position;
        }
    }
}

/// Destroy everything that scrolled fully past the left edge
pub fn cull_offscreen(world: &mut World) {
    let gone: Vec<_> = world
        .bodies
        .iter()
        .filter(|(_, body)| body.right() < 0.0)
        .map(|(entity, _)| entity)
        .collect();
    for entity in gone {
        world.despawn(entity);
    }
}
