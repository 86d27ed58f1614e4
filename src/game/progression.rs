//! Progression
//!
//! Distance, score and speed advance from elapsed time; near misses while
//! airborne feed the adrenaline meter.

use super::components::Category;
use super::event::{Events, RunEvent};
use super::player::Runner;
use super::state::GameState;
use super::world::World;
use crate::config::RushConfig;

/// Score for a distance, counting bonuses
pub fn score_for(distance: f32, color_rush: bool, bonus: u32, config: &RushConfig) -> u32 {
    let rate = if color_rush {
        config.scoring.color_rush_points_per_meter
    } else {
        config.scoring.points_per_meter
    };
    (distance * rate).floor() as u32 + bonus
}

/// Speed on the distance curve
pub fn speed_for(distance: f32, config: &RushConfig) -> f32 {
    (config.speed.base + distance * config.speed.increase_per_meter).min(config.speed.max)
}

/// Advance one frame. No-op once the run is over.
pub fn advance(state: &mut GameState, dt: f32, config: &RushConfig) {
    if !state.is_alive {
        return;
    }

    state.distance += dt * (state.speed / 100.0);
    state.score = score_for(state.distance, state.color_rush, state.bonus, config);

    // Slow motion holds its reduced speed until it expires
    if !state.slow_motion {
        state.speed = speed_for(state.distance, config);
    }
}

/// Grant adrenaline for the first enemy (then obstacle) passing close by
/// while the runner is in the air. At most once per frame.
pub fn detect_close_call(
    state: &mut GameState,
    world: &World,
    runner: &Runner,
    config: &RushConfig,
    events: &mut Events,
) {
    if !state.is_alive || runner.grounded || state.color_rush {
        return;
    }

    let (near, far) = config.scoring.close_call_band;
    let runner_x = runner.position.x;
    let is_close = |category: Category| {
        world.of_category(category).any(|entity| {
            world.bodies.get(entity).map_or(false, |body| {
                let dist = (body.center().x - runner_x).abs();
                dist > near && dist < far
            })
        })
    };

    let hit = if is_close(Category::Enemy) {
        Some((Category::Enemy, config.scoring.close_call_enemy))
    } else if is_close(Category::Obstacle) {
        Some((Category::Obstacle, config.scoring.close_call_obstacle))
    } else {
        None
    };

    if let Some((category, amount)) = hit {
        state.add_adrenaline(amount);
        events.run.send(RunEvent::CloseCall(category));
    }
}
