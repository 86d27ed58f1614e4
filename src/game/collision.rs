//! Overlap Detection
//!
//! The runner is an axis-aligned rectangle; entities are rectangles or
//! circles. A few dozen entities are on screen at most, so every frame
//! simply tests the runner against each collidable one and queues an
//! `OverlapEvent` per hit for the resolver.

use macroquad::math::{Rect, Vec2};

use super::components::{Body, Shape};
use super::event::{Events, OverlapEvent};
use super::world::World;

/// Does a circle touch a rectangle?
pub fn circle_overlaps_rect(center: Vec2, radius: f32, rect: Rect) -> bool {
    let closest = Vec2::new(
        center.x.clamp(rect.x, rect.x + rect.w),
        center.y.clamp(rect.y, rect.y + rect.h),
    );
    (center - closest).length_squared() < radius * radius
}

/// Does a body touch the rectangle?
pub fn body_overlaps_rect(body: &Body, rect: Rect) -> bool {
    match body.shape {
        Shape::Rect { .. } => body.bounds().overlaps(&rect),
        Shape::Circle { radius } => circle_overlaps_rect(body.position, radius, rect),
    }
}

/// Queue an overlap event for every collidable entity touching the runner
pub fn detect_overlaps(world: &World, runner_bounds: Rect, events: &mut Events) {
    for (entity, kind) in world.kinds.iter() {
        let category = kind.category();
        if !category.collides() || !world.is_active(entity) {
            continue;
        }
        let Some(body) = world.bodies.get(entity) else { continue };
        if body_overlaps_rect(body, runner_bounds) {
            events.overlaps.send(OverlapEvent { entity, category });
        }
    }
}
