//! Game World
//!
//! The World owns every entity except the runner:
//! - Entity allocation and lifetime tracking
//! - Component storage (body, velocity, kind)
//! - Deferred despawn, so systems can destroy entities mid-iteration
//!
//! Component types are fixed fields rather than a type registry; the game
//! only ever needs these three.

use macroquad::math::Vec2;

use super::component::ComponentStorage;
use super::components::*;
use super::entity::{Entity, EntityAllocator};

pub struct World {
    entities: EntityAllocator,

    /// Entities queued for despawn at end of frame
    despawn_queue: Vec<Entity>,

    pub bodies: ComponentStorage<Body>,
    pub velocities: ComponentStorage<Velocity>,
    pub kinds: ComponentStorage<EntityKind>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            despawn_queue: Vec::new(),
            bodies: ComponentStorage::new(),
            velocities: ComponentStorage::new(),
            kinds: ComponentStorage::new(),
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Spawn an entity with a body and kind. Velocity starts at zero; the
    /// mover retargets it on the next pass.
    pub fn spawn(&mut self, body: Body, kind: EntityKind) -> Entity {
        let entity = self.entities.allocate();
        self.bodies.insert(entity, body);
        self.velocities.insert(entity, Velocity::default());
        self.kinds.insert(entity, kind);
        entity
    }

    /// Queue an entity for despawn at end of frame.
    pub fn despawn(&mut self, entity: Entity) {
        if self.is_alive(entity) && !self.despawn_queue.contains(&entity) {
            self.despawn_queue.push(entity);
        }
    }

    /// Immediately despawn an entity and its components.
    pub fn despawn_immediate(&mut self, entity: Entity) {
        if !self.entities.free(entity) {
            return;
        }
        let idx = entity.index();
        self.bodies.clear_slot(idx);
        self.velocities.clear_slot(idx);
        self.kinds.clear_slot(idx);
    }

    /// Process all queued despawns. Call at end of frame.
    pub fn flush_despawns(&mut self) {
        let queue = std::mem::take(&mut self.despawn_queue);
        for entity in queue {
            self.despawn_immediate(entity);
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Is the entity alive and not already queued for removal?
    pub fn is_active(&self, entity: Entity) -> bool {
        self.is_alive(entity) && !self.despawn_queue.contains(&entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Live entities of one category
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = Entity> + '_ {
        self.kinds
            .iter()
            .filter(move |(_, kind)| kind.category() == category)
            .map(|(entity, _)| entity)
    }

    #[cfg(test)]
    pub fn count_of(&self, category: Category) -> usize {
        self.of_category(category).count()
    }

    // =========================================================================
    // Convenience Spawners
    // =========================================================================

    /// Enemy standing on the ground at `x`
    pub fn spawn_enemy(&mut self, x: f32, ground_top: f32, shoot_timer: f32) -> Entity {
        self.spawn(
            Body::rect(x, ground_top - 70.0, 50.0, 70.0),
            EntityKind::Enemy { shoot_timer },
        )
    }

    pub fn spawn_obstacle(&mut self, x: f32, ground_top: f32, style: ObstacleStyle) -> Entity {
        let (w, h) = style.size();
        self.spawn(Body::rect(x, ground_top - h, w, h), EntityKind::Obstacle { style })
    }

    pub fn spawn_bullet(&mut self, from: Vec2) -> Entity {
        self.spawn(Body::circle(from.x, from.y, 5.0), EntityKind::Bullet)
    }

    pub fn spawn_power_up(&mut self, x: f32, y: f32, kind: PowerUpKind, float_phase: f32) -> Entity {
        self.spawn(Body::circle(x, y, 20.0), EntityKind::PowerUp { kind, float_phase })
    }

    pub fn spawn_coin(&mut self, x: f32, y: f32, float_phase: f32) -> Entity {
        self.spawn(Body::circle(x, y, 12.0), EntityKind::Coin { float_phase })
    }

    pub fn spawn_building(&mut self, x: f32, ground_top: f32, width: f32, height: f32) -> Entity {
        self.spawn(
            Body::rect(x, ground_top - height, width, height),
            EntityKind::Building { tint: palette::BUILDING },
        )
    }

    pub fn spawn_shield(&mut self, center: Vec2) -> Entity {
        self.spawn(Body::circle(center.x, center.y, 50.0), EntityKind::Shield)
    }

    /// Recolor every building currently on screen
    pub fn tint_buildings(&mut self, color: Rgb) {
        for (_, kind) in self.kinds.iter_mut() {
            if let EntityKind::Building { tint } = kind {
                *tint = color;
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
