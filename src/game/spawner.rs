//! Spawner
//!
//! Every `interval` seconds one roll picks what comes next (enemy, obstacle,
//! coin or power-up); every frame a separate roll may add a background
//! building. Enemies that made it onto the playfield fire on their own
//! timers.

use macroquad::logging::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::components::{EntityKind, ObstacleStyle, PowerUpKind};
use super::world::World;
use crate::config::RushConfig;

/// What a spawn roll produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    Enemy,
    Obstacle,
    Coin,
    PowerUp,
}

/// Map a uniform roll in [0, 1) onto the cumulative thresholds
pub fn pick_category(roll: f32, config: &RushConfig) -> SpawnCategory {
    let spawn = &config.spawn;
    if roll < spawn.enemy_threshold {
        SpawnCategory::Enemy
    } else if roll < spawn.obstacle_threshold {
        SpawnCategory::Obstacle
    } else if roll < spawn.coin_threshold {
        SpawnCategory::Coin
    } else {
        SpawnCategory::PowerUp
    }
}

pub struct Spawner {
    /// Seconds since the last spawn roll
    timer: f32,
    rng: SmallRng,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            timer: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform in [lo, hi]
    fn range(&mut self, (lo, hi): (f32, f32)) -> f32 {
        if lo >= hi {
            lo
        } else {
            self.rng.gen_range(lo..=hi)
        }
    }

    fn phase(&mut self) -> f32 {
        self.range((0.0, std::f32::consts::TAU))
    }

    /// Advance the spawn clock and emit whatever the rolls call for.
    /// Returns the interval spawn, if one happened this frame.
    pub fn update(&mut self, dt: f32, world: &mut World, config: &RushConfig) -> Option<SpawnCategory> {
        let mut spawned = None;

        self.timer += dt;
        if self.timer > config.spawn.interval {
            self.timer = 0.0;
            let category = pick_category(self.rng.gen::<f32>(), config);
            self.spawn(category, world, config);
            spawned = Some(category);
        }

        if self.rng.gen::<f32>() < config.spawn.building_chance {
            let width = self.range((60.0, 120.0));
            let height = self.range((100.0, 400.0));
            world.spawn_building(config.screen.width, config.screen.ground_top(), width, height);
        }

        spawned
    }

    /// Spawn one entity of `category` just past the right edge
    pub fn spawn(&mut self, category: SpawnCategory, world: &mut World, config: &RushConfig) {
        let screen = &config.screen;
        let x = screen.width + config.spawn.offscreen_margin;
        let ground_top = screen.ground_top();

        match category {
            SpawnCategory::Enemy => {
                let shoot_timer = self.range(config.spawn.first_shot_delay);
                world.spawn_enemy(x, ground_top, shoot_timer);
            }
            SpawnCategory::Obstacle => {
                let style = ObstacleStyle::ALL[self.rng.gen_range(0..ObstacleStyle::ALL.len())];
                world.spawn_obstacle(x, ground_top, style);
            }
            SpawnCategory::Coin => {
                let y = self.range((screen.height - 400.0, screen.height - 200.0));
                let phase = self.phase();
                world.spawn_coin(x, y, phase);
            }
            SpawnCategory::PowerUp => {
                let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
                let phase = self.phase();
                world.spawn_power_up(x, screen.height - 250.0, kind, phase);
            }
        }
        debug!("spawned {:?}", category);
    }

    /// Count down enemy shoot timers; enemies inside the playfield fire a
    /// bullet from where they stand and reload.
    pub fn update_enemy_fire(&mut self, dt: f32, world: &mut World, config: &RushConfig) {
        let fire_line = config.screen.width - config.spawn.shoot_margin;
        let mut shots = Vec::new();

        let enemies: Vec<_> = world
            .kinds
            .iter()
            .filter(|(_, kind)| matches!(kind, EntityKind::Enemy { .. }))
            .map(|(entity, _)| entity)
            .collect();

        for enemy in enemies {
            let Some(position) = world.bodies.get(enemy).map(|b| b.position) else { continue };
            if let Some(EntityKind::Enemy { shoot_timer }) = world.kinds.get_mut(enemy) {
                *shoot_timer -= dt;
                if *shoot_timer <= 0.0 && position.x < fire_line {
                    *shoot_timer = self.range(config.spawn.reload_delay);
                    shots.push(position);
                }
            }
        }

        for from in shots {
            world.spawn_bullet(from);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::Category;

    #[test]
    fn test_category_thresholds() {
        let config = RushConfig::default();
        assert_eq!(pick_category(0.0, &config), SpawnCategory::Enemy);
        assert_eq!(pick_category(0.39, &config), SpawnCategory::Enemy);
        assert_eq!(pick_category(0.4, &config), SpawnCategory::Obstacle);
        assert_eq!(pick_category(0.69, &config), SpawnCategory::Obstacle);
        assert_eq!(pick_category(0.7, &config), SpawnCategory::Coin);
        assert_eq!(pick_category(0.85, &config), SpawnCategory::PowerUp);
        assert_eq!(pick_category(0.999, &config), SpawnCategory::PowerUp);
    }

    #[test]
    fn test_spawns_once_per_interval() {
        let mut config = RushConfig::default();
        config.spawn.building_chance = 0.0;
        let mut spawner = Spawner::new(7);
        let mut world = World::new();

        let mut spawns = 0;
        // 2.5 seconds at 0.25s steps: the timer passes 2.0 once
        for _ in 0..10 {
            if spawner.update(0.25, &mut world, &config).is_some() {
                spawns += 1;
            }
        }
        assert_eq!(spawns, 1);
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_spawns_appear_past_right_edge() {
        let config = RushConfig::default();
        let mut spawner = Spawner::new(1);
        let mut world = World::new();

        for category in [SpawnCategory::Enemy, SpawnCategory::Obstacle, SpawnCategory::Coin, SpawnCategory::PowerUp] {
            spawner.spawn(category, &mut world, &config);
        }
        for (_, body) in world.bodies.iter() {
            assert!(body.bounds().x > config.screen.width);
        }
        assert_eq!(world.count_of(Category::Enemy), 1);
        assert_eq!(world.count_of(Category::PowerUp), 1);
    }

    #[test]
    fn test_building_roll() {
        let mut config = RushConfig::default();
        config.spawn.building_chance = 1.0;
        config.spawn.interval = 100.0;
        let mut spawner = Spawner::new(3);
        let mut world = World::new();

        spawner.update(0.016, &mut world, &config);
        assert_eq!(world.count_of(Category::Building), 1);
    }

    #[test]
    fn test_enemy_fires_only_inside_playfield() {
        let config = RushConfig::default();
        let mut spawner = Spawner::new(11);
        let mut world = World::new();

        let offstage = world.spawn_enemy(1300.0, 620.0, 0.1);
        spawner.update_enemy_fire(0.2, &mut world, &config);
        assert_eq!(world.count_of(Category::Bullet), 0);

        world.bodies.get_mut(offstage).unwrap().position.x = 900.0;
        spawner.update_enemy_fire(0.01, &mut world, &config);
        assert_eq!(world.count_of(Category::Bullet), 1);

        match world.kinds.get(offstage) {
            Some(EntityKind::Enemy { shoot_timer }) => assert!((1.0..=2.0).contains(shoot_timer)),
            other => panic!("unexpected kind {:?}", other),
        }
    }
}
