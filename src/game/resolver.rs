//! Collision Resolver
//!
//! Drains this frame's overlap events and applies the outcome for each
//! category. Lethal contacts are checked in priority order: hyper rush
//! smashes, then the shield absorbs, then the run ends.

use super::components::{palette, Category, EntityKind};
use super::effects::{activate_power_up, drop_shield};
use super::event::{Events, RunEvent};
use super::player::Runner;
use super::state::GameState;
use super::timers::EffectTimers;
use super::world::World;
use crate::config::RushConfig;

/// Apply every queued overlap
pub fn resolve_overlaps(
    state: &mut GameState,
    world: &mut World,
    runner: &mut Runner,
    timers: &mut EffectTimers,
    config: &RushConfig,
    events: &mut Events,
) {
    let scoring = &config.scoring;

    for overlap in events.overlaps.take() {
        if !state.is_alive {
            break;
        }
        // Already consumed by an earlier overlap this frame
        if !world.is_active(overlap.entity) {
            continue;
        }

        match overlap.category {
            Category::Coin => {
                world.despawn(overlap.entity);
                state.coins += 1;
                state.add_bonus(scoring.coin);
                state.add_adrenaline(scoring.coin_adrenaline);
                events.run.send(RunEvent::CoinCollected { total: state.coins });
            }
            Category::PowerUp => {
                let Some(EntityKind::PowerUp { kind, .. }) = world.kinds.get(overlap.entity).copied() else {
                    continue;
                };
                world.despawn(overlap.entity);
                state.add_bonus(scoring.power_up);
                activate_power_up(kind, state, world, runner, timers, config);
                events.run.send(RunEvent::PowerUpCollected(kind));
            }
            category if category.is_lethal() => {
                if category == Category::Bullet {
                    world.despawn(overlap.entity);
                }

                if state.hyper_rush {
                    world.despawn(overlap.entity);
                    state.add_bonus(smash_points(category, config));
                    if category == Category::Enemy {
                        state.add_adrenaline(scoring.smash_adrenaline);
                    }
                    events.run.send(RunEvent::Smashed(category));
                } else if state.has_shield {
                    world.despawn(overlap.entity);
                    drop_shield(state, world, runner);
                    events.run.send(RunEvent::ShieldConsumed(category));
                } else {
                    game_over(state, runner, category, events);
                }
            }
            _ => {}
        }
    }
}

/// Hyper rush bonus for plowing through a lethal entity
pub fn smash_points(category: Category, config: &RushConfig) -> u32 {
    match category {
        Category::Enemy => config.scoring.enemy_smash,
        Category::Obstacle => config.scoring.obstacle_smash,
        Category::Bullet => config.scoring.bullet_smash,
        _ => 0,
    }
}

fn game_over(state: &mut GameState, runner: &mut Runner, killer: Category, events: &mut Events) {
    state.is_alive = false;
    runner.tint = palette::RUNNER_DEAD;
    events.run.send(RunEvent::GameOver {
        score: state.score,
        distance: state.distance,
        killer,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collision::detect_overlaps;
    use crate::game::components::{ObstacleStyle, PowerUpKind};
    use macroquad::math::Vec2;

    struct Fixture {
        config: RushConfig,
        state: GameState,
        world: World,
        runner: Runner,
        timers: EffectTimers,
        events: Events,
    }

    impl Fixture {
        fn new() -> Self {
            let config = RushConfig::default();
            Self {
                state: GameState::reset(&config),
                runner: Runner::new(&config),
                world: World::new(),
                timers: EffectTimers::new(),
                events: Events::new(),
                config,
            }
        }

        fn collide(&mut self) {
            detect_overlaps(&self.world, self.runner.bounds(), &mut self.events);
            resolve_overlaps(
                &mut self.state,
                &mut self.world,
                &mut self.runner,
                &mut self.timers,
                &self.config,
                &mut self.events,
            );
            self.world.flush_despawns();
        }

        /// An enemy standing right on top of the runner
        fn enemy_on_runner(&mut self) -> crate::game::entity::Entity {
            self.world.spawn_enemy(self.runner.position.x - 25.0, 620.0, 5.0)
        }
    }

    #[test]
    fn test_hyper_rush_smashes_enemy() {
        let mut f = Fixture::new();
        f.state.hyper_rush = true;
        f.state.score = 120;
        let enemy = f.enemy_on_runner();

        f.collide();
        assert!(!f.world.is_alive(enemy));
        assert!(f.state.is_alive);
        assert_eq!(f.state.score, 170);
        assert_eq!(f.state.adrenaline, 10.0);
        assert_eq!(f.events.run.iter().copied().collect::<Vec<_>>(), vec![RunEvent::Smashed(Category::Enemy)]);
    }

    #[test]
    fn test_hyper_rush_obstacle_and_bullet_points() {
        let mut f = Fixture::new();
        f.state.hyper_rush = true;
        f.world.spawn_obstacle(f.runner.position.x - 30.0, 620.0, ObstacleStyle::Box);
        f.world.spawn_bullet(f.runner.position);

        f.collide();
        assert_eq!(f.state.bonus, 35);
        // Only enemies feed adrenaline
        assert_eq!(f.state.adrenaline, 0.0);
    }

    #[test]
    fn test_obstacle_without_protection_ends_run() {
        let mut f = Fixture::new();
        f.state.score = 57;
        f.state.distance = 5.7;
        let obstacle = f.world.spawn_obstacle(f.runner.position.x - 30.0, 620.0, ObstacleStyle::Barrier);

        f.collide();
        assert!(!f.state.is_alive);
        assert_eq!(f.runner.tint, palette::RUNNER_DEAD);
        // Obstacles stay where they are
        assert!(f.world.is_alive(obstacle));
        assert_eq!(
            f.events.run.iter().copied().collect::<Vec<_>>(),
            vec![RunEvent::GameOver { score: 57, distance: 5.7, killer: Category::Obstacle }]
        );
    }

    #[test]
    fn test_shield_absorbs_one_hit() {
        let mut f = Fixture::new();
        activate_power_up(PowerUpKind::Shield, &mut f.state, &mut f.world, &mut f.runner, &mut f.timers, &f.config);
        let score_before = f.state.score;
        let enemy = f.enemy_on_runner();

        f.collide();
        assert!(f.state.is_alive);
        assert!(!f.state.has_shield);
        assert!(!f.world.is_alive(enemy));
        assert_eq!(f.world.count_of(Category::Shield), 0);
        assert_eq!(f.state.score, score_before);

        f.enemy_on_runner();
        f.collide();
        assert!(!f.state.is_alive);
    }

    #[test]
    fn test_hyper_rush_takes_priority_over_shield() {
        let mut f = Fixture::new();
        activate_power_up(PowerUpKind::Shield, &mut f.state, &mut f.world, &mut f.runner, &mut f.timers, &f.config);
        f.state.hyper_rush = true;
        f.enemy_on_runner();

        f.collide();
        assert!(f.state.has_shield);
        assert_eq!(f.state.bonus, 50);
    }

    #[test]
    fn test_bullet_always_destroyed() {
        let mut f = Fixture::new();
        let bullet = f.world.spawn_bullet(f.runner.position);

        f.collide();
        assert!(!f.state.is_alive);
        assert!(!f.world.is_alive(bullet));
    }

    #[test]
    fn test_coin_pickup() {
        let mut f = Fixture::new();
        let coin = f.world.spawn_coin(f.runner.position.x, f.runner.position.y, 0.0);

        f.collide();
        assert_eq!(f.state.coins, 1);
        assert_eq!(f.state.score, 10);
        assert_eq!(f.state.adrenaline, 2.0);
        assert!(!f.world.is_alive(coin));
        assert_eq!(f.events.run.iter().copied().collect::<Vec<_>>(), vec![RunEvent::CoinCollected { total: 1 }]);
    }

    #[test]
    fn test_coin_ignores_shield_and_hyper_rush() {
        let mut f = Fixture::new();
        activate_power_up(PowerUpKind::Shield, &mut f.state, &mut f.world, &mut f.runner, &mut f.timers, &f.config);
        f.state.hyper_rush = true;
        f.world.spawn_coin(f.runner.position.x, f.runner.position.y, 0.0);

        f.collide();
        assert!(f.state.has_shield);
        assert_eq!(f.state.bonus, 10);
    }

    #[test]
    fn test_power_up_pickup_activates_effect() {
        let mut f = Fixture::new();
        let orb = f.world.spawn_power_up(f.runner.position.x, f.runner.position.y, PowerUpKind::Magnet, 0.0);

        f.collide();
        assert!(!f.world.is_alive(orb));
        assert!(f.state.magnet_active);
        assert_eq!(f.state.score, 100);
        assert!(f.timers.is_pending(crate::game::timers::Effect::Magnet));
    }

    #[test]
    fn test_overlaps_ignored_once_dead() {
        let mut f = Fixture::new();
        f.state.is_alive = false;
        let coin = f.world.spawn_coin(f.runner.position.x, f.runner.position.y, 0.0);

        f.collide();
        assert_eq!(f.state.coins, 0);
        assert!(f.world.is_alive(coin));
    }

    #[test]
    fn test_nothing_after_fatal_hit_in_same_frame() {
        let mut f = Fixture::new();
        f.enemy_on_runner();
        f.world.spawn_coin(f.runner.position.x, f.runner.position.y - 10.0, 0.0);

        f.collide();
        assert!(!f.state.is_alive);
        assert_eq!(f.state.coins, 0);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut f = Fixture::new();
        f.world.spawn_coin(900.0, 300.0, 0.0);
        f.world.spawn_bullet(Vec2::new(900.0, 560.0));
        let before = f.state.clone();

        f.collide();
        assert_eq!(f.state, before);
        assert!(f.events.run.is_empty());
    }
}
