//! Run Runtime
//!
//! Owns everything that lives for one run and steps it once per frame.
//! Systems run in a fixed order; see `RunState::tick`.

use macroquad::logging::{debug, info};

use super::collision::detect_overlaps;
use super::effects::{expire_effects, try_start_color_rush};
use super::event::{Events, RunEvent};
use super::mover;
use super::particles::TrailPool;
use super::player::Runner;
use super::progression::{advance, detect_close_call};
use super::resolver::resolve_overlaps;
use super::spawner::Spawner;
use super::state::GameState;
use super::timers::EffectTimers;
use super::world::World;
use crate::config::RushConfig;
use crate::input::FrameInput;

/// Derive the next run's seed (splitmix64 step)
pub fn next_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// One run of the game
pub struct RunState {
    pub config: RushConfig,
    pub state: GameState,
    pub world: World,
    pub runner: Runner,
    pub spawner: Spawner,
    pub timers: EffectTimers,
    pub trail: TrailPool,
    /// Events from the last tick
    pub events: Events,
    seed: u64,
}

impl RunState {
    pub fn new(config: RushConfig, seed: u64) -> Self {
        info!("run started (seed {:#x})", seed);
        Self {
            state: GameState::reset(&config),
            world: World::new(),
            runner: Runner::new(&config),
            spawner: Spawner::new(seed),
            timers: EffectTimers::new(),
            trail: TrailPool::new(next_seed(seed)),
            events: Events::new(),
            config,
            seed,
        }
    }

    #[cfg(test)]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Throw the current run away and start over
    pub fn restart(&mut self, seed: u64) {
        info!(
            "restart after {}m, score {} (seed {:#x})",
            self.state.meters(),
            self.state.score,
            seed
        );
        debug!("clearing {} entities", self.world.entity_count());
        self.state = GameState::reset(&self.config);
        self.world = World::new();
        self.runner = Runner::new(&self.config);
        self.spawner = Spawner::new(seed);
        self.timers.reset();
        self.trail = TrailPool::new(next_seed(seed));
        self.events.clear_all();
        self.seed = seed;
    }

    /// Apply this frame's input. A press on the game-over panel restarts.
    pub fn handle_input(&mut self, input: &FrameInput) {
        if !self.state.is_alive {
            if input.jump_pressed {
                self.restart(next_seed(self.seed));
            }
            return;
        }

        let player = &self.config.player;
        if input.jump_pressed {
            self.runner.request_jump(self.state.clock, &mut self.state, player);
        }
        if input.jump_released {
            self.runner.release_jump();
        }
        self.runner.apply_hold(self.state.clock, input.jump_held, player);
    }

    /// Step the run by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32) {
        let dt = delta_time.clamp(0.0, self.config.max_frame_dt);
        let config = &self.config;

        self.events.clear_all();
        self.state.clock += dt;
        let alive = self.state.is_alive;

        // Once the run is over the street stops changing; whatever is on
        // screen drifts off with its last velocity.
        if alive {
            advance(&mut self.state, dt, config);
            self.spawner.update(dt, &mut self.world, config);
            self.spawner.update_enemy_fire(dt, &mut self.world, config);
            mover::retarget_velocities(&mut self.world, self.state.speed, config);
            mover::animate(&mut self.world, &self.state, &self.runner, dt, config);
        }

        mover::integrate(&mut self.world, dt);
        self.runner.integrate(dt, &config.player);
        mover::sync_shield(&mut self.world, &self.runner);
        mover::cull_offscreen(&mut self.world);

        if alive {
            detect_overlaps(&self.world, self.runner.bounds(), &mut self.events);
            resolve_overlaps(
                &mut self.state,
                &mut self.world,
                &mut self.runner,
                &mut self.timers,
                config,
                &mut self.events,
            );
            detect_close_call(&mut self.state, &self.world, &self.runner, config, &mut self.events);
            try_start_color_rush(&mut self.state, &mut self.timers, config, &mut self.events);
        }

        expire_effects(
            &mut self.state,
            &mut self.world,
            &mut self.runner,
            &mut self.timers,
            &mut self.events,
        );

        if self.state.is_alive {
            self.trail.emit(self.runner.position, self.state.hyper_rush, self.state.color_rush);
        }
        self.trail.update(dt);

        self.world.flush_despawns();
        self.log_events();
    }

    fn log_events(&self) {
        for event in self.events.run.iter() {
            match event {
                RunEvent::PowerUpCollected(kind) => info!("picked up {}", kind.label()),
                RunEvent::ColorRushStarted => info!("color rush!"),
                RunEvent::EffectExpired(effect) => info!("{} wore off", effect.label()),
                RunEvent::ShieldConsumed(category) => info!("shield absorbed {:?}", category),
                RunEvent::GameOver { score, distance, killer } => {
                    info!("game over: hit {:?} at {}m, score {}", killer, distance.floor(), score)
                }
                RunEvent::CoinCollected { total } => debug!("coin ({} total)", total),
                RunEvent::Smashed(category) => debug!("smashed {:?}", category),
                RunEvent::CloseCall(category) => debug!("close call with {:?}", category),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::components::{palette, Category, ObstacleStyle, PowerUpKind};
    use crate::game::effects::activate_power_up;
    use crate::game::progression::speed_for;
    use crate::game::timers::Effect;

    const STEP: f32 = 0.1;

    /// A run with nothing spawning on its own
    fn quiet_run() -> RunState {
        let mut config = RushConfig::default();
        config.spawn.interval = 10_000.0;
        config.spawn.building_chance = 0.0;
        RunState::new(config, 42)
    }

    fn pick_up(run: &mut RunState, kind: PowerUpKind) {
        activate_power_up(kind, &mut run.state, &mut run.world, &mut run.runner, &mut run.timers, &run.config);
    }

    fn obstacle_on_runner(run: &mut RunState) {
        let x = run.runner.position.x - 30.0;
        let ground = run.config.screen.ground_top();
        run.world.spawn_obstacle(x, ground, ObstacleStyle::Box);
    }

    #[test]
    fn test_tick_advances_run() {
        let mut run = quiet_run();
        for _ in 0..10 {
            run.tick(STEP);
        }
        assert!((run.state.clock - 1.0).abs() < 1e-4);
        assert!(run.state.distance > 1.9);
        assert!(run.state.speed > run.config.speed.base);
        assert_eq!(run.state.score, (run.state.distance * 10.0).floor() as u32);
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut run = quiet_run();
        run.tick(3.0);
        assert!((run.state.clock - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_slow_motion_restores_after_five_seconds() {
        let mut run = quiet_run();
        for _ in 0..20 {
            run.tick(STEP);
        }
        let orb_x = run.runner.position.x;
        let orb_y = run.runner.position.y;
        run.world.spawn_power_up(orb_x, orb_y, PowerUpKind::SlowMotion, 0.0);

        run.tick(STEP);
        assert!(run.state.slow_motion);
        let before = run.state.speed_before_slow_motion.unwrap();
        assert!((run.state.speed - before * 0.3).abs() < 1e-3);

        let mut ticks = 0;
        while run.state.slow_motion {
            run.tick(STEP);
            ticks += 1;
            assert!(ticks <= 60, "slow motion never expired");
        }
        assert!((49..=51).contains(&ticks));
        assert_eq!(run.state.speed, before);
    }

    #[test]
    fn test_power_ups_expire_independently() {
        let mut run = quiet_run();
        pick_up(&mut run, PowerUpKind::Magnet);
        for _ in 0..10 {
            run.tick(STEP);
        }
        pick_up(&mut run, PowerUpKind::HyperRush);

        while run.state.hyper_rush {
            run.tick(STEP);
        }
        assert!(run.state.magnet_active);
        assert!((run.state.clock - 4.0).abs() < 0.15);

        while run.state.magnet_active {
            run.tick(STEP);
        }
        assert!((run.state.clock - 8.0).abs() < 0.15);
    }

    #[test]
    fn test_obstacle_death_freezes_run() {
        let mut run = quiet_run();
        for _ in 0..5 {
            run.tick(STEP);
        }
        obstacle_on_runner(&mut run);
        run.tick(STEP);

        assert!(!run.state.is_alive);
        assert_eq!(run.runner.tint, palette::RUNNER_DEAD);
        let score = run.state.score;
        let distance = run.state.distance;
        assert!(run
            .events
            .run
            .iter()
            .any(|e| *e == RunEvent::GameOver { score, distance, killer: Category::Obstacle }));

        for _ in 0..30 {
            run.tick(STEP);
        }
        assert_eq!(run.state.score, score);
        assert_eq!(run.state.distance, distance);
    }

    #[test]
    fn test_dead_entities_keep_drifting() {
        let mut run = quiet_run();
        run.tick(STEP);
        obstacle_on_runner(&mut run);
        let coin = run.world.spawn_coin(900.0, 400.0, 0.0);
        run.tick(STEP);
        assert!(!run.state.is_alive);

        let x = run.world.bodies.get(coin).unwrap().position.x;
        run.tick(STEP);
        assert!(run.world.bodies.get(coin).unwrap().position.x < x);
    }

    #[test]
    fn test_jump_input_restarts_after_game_over() {
        let mut run = quiet_run();
        pick_up(&mut run, PowerUpKind::SlowMotion);
        run.tick(STEP);
        obstacle_on_runner(&mut run);
        run.tick(STEP);
        assert!(!run.state.is_alive);
        let old_seed = run.seed();

        run.handle_input(&FrameInput::press());
        assert!(run.state.is_alive);
        assert_ne!(run.seed(), old_seed);
        assert_eq!(run.timers.len(), 0);
        assert_eq!(run.world.entity_count(), 0);

        // The old slow motion never reaches the new run
        for _ in 0..70 {
            run.tick(STEP);
            assert!(!run.events.run.iter().any(|e| matches!(e, RunEvent::EffectExpired(Effect::SlowMotion))));
        }
        assert!(!run.state.slow_motion);
        assert_eq!(run.state.speed, speed_for(run.state.distance, &run.config));
    }

    #[test]
    fn test_jump_input_lifts_runner() {
        let mut run = quiet_run();
        run.handle_input(&FrameInput::press());
        run.tick(1.0 / 60.0);
        assert!(!run.runner.grounded);
        assert_eq!(run.runner.jump_count, 1);

        // Lands again well within a second
        run.handle_input(&FrameInput::release());
        for _ in 0..10 {
            run.tick(STEP);
        }
        assert!(run.runner.grounded);
        assert_eq!(run.runner.jump_count, 0);
    }

    #[test]
    fn test_full_meter_starts_color_rush() {
        let mut run = quiet_run();
        run.state.adrenaline = 99.0;
        run.world.spawn_coin(run.runner.position.x, run.runner.position.y, 0.0);

        run.tick(STEP);
        assert!(run.state.color_rush);
        assert_eq!(run.state.adrenaline, 0.0);
        assert!(run.events.run.iter().any(|e| *e == RunEvent::ColorRushStarted));
        assert!(run.trail.alive_count() > 0);
    }

    #[test]
    fn test_shield_follows_runner() {
        let mut run = quiet_run();
        pick_up(&mut run, PowerUpKind::Shield);
        run.handle_input(&FrameInput::press());
        run.tick(STEP);

        let shield = run.runner.shield.unwrap();
        assert_eq!(run.world.bodies.get(shield).unwrap().position, run.runner.position);
        assert_eq!(run.world.count_of(Category::Shield), 1);
    }

    #[test]
    fn test_next_seed_changes() {
        assert_ne!(next_seed(0), 0);
        assert_ne!(next_seed(1), next_seed(2));
    }
}
