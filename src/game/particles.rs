//! Trail Effects
//!
//! Afterimages left behind the runner while hyper rush or color rush is on.
//! One circle per frame goes into a fixed-size pool; the oldest slot is
//! reused once the pool is full.

use macroquad::math::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::components::Rgb;

/// Maximum number of live trail circles
pub const MAX_TRAIL: usize = 64;

/// Seconds a circle stays visible
pub const TRAIL_LIFE: f32 = 0.3;

/// Opacity of a fresh circle
pub const TRAIL_ALPHA: f32 = 0.5;

const HYPER_TRAIL_COLOR: Rgb = [255, 100, 0];

/// A single afterimage
#[derive(Debug, Clone, Copy)]
pub struct TrailParticle {
    pub position: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Remaining life in seconds
    pub life: f32,
    pub alive: bool,
}

impl Default for TrailParticle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            radius: 0.0,
            color: [255, 255, 255],
            life: 0.0,
            alive: false,
        }
    }
}

impl TrailParticle {
    /// Opacity, fading out over the particle's life
    pub fn alpha(&self) -> f32 {
        TRAIL_ALPHA * (self.life / TRAIL_LIFE).clamp(0.0, 1.0)
    }
}

/// The trail pool
pub struct TrailPool {
    pub particles: [TrailParticle; MAX_TRAIL],
    /// Next slot to write (ring buffer)
    cursor: usize,
    rng: SmallRng,
}

impl TrailPool {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: [TrailParticle::default(); MAX_TRAIL],
            cursor: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Drop one afterimage at `position` if an effect calls for it.
    /// Hyper rush wins the size; color rush wins the color.
    pub fn emit(&mut self, position: Vec2, hyper_rush: bool, color_rush: bool) {
        if !hyper_rush && !color_rush {
            return;
        }

        let color = if color_rush {
            [
                self.rng.gen_range(100..=255),
                self.rng.gen_range(100..=255),
                self.rng.gen_range(100..=255),
            ]
        } else {
            HYPER_TRAIL_COLOR
        };
        let radius = if hyper_rush { 25.0 } else { 20.0 };

        self.particles[self.cursor] = TrailParticle {
            position,
            radius,
            color,
            life: TRAIL_LIFE,
            alive: true,
        };
        self.cursor = (self.cursor + 1) % MAX_TRAIL;
    }

    /// Age every live particle
    pub fn update(&mut self, delta_time: f32) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }
            particle.life -= delta_time;
            if particle.life <= 0.0 {
                particle.alive = false;
            }
        }
    }

    pub fn iter_alive(&self) -> impl Iterator<Item = &TrailParticle> {
        self.particles.iter().filter(|p| p.alive)
    }

    #[cfg(test)]
    pub fn alive_count(&self) -> usize {
        self.iter_alive().count()
    }

    /// Kill all particles
    #[cfg(test)]
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.alive = false;
        }
        self.cursor = 0;
    }
}
