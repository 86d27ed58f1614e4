//! Game Components
//!
//! Plain data for everything that scrolls through the city. Entity
//! categories are a closed enum: each variant carries only the data its
//! category needs, and behavior lives in the systems.

use macroquad::math::{Rect, Vec2};

/// RGB color (0-255). Kept engine-agnostic so the simulation never touches
/// the renderer.
pub type Rgb = [u8; 3];

pub mod palette {
    use super::Rgb;

    pub const RUNNER: Rgb = [255, 140, 0];
    pub const RUNNER_HYPER: Rgb = [255, 50, 0];
    pub const RUNNER_DEAD: Rgb = [150, 150, 150];
    pub const ENEMY: Rgb = [100, 100, 100];
    pub const ENEMY_HEAD: Rgb = [80, 80, 80];
    pub const BULLET: Rgb = [255, 50, 50];
    pub const COIN: Rgb = [255, 215, 0];
    pub const BUILDING: Rgb = [40, 40, 40];
    pub const BUILDING_SLOW: Rgb = [0, 255, 100];
    pub const SHIELD: Rgb = [100, 150, 255];
    pub const GROUND: Rgb = [60, 60, 60];
    pub const BACKGROUND: Rgb = [20, 20, 20];
}

// =============================================================================
// Physics / Movement
// =============================================================================

/// Velocity component (units per second)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Collision shape. Rectangles are anchored at their top-left corner,
/// circles at their center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { w: f32, h: f32 },
    Circle { radius: f32 },
}

/// Position plus shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub shape: Shape,
}

impl Body {
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            shape: Shape::Rect { w, h },
        }
    }

    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            shape: Shape::Circle { radius },
        }
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Rect {
        match self.shape {
            Shape::Rect { w, h } => Rect::new(self.position.x, self.position.y, w, h),
            Shape::Circle { radius } => Rect::new(
                self.position.x - radius,
                self.position.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }

    pub fn center(&self) -> Vec2 {
        match self.shape {
            Shape::Rect { w, h } => self.position + Vec2::new(w * 0.5, h * 0.5),
            Shape::Circle { .. } => self.position,
        }
    }

    /// Right edge, used for offscreen culling
    pub fn right(&self) -> f32 {
        let b = self.bounds();
        b.x + b.w
    }
}

// =============================================================================
// Entity Categories
// =============================================================================

/// The five pickup effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Shield,
    HyperRush,
    SlowMotion,
    Magnet,
    DoubleJump,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Shield,
        PowerUpKind::HyperRush,
        PowerUpKind::SlowMotion,
        PowerUpKind::Magnet,
        PowerUpKind::DoubleJump,
    ];

    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::Shield => [100, 150, 255],
            PowerUpKind::HyperRush => [255, 50, 50],
            PowerUpKind::SlowMotion => [50, 255, 50],
            PowerUpKind::Magnet => [255, 255, 50],
            PowerUpKind::DoubleJump => [150, 50, 255],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::HyperRush => "Hyper Rush",
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::Magnet => "Magnet",
            PowerUpKind::DoubleJump => "Double Jump",
        }
    }
}

/// Street clutter variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleStyle {
    Box,
    Barrier,
    Trash,
}

impl ObstacleStyle {
    pub const ALL: [ObstacleStyle; 3] = [ObstacleStyle::Box, ObstacleStyle::Barrier, ObstacleStyle::Trash];

    /// (width, height)
    pub fn size(&self) -> (f32, f32) {
        match self {
            ObstacleStyle::Box => (60.0, 80.0),
            ObstacleStyle::Barrier => (80.0, 100.0),
            ObstacleStyle::Trash => (50.0, 70.0),
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            ObstacleStyle::Box => [70, 70, 70],
            ObstacleStyle::Barrier => [90, 90, 90],
            ObstacleStyle::Trash => [60, 60, 60],
        }
    }
}

/// What an entity is, with the data only that category needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Grey pedestrian that shoots at the runner
    Enemy { shoot_timer: f32 },
    Obstacle { style: ObstacleStyle },
    Bullet,
    PowerUp { kind: PowerUpKind, float_phase: f32 },
    Coin { float_phase: f32 },
    /// Background parallax; never collides
    Building { tint: Rgb },
    /// Bubble drawn around a shielded runner; never scrolls
    Shield,
}

/// Fieldless mirror of `EntityKind`, for filtering and events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Enemy,
    Obstacle,
    Bullet,
    PowerUp,
    Coin,
    Building,
    Shield,
}

impl EntityKind {
    pub fn category(&self) -> Category {
        match self {
            EntityKind::Enemy { .. } => Category::Enemy,
            EntityKind::Obstacle { .. } => Category::Obstacle,
            EntityKind::Bullet => Category::Bullet,
            EntityKind::PowerUp { .. } => Category::PowerUp,
            EntityKind::Coin { .. } => Category::Coin,
            EntityKind::Building { .. } => Category::Building,
            EntityKind::Shield => Category::Shield,
        }
    }
}

impl Category {
    /// Can the runner touch this?
    pub fn collides(&self) -> bool {
        !matches!(self, Category::Building | Category::Shield)
    }

    /// Does this move with the street?
    pub fn scrolls(&self) -> bool {
        !matches!(self, Category::Shield)
    }

    /// Contact ends the run unless protected
    pub fn is_lethal(&self) -> bool {
        matches!(self, Category::Enemy | Category::Obstacle | Category::Bullet)
    }
}
