//! Run Renderer
//!
//! Draws a run with macroquad's 2D shapes. The game lives in a fixed
//! virtual screen (1280x720 by default) which is letterboxed into the
//! window, so layout code only ever deals in virtual units.

use macroquad::prelude::*;

use super::components::{palette, EntityKind, Rgb, Shape};
use super::particles::TrailParticle;
use super::runtime::RunState;
use super::state::GameState;
use super::timers::Effect;

/// Width of the adrenaline bar frame
pub const ADRENALINE_FRAME_WIDTH: f32 = 400.0;
/// Width of a full adrenaline fill (frame minus its border)
pub const ADRENALINE_FILL_WIDTH: f32 = 396.0;

const ADRENALINE_FILL: Rgb = [255, 100, 0];
const PANEL_DIM: Color = Color::new(0.0, 0.0, 0.0, 0.6);

pub fn rgb(c: Rgb) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

pub fn rgba(c: Rgb, alpha: f32) -> Color {
    Color::from_rgba(c[0], c[1], c[2], (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Mapping from virtual screen units to window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub scale: f32,
    pub offset: Vec2,
    /// Virtual screen size
    pub size: Vec2,
}

impl View {
    /// Largest uniform scale that fits the virtual screen in the window,
    /// centered with bars on the long side
    pub fn fit(window_w: f32, window_h: f32, virtual_w: f32, virtual_h: f32) -> Self {
        let scale = (window_w / virtual_w).min(window_h / virtual_h).max(0.0001);
        let offset = Vec2::new(
            ((window_w - virtual_w * scale) * 0.5).floor(),
            ((window_h - virtual_h * scale) * 0.5).floor(),
        );
        Self {
            scale,
            offset,
            size: Vec2::new(virtual_w, virtual_h),
        }
    }

    /// Fit to the current window
    pub fn for_window(virtual_w: f32, virtual_h: f32) -> Self {
        Self::fit(screen_width(), screen_height(), virtual_w, virtual_h)
    }

    pub fn point(&self, x: f32, y: f32) -> Vec2 {
        self.offset + Vec2::new(x, y) * self.scale
    }

    pub fn rect(&self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let p = self.point(x, y);
        draw_rectangle(p.x, p.y, w * self.scale, h * self.scale, color);
    }

    pub fn rect_lines(&self, x: f32, y: f32, w: f32, h: f32, thickness: f32, color: Color) {
        let p = self.point(x, y);
        draw_rectangle_lines(p.x, p.y, w * self.scale, h * self.scale, thickness * self.scale, color);
    }

    pub fn circle(&self, x: f32, y: f32, radius: f32, color: Color) {
        let p = self.point(x, y);
        draw_circle(p.x, p.y, radius * self.scale, color);
    }

    /// Text with its baseline-left at (x, y)
    pub fn text(&self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        let p = self.point(x, y);
        draw_text(text, p.x, p.y, size * self.scale, color);
    }

    /// Text centered horizontally on `cx`
    pub fn text_centered(&self, text: &str, cx: f32, y: f32, size: f32, color: Color) {
        let width = measure_text(text, None, (size * self.scale) as u16, 1.0).width / self.scale;
        self.text(text, cx - width * 0.5, y, size, color);
    }

    /// Paint the whole window black, then the virtual screen background
    pub fn clear(&self, background: Color) {
        clear_background(BLACK);
        self.rect(0.0, 0.0, self.size.x, self.size.y, background);
    }
}

// =============================================================================
// HUD text
// =============================================================================

pub fn score_label(state: &GameState) -> String {
    format!("Score: {}", state.score)
}

pub fn distance_label(state: &GameState) -> String {
    format!("Distance: {}m", state.meters())
}

pub fn speed_label(state: &GameState, base_speed: f32) -> String {
    format!("Speed: x{:.1}", state.speed_multiplier(base_speed))
}

/// Fill width of the adrenaline bar for a meter value
pub fn adrenaline_fill(adrenaline: f32) -> f32 {
    ADRENALINE_FILL_WIDTH * (adrenaline / 100.0).clamp(0.0, 1.0)
}

/// Labels for every running effect, with seconds left where timed
pub fn active_effects(run: &RunState) -> Vec<String> {
    let state = &run.state;
    let mut labels = Vec::new();
    if state.has_shield {
        labels.push("Shield".to_string());
    }

    let flags = [
        (Effect::HyperRush, state.hyper_rush),
        (Effect::SlowMotion, state.slow_motion),
        (Effect::Magnet, state.magnet_active),
        (Effect::DoubleJump, state.double_jump),
        (Effect::ColorRush, state.color_rush),
    ];
    for (effect, on) in flags {
        if !on {
            continue;
        }
        match run.timers.remaining(effect, state.clock) {
            Some(left) => labels.push(format!("{} {:.1}s", effect.label(), left)),
            None => labels.push(effect.label().to_string()),
        }
    }
    labels
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw one frame of a run
pub fn draw_run(run: &RunState, view: &View) {
    let screen = &run.config.screen;
    view.clear(rgb(palette::BACKGROUND));

    // Buildings sit behind everything else
    for (entity, kind) in run.world.kinds.iter() {
        if let EntityKind::Building { tint } = kind {
            if let Some(body) = run.world.bodies.get(entity) {
                let b = body.bounds();
                view.rect(b.x, b.y, b.w, b.h, rgb(*tint));
            }
        }
    }

    let ground_top = screen.ground_top();
    view.rect(0.0, ground_top, screen.width, screen.ground_height, rgb(palette::GROUND));

    for particle in run.trail.iter_alive() {
        draw_trail(view, particle);
    }

    for (entity, kind) in run.world.kinds.iter() {
        let Some(body) = run.world.bodies.get(entity) else { continue };
        match (kind, body.shape) {
            (EntityKind::Building { .. }, _) | (EntityKind::Shield, _) => {}
            (EntityKind::Enemy { .. }, Shape::Rect { w, h }) => {
                let p = body.position;
                view.rect(p.x, p.y, w, h, rgb(palette::ENEMY));
                view.circle(p.x + w * 0.5, p.y - 15.0, 15.0, rgb(palette::ENEMY_HEAD));
            }
            (EntityKind::Obstacle { style }, Shape::Rect { w, h }) => {
                view.rect(body.position.x, body.position.y, w, h, rgb(style.color()));
            }
            (EntityKind::Bullet, Shape::Circle { radius }) => {
                view.circle(body.position.x, body.position.y, radius, rgb(palette::BULLET));
            }
            (EntityKind::PowerUp { kind, .. }, Shape::Circle { radius }) => {
                view.circle(body.position.x, body.position.y, radius, rgba(kind.color(), 0.8));
            }
            (EntityKind::Coin { .. }, Shape::Circle { radius }) => {
                view.circle(body.position.x, body.position.y, radius, rgb(palette::COIN));
            }
            _ => {}
        }
    }

    // Shield bubble behind the runner
    if let Some(body) = run.runner.shield.and_then(|shield| run.world.bodies.get(shield)) {
        if let Shape::Circle { radius } = body.shape {
            view.circle(body.position.x, body.position.y, radius, rgba(palette::SHIELD, 0.4));
        }
    }

    let r = run.runner.bounds();
    view.rect(r.x, r.y, r.w, r.h, rgb(run.runner.tint));

    draw_hud(run, view);
    if !run.state.is_alive {
        draw_game_over(&run.state, view);
    }
}

fn draw_trail(view: &View, particle: &TrailParticle) {
    view.circle(
        particle.position.x,
        particle.position.y,
        particle.radius,
        rgba(particle.color, particle.alpha()),
    );
}

fn draw_hud(run: &RunState, view: &View) {
    let state = &run.state;
    let screen = &run.config.screen;

    view.text(&score_label(state), 20.0, 48.0, 32.0, WHITE);
    view.text(&distance_label(state), 20.0, 80.0, 24.0, Color::from_rgba(200, 200, 200, 255));
    view.text(
        &speed_label(state, run.config.speed.base),
        20.0,
        106.0,
        20.0,
        Color::from_rgba(150, 150, 150, 255),
    );

    // Adrenaline bar along the bottom edge
    let frame_x = screen.width * 0.5 - ADRENALINE_FRAME_WIDTH * 0.5;
    let frame_y = screen.height - 50.0;
    view.rect(frame_x, frame_y, ADRENALINE_FRAME_WIDTH, 30.0, Color::from_rgba(40, 40, 40, 255));
    view.rect(frame_x + 2.0, frame_y + 2.0, adrenaline_fill(state.adrenaline), 26.0, rgb(ADRENALINE_FILL));
    view.rect_lines(frame_x, frame_y, ADRENALINE_FRAME_WIDTH, 30.0, 2.0, Color::from_rgba(100, 100, 100, 255));
    view.text_centered("ADRENALINE", screen.width * 0.5, frame_y + 21.0, 16.0, WHITE);

    // Running effects, top right
    let mut y = 40.0;
    for label in active_effects(run) {
        view.text(&label, screen.width - 220.0, y, 20.0, Color::from_rgba(220, 220, 220, 255));
        y += 24.0;
    }
}

fn draw_game_over(state: &GameState, view: &View) {
    let cx = view.size.x * 0.5;
    let cy = view.size.y * 0.5;

    view.rect(0.0, 0.0, view.size.x, view.size.y, PANEL_DIM);
    view.text_centered("GAME OVER", cx, cy - 80.0, 72.0, Color::from_rgba(255, 50, 50, 255));
    view.text_centered(&format!("Final Score: {}", state.score), cx, cy + 16.0, 48.0, WHITE);
    view.text_centered(&distance_label(state), cx, cy + 72.0, 36.0, Color::from_rgba(200, 200, 200, 255));
    view.text_centered(
        "Press SPACE or Click to Restart",
        cx,
        cy + 128.0,
        24.0,
        Color::from_rgba(150, 150, 150, 255),
    );
}
