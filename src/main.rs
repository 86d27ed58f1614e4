//! ORANGE RUSH: Code Grey
//!
//! An endless runner through a grey city. Jump over obstacles and
//! pedestrians, grab coins and power-ups, fill the adrenaline meter and
//! bring the colors back for a while. Runs natively and in the browser.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod config;
mod game;
mod input;
mod landing;

use macroquad::logging::info;
use macroquad::prelude::*;

use app::AppState;

fn window_conf() -> Conf {
    Conf {
        window_title: "Orange Rush".to_owned(),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        // Start windowed on all platforms (WASM: browser handles sizing)
        #[cfg(not(target_arch = "wasm32"))]
        fullscreen: false,
        ..Default::default()
    }
}

/// Seed for the first run, from the wall clock
fn launch_seed() -> u64 {
    macroquad::miniquad::date::now().to_bits()
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    // A tap also arrives as a click otherwise, which would jump twice
    simulate_mouse_with_touch(false);

    info!("Orange Rush v{}", VERSION);
    let config = config::load_or_default().await;
    let mut app = AppState::new(config, launch_seed());

    loop {
        app.frame(get_frame_time());
        app.draw();
        next_frame().await;
    }
}
