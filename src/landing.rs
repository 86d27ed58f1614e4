//! Start screen
//!
//! Title, tagline and controls. Any jump input starts the first run.

use macroquad::prelude::*;

use crate::game::View;
use crate::VERSION;

const TITLE_COLOR: Color = Color::new(1.0, 0.55, 0.0, 1.0);
const SUBTITLE_COLOR: Color = Color::new(0.39, 0.39, 0.39, 1.0);
const TEXT_COLOR: Color = Color::new(0.78, 0.78, 0.78, 1.0);
const MUTED_COLOR: Color = Color::new(0.4, 0.4, 0.42, 1.0);
const BG_COLOR: Color = Color::new(0.08, 0.08, 0.08, 1.0);

const TAGLINE: &str = "Escape the grey city and bring back the colors!";

/// Control help, one entry per line
pub const CONTROLS: [&str; 2] = ["SPACE / Click - Jump", "Hold for High Jump"];

/// Wrap text to fit within a given width.
/// Returns a vector of lines that fit within max_width
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in words {
            let test_line = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };

            // Approximate glyph width; measure_text needs a live context
            let char_width = font_size * 0.55;
            let test_width = test_line.len() as f32 * char_width;

            if test_width <= max_width || current_line.is_empty() {
                current_line = test_line;
            } else {
                lines.push(current_line);
                current_line = word.to_string();
            }
        }
        lines.push(current_line);
    }

    lines
}

/// Draw the start screen
pub fn draw_landing(view: &View, time: f32) {
    view.clear(BG_COLOR);

    let cx = view.size.x * 0.5;
    let cy = view.size.y * 0.5;

    view.text_centered("ORANGE RUSH", cx, cy - 126.0, 72.0, TITLE_COLOR);
    view.text_centered("CODE GREY", cx, cy - 64.0, 48.0, SUBTITLE_COLOR);

    let mut y = cy + 26.0;
    for line in wrap_text(TAGLINE, 20.0, view.size.x - 80.0) {
        view.text_centered(&line, cx, y, 20.0, TEXT_COLOR);
        y += 24.0;
    }

    view.text_centered("Controls:", cx, cy + 88.0, 24.0, WHITE);
    let mut y = cy + 126.0;
    for line in CONTROLS {
        view.text_centered(line, cx, y, 20.0, TEXT_COLOR);
        y += 30.0;
    }

    // Slow pulse on the prompt
    let pulse = 0.6 + 0.4 * (time * 3.0).sin().abs();
    let prompt = Color::new(TITLE_COLOR.r, TITLE_COLOR.g, TITLE_COLOR.b, pulse);
    view.text_centered("Press SPACE or Click to Start", cx, cy + 230.0, 28.0, prompt);

    view.text(&format!("v{}", VERSION), 12.0, view.size.y - 12.0, 16.0, MUTED_COLOR);
}
