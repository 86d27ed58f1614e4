//! Input handling
//!
//! The game has a single verb: jump. Space, a mouse click and a touch all
//! trigger it; only Space can be held for the high jump.

mod state;

pub use state::*;
