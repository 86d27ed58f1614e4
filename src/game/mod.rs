//! Game Module
//!
//! The runner game, built on a small ECS-inspired core.
//!
//! Key concepts:
//! - Entity: Generational index for safe entity references
//! - Component: Plain data structs attached to entities
//! - World: Container for all entities and their components
//! - Event: Decoupled communication between systems
//!
//! The runner itself is not an entity. There is exactly one, it never
//! scrolls, and every system wants it, so `RunState` owns it directly.
//!
//! Systems are plain functions over `World`, `GameState` and the runner;
//! `RunState::tick` calls them in order once per frame.

pub mod entity;
pub mod component;
pub mod world;
pub mod event;
pub mod components;
pub mod state;
pub mod timers;
pub mod player;
pub mod progression;
pub mod spawner;
pub mod mover;
pub mod collision;
pub mod effects;
pub mod resolver;
pub mod particles;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use runtime::RunState;
pub use renderer::{draw_run, View};
