//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod food;
pub mod state;
pub mod tick;

pub use collision::{GameOverCause, detect_collision};
pub use food::place_food;
pub use state::{Board, GameState, initial_snake};
pub use tick::{StepEvents, TickEvents, check_game_over, step, tick};
