//! Snake Canvas - a fixed-tick grid snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake movement, food, game over)
//! - `input`: Direction decoding and reversal-safe steering
//! - `driver`: Tick scheduling with single-timer cancellation
//! - `render`: Drawing-surface abstraction and the board painter
//! - `platform`: Browser canvas and terminal front-ends
//! - `settings`: Board geometry, timing and palette

pub mod driver;
pub mod input;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use driver::{Game, Schedule, TickTicket};
pub use input::Direction;
pub use settings::{Palette, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Grid cell size in surface units
    pub const UNIT_SIZE: i32 = 25;
    /// Default board edge in surface units
    pub const BOARD_SIZE: i32 = 500;
    /// Delay between ticks
    pub const TICK_MS: u32 = 75;
    /// Segments in a freshly started snake
    pub const INITIAL_SNAKE_LENGTH: i32 = 5;
    /// Random draws before food placement falls back to scanning free cells
    pub const MAX_FOOD_ATTEMPTS: u32 = 64;
}
