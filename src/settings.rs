//! Game settings
//!
//! Board geometry, tick cadence and the colour palette. Everything here is
//! read once when a game is created; nothing is written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Environment variable naming a JSON settings file (native only)
pub const SETTINGS_ENV_VAR: &str = "SNAKE_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unit size must be positive, got {0}")]
    InvalidUnitSize(i32),
    #[error("board {width}x{height} is not a multiple of unit size {unit}")]
    MisalignedBoard { width: i32, height: i32, unit: i32 },
    #[error("board {width}x{height} has no room beside a {cells}-cell snake")]
    BoardTooSmall { width: i32, height: i32, cells: i32 },
    #[error("tick interval must be positive")]
    ZeroTick,
    #[error("tick interval {0} ms is longer than a browser timer allows")]
    TickTooLong(u32),
    #[error("food rows bounded by width leave rows {columns}..{rows} unreachable")]
    FoodRowsTooFew { columns: i32, rows: i32 },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// CSS colour names used by every surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub snake: String,
    pub snake_border: String,
    pub food: String,
    pub text: String,
    /// CSS font shorthand for the game-over banner
    pub game_over_font: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            snake: "lightgreen".to_string(),
            snake_border: "black".to_string(),
            food: "red".to_string(),
            text: "black".to_string(),
            game_over_font: "50px MV Boli".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid cell size; positions and velocities are multiples of it
    pub unit_size: i32,
    pub board_width: i32,
    pub board_height: i32,
    /// Delay between ticks in milliseconds
    pub tick_ms: u32,
    /// Bound the food's row by the board width instead of its height.
    ///
    /// Reproduces the layout of the first release, where food rows were
    /// drawn from the column range. Only allowed on boards at least as wide
    /// as they are tall; on taller boards the bottom rows could never hold
    /// food and the game would be won before the snake filled them.
    pub food_rows_from_width: bool,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unit_size: UNIT_SIZE,
            board_width: BOARD_SIZE,
            board_height: BOARD_SIZE,
            tick_ms: TICK_MS,
            food_rows_from_width: false,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Default settings resized to a given board
    pub fn with_board(width: i32, height: i32) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let unit = self.unit_size;
        if unit <= 0 {
            return Err(SettingsError::InvalidUnitSize(unit));
        }
        if self.board_width <= 0
            || self.board_height <= 0
            || self.board_width % unit != 0
            || self.board_height % unit != 0
        {
            return Err(SettingsError::MisalignedBoard {
                width: self.board_width,
                height: self.board_height,
                unit,
            });
        }
        if self.columns() < INITIAL_SNAKE_LENGTH
            || self.columns() * self.rows() <= INITIAL_SNAKE_LENGTH
        {
            return Err(SettingsError::BoardTooSmall {
                width: self.board_width,
                height: self.board_height,
                cells: INITIAL_SNAKE_LENGTH,
            });
        }
        if self.food_rows_from_width && self.columns() < self.rows() {
            return Err(SettingsError::FoodRowsTooFew {
                columns: self.columns(),
                rows: self.rows(),
            });
        }
        if self.tick_ms == 0 {
            return Err(SettingsError::ZeroTick);
        }
        // setTimeout takes a signed 32-bit delay
        if self.tick_ms > i32::MAX as u32 {
            return Err(SettingsError::TickTooLong(self.tick_ms));
        }
        Ok(())
    }

    pub fn columns(&self) -> i32 {
        self.board_width / self.unit_size
    }

    pub fn rows(&self) -> i32 {
        self.board_height / self.unit_size
    }

    /// Number of rows food may be placed on
    pub fn food_rows(&self) -> i32 {
        if self.food_rows_from_width {
            self.columns()
        } else {
            self.rows()
        }
    }

    /// Load settings from the file named by `SNAKE_SETTINGS` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, SettingsError> {
        let Ok(path) = std::env::var(SETTINGS_ENV_VAR) else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.columns(), 20);
        assert_eq!(settings.rows(), 20);
        assert_eq!(settings.palette.food, "red");
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let settings = Settings::from_json(r#"{ "board_height": 250, "tick_ms": 100 }"#).unwrap();
        assert_eq!(settings.board_width, 500);
        assert_eq!(settings.board_height, 250);
        assert_eq!(settings.tick_ms, 100);
        assert_eq!(settings.palette, Palette::default());
    }

    #[test]
    fn test_food_rows_bound() {
        let mut settings = Settings::with_board(500, 250);
        assert_eq!(settings.food_rows(), 10);
        settings.food_rows_from_width = true;
        assert_eq!(settings.food_rows(), 20);
    }

    #[test]
    fn test_food_rows_from_width_needs_wide_board() {
        let mut tall = Settings::with_board(250, 500);
        assert!(tall.validate().is_ok());
        tall.food_rows_from_width = true;
        assert!(matches!(
            tall.validate(),
            Err(SettingsError::FoodRowsTooFew { columns: 10, rows: 20 })
        ));

        let mut wide = Settings::with_board(500, 250);
        wide.food_rows_from_width = true;
        assert!(wide.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let misaligned = Settings::with_board(510, 500);
        assert!(matches!(
            misaligned.validate(),
            Err(SettingsError::MisalignedBoard { .. })
        ));

        let narrow = Settings::with_board(100, 500);
        assert!(matches!(
            narrow.validate(),
            Err(SettingsError::BoardTooSmall { .. })
        ));

        let zero_unit = Settings {
            unit_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_unit.validate(),
            Err(SettingsError::InvalidUnitSize(0))
        ));

        let zero_tick = Settings {
            tick_ms: 0,
            ..Default::default()
        };
        assert!(matches!(zero_tick.validate(), Err(SettingsError::ZeroTick)));

        let long_tick = Settings {
            tick_ms: i32::MAX as u32 + 1,
            ..Default::default()
        };
        assert!(matches!(
            long_tick.validate(),
            Err(SettingsError::TickTooLong(_))
        ));
        let longest_tick = Settings {
            tick_ms: i32::MAX as u32,
            ..Default::default()
        };
        assert!(longest_tick.validate().is_ok());

        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
