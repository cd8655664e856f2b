//! Game state and core simulation types

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::GameOverCause;
use super::food::place_food;
use crate::consts::INITIAL_SNAKE_LENGTH;
use crate::input::{Direction, steer};
use crate::settings::Settings;

/// Playfield geometry, in surface units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub unit: i32,
    pub width: i32,
    pub height: i32,
    /// Rows food is drawn from (see `Settings::food_rows_from_width`)
    pub food_rows: i32,
}

impl Board {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            unit: settings.unit_size,
            width: settings.board_width,
            height: settings.board_height,
            food_rows: settings.food_rows(),
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.unit
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Body segments, head first
    pub snake: VecDeque<IVec2>,
    pub food: IVec2,
    /// Velocity the next step will apply
    pub velocity: IVec2,
    pub score: u32,
    pub running: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Why the last game ended
    pub game_over: Option<GameOverCause>,
}

impl GameState {
    /// Create a fresh, running game
    pub fn new(board: Board, seed: u64) -> Self {
        let mut state = Self {
            board,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            snake: VecDeque::new(),
            food: IVec2::ZERO,
            velocity: IVec2::ZERO,
            score: 0,
            running: false,
            time_ticks: 0,
            game_over: None,
        };
        state.reset();
        state
    }

    /// Restore start values and place new food; the RNG stream carries on
    pub fn reset(&mut self) {
        self.running = false;
        let unit = self.board.unit;
        self.velocity = Direction::Right.velocity(unit);
        self.snake = initial_snake(unit);
        self.score = 0;
        self.time_ticks = 0;
        self.game_over = None;
        self.food = place_food(&mut self.rng, &self.board, &self.snake)
            .expect("validated board leaves room for food");
        self.running = true;
    }

    pub fn head(&self) -> IVec2 {
        *self.snake.front().expect("snake is never empty")
    }

    /// Apply a direction key, last write wins until the next step
    ///
    /// Keys that would reverse the pending velocity, or that arrive after the
    /// game ended, are dropped.
    pub fn change_direction(&mut self, direction: Direction) {
        if !self.running {
            return;
        }
        self.velocity = steer(self.velocity, direction, self.board.unit);
    }

    /// Whether `pos` is on any snake segment
    pub fn is_occupied_by_snake(&self, pos: IVec2) -> bool {
        self.snake.contains(&pos)
    }
}

/// Horizontal snake in the top-left corner, head pointing right
pub fn initial_snake(unit: i32) -> VecDeque<IVec2> {
    (0..INITIAL_SNAKE_LENGTH)
        .rev()
        .map(|i| IVec2::new(unit * i, 0))
        .collect()
}
