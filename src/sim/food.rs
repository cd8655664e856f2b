//! Food placement

use std::collections::VecDeque;

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::Board;
use crate::consts::MAX_FOOD_ATTEMPTS;

/// Pick a random grid cell that no snake segment covers
///
/// Draws uniformly up to `MAX_FOOD_ATTEMPTS` times, then picks among the
/// remaining free cells directly. Returns `None` when the snake fills the
/// placement area.
pub fn place_food<R: Rng>(
    rng: &mut R,
    board: &Board,
    snake: &VecDeque<IVec2>,
) -> Option<IVec2> {
    let columns = board.columns();
    let rows = board.food_rows;

    for _ in 0..MAX_FOOD_ATTEMPTS {
        let cell = IVec2::new(rng.random_range(0..columns), rng.random_range(0..rows));
        let pos = cell * board.unit;
        if !snake.contains(&pos) {
            return Some(pos);
        }
    }

    log::debug!(
        "Food placement missed {} times, scanning free cells",
        MAX_FOOD_ATTEMPTS
    );

    let free: Vec<IVec2> = (0..rows)
        .flat_map(|y| (0..columns).map(move |x| IVec2::new(x, y)))
        .map(|cell| cell * board.unit)
        .filter(|pos| !snake.contains(pos))
        .collect();
    free.choose(rng).copied()
}
