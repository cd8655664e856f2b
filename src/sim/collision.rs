//! Terminal-condition detection
//!
//! Runs after every step. The snake may already be half off the board at this
//! point; that is what the wall check looks for.

use std::collections::VecDeque;

use glam::IVec2;

use super::state::Board;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Head left the board
    Wall,
    /// Head landed on a body segment
    SelfCollision,
    /// Snake filled every cell food could go to
    BoardFull,
}

impl GameOverCause {
    /// Banner shown by the terminal render
    pub fn banner(&self) -> &'static str {
        match self {
            GameOverCause::Wall | GameOverCause::SelfCollision => "GAME OVER!",
            GameOverCause::BoardFull => "YOU WIN!",
        }
    }
}

/// Detect wall and self collisions for the current head
///
/// Both scans always run; a wall hit takes precedence when both fire.
pub fn detect_collision(board: &Board, snake: &VecDeque<IVec2>) -> Option<GameOverCause> {
    let head = *snake.front().expect("snake is never empty");

    let hit_wall = !board.contains(head);
    let hit_self = snake.iter().skip(1).any(|segment| *segment == head);

    if hit_wall {
        Some(GameOverCause::Wall)
    } else if hit_self {
        Some(GameOverCause::SelfCollision)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: Board = Board {
        unit: 25,
        width: 500,
        height: 250,
        food_rows: 10,
    };

    fn snake(cells: &[(i32, i32)]) -> VecDeque<IVec2> {
        cells.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    #[test]
    fn test_walls() {
        assert_eq!(detect_collision(&BOARD, &snake(&[(-25, 0)])), Some(GameOverCause::Wall));
        assert_eq!(detect_collision(&BOARD, &snake(&[(500, 0)])), Some(GameOverCause::Wall));
        assert_eq!(detect_collision(&BOARD, &snake(&[(0, -25)])), Some(GameOverCause::Wall));
        assert_eq!(detect_collision(&BOARD, &snake(&[(0, 250)])), Some(GameOverCause::Wall));
        assert_eq!(detect_collision(&BOARD, &snake(&[(475, 225)])), None);
    }

    #[test]
    fn test_self_collision() {
        let looped = snake(&[(50, 75), (50, 50), (75, 50), (75, 75), (50, 75)]);
        assert_eq!(
            detect_collision(&BOARD, &looped),
            Some(GameOverCause::SelfCollision)
        );

        let straight = snake(&[(125, 0), (100, 0), (75, 0)]);
        assert_eq!(detect_collision(&BOARD, &straight), None);
    }

    #[test]
    fn test_banner() {
        assert_eq!(GameOverCause::Wall.banner(), "GAME OVER!");
        assert_eq!(GameOverCause::BoardFull.banner(), "YOU WIN!");
    }
}
