//! Direction input and steering
//!
//! Keys are decoded into a `Direction`; `steer` turns a direction into a
//! velocity while refusing to reverse the snake onto its own neck.

use glam::IVec2;

/// Direction the snake can be steered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Decode a DOM `KeyboardEvent.key` value (arrow keys or WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Decode a legacy `keyCode` (37..=40)
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }

    /// Velocity for this direction at the given cell size
    pub fn velocity(self, unit: i32) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-unit, 0),
            Direction::Up => IVec2::new(0, -unit),
            Direction::Right => IVec2::new(unit, 0),
            Direction::Down => IVec2::new(0, unit),
        }
    }
}

/// Map a direction onto `current`, keeping `current` if it would reverse it
pub fn steer(current: IVec2, direction: Direction, unit: i32) -> IVec2 {
    if current == direction.opposite().velocity(unit) {
        current
    } else {
        direction.velocity(unit)
    }
}
