//! Fixed-step simulation
//!
//! `step` moves the snake and handles food; `check_game_over` decides whether
//! the move ended the game. The driver runs them separately so the snake can
//! be drawn in between; `tick` runs both for headless use.

use super::collision::{GameOverCause, detect_collision};
use super::food::place_food;
use super::state::GameState;

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// The head landed on food and the snake grew
    pub ate_food: bool,
    /// Food could not be replaced because the snake covers every cell
    pub board_full: bool,
}

/// Outcome of a full tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub step: StepEvents,
    /// Set on the tick that ended the game
    pub game_over: Option<GameOverCause>,
}

/// Advance the snake by one cell along its velocity
pub fn step(state: &mut GameState) -> StepEvents {
    let new_head = state.head() + state.velocity;
    state.snake.push_front(new_head);
    state.time_ticks += 1;

    let mut events = StepEvents::default();

    if new_head == state.food {
        state.score += 1;
        events.ate_food = true;
        log::debug!("Food eaten at {:?}, score {}", new_head, state.score);

        match place_food(&mut state.rng, &state.board, &state.snake) {
            Some(food) => state.food = food,
            None => {
                events.board_full = true;
                state.running = false;
                state.game_over = Some(GameOverCause::BoardFull);
            }
        }
    } else {
        state.snake.pop_back();
    }

    events
}

/// Stop the game if the head hit a wall or the body
///
/// Returns the cause only on the call that detected it.
pub fn check_game_over(state: &mut GameState) -> Option<GameOverCause> {
    let cause = detect_collision(&state.board, &state.snake)?;
    state.running = false;
    if state.game_over.is_none() {
        state.game_over = Some(cause);
    }
    Some(cause)
}

/// Step and check, doing nothing once the game is over
pub fn tick(state: &mut GameState) -> TickEvents {
    if !state.running {
        return TickEvents::default();
    }

    let step = step(state);
    let game_over =
        check_game_over(state).or(step.board_full.then_some(GameOverCause::BoardFull));

    TickEvents { step, game_over }
}
