//! Tick driver
//!
//! Owns the game state and runs one render/step/check pass per timer firing.
//! Platforms own the actual timer: every pass returns a `Schedule` telling
//! them whether and when to call back. A `TickTicket` is only honoured if it
//! belongs to the current loop, so a timer left over from before a reset
//! fires into nothing and at most one loop is ever live.

use std::time::Duration;

use crate::input::Direction;
use crate::render::{self, ScoreSink, Surface};
use crate::settings::{Settings, SettingsError};
use crate::sim::{self, Board, GameState};

/// Permission to run one tick of a specific loop
#[derive(Debug, PartialEq, Eq)]
pub struct TickTicket {
    generation: u64,
}

/// What the platform should do after a pass
#[derive(Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Call `Game::tick` with `ticket` after `delay`
    After { ticket: TickTicket, delay: Duration },
    /// The loop is finished until the next start or reset
    Stop,
}

pub struct Game {
    settings: Settings,
    state: GameState,
    /// Current loop; bumped whenever a new loop starts
    generation: u64,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let state = GameState::new(Board::from_settings(&settings), seed);
        Ok(Self {
            settings,
            state,
            generation: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.settings.tick_ms))
    }

    /// Begin a new loop, superseding any ticket already handed out
    pub fn start<S, K>(&mut self, surface: &mut S, score: &mut K) -> Schedule
    where
        S: Surface + ?Sized,
        K: ScoreSink + ?Sized,
    {
        self.state.running = true;
        self.generation += 1;
        score.set_score(self.state.score);
        render::draw_food(surface, &self.state, &self.settings.palette);
        log::info!(
            "Game started (seed {}, loop {})",
            self.state.seed,
            self.generation
        );
        self.arm()
    }

    /// Stop the current loop, restore start values and start again
    pub fn reset<S, K>(&mut self, surface: &mut S, score: &mut K) -> Schedule
    where
        S: Surface + ?Sized,
        K: ScoreSink + ?Sized,
    {
        self.state.running = false;
        self.state.reset();
        score.set_score(self.state.score);
        log::info!("Game reset");
        self.start(surface, score)
    }

    pub fn change_direction(&mut self, direction: Direction) {
        self.state.change_direction(direction);
    }

    /// Run one pass: clear, food, step, snake, game-over check, reschedule
    pub fn tick<S, K>(&mut self, ticket: TickTicket, surface: &mut S, score: &mut K) -> Schedule
    where
        S: Surface + ?Sized,
        K: ScoreSink + ?Sized,
    {
        if ticket.generation != self.generation {
            log::debug!(
                "Dropping tick for loop {} (current {})",
                ticket.generation,
                self.generation
            );
            return Schedule::Stop;
        }

        if self.state.running {
            let palette = &self.settings.palette;
            render::clear_board(surface, palette);
            render::draw_food(surface, &self.state, palette);

            let events = sim::step(&mut self.state);
            if events.ate_food {
                score.set_score(self.state.score);
            }

            render::draw_snake(surface, &self.state, palette);
            sim::check_game_over(&mut self.state);
        }

        self.next_tick(surface)
    }

    fn next_tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Schedule {
        if self.state.running {
            return self.arm();
        }

        log::info!(
            "Game over ({:?}) with score {} after {} ticks",
            self.state.game_over,
            self.state.score,
            self.state.time_ticks
        );
        render::draw_game_over(surface, self.state.game_over, &self.settings.palette);
        Schedule::Stop
    }

    fn arm(&self) -> Schedule {
        Schedule::After {
            ticket: TickTicket {
                generation: self.generation,
            },
            delay: self.tick_delay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList, ScoreLog};
    use crate::sim::GameOverCause;
    use glam::IVec2;
    use std::collections::VecDeque;

    fn setup() -> (Game, DrawList, ScoreLog) {
        let game = Game::new(Settings::default(), 2024).unwrap();
        (game, DrawList::new(500, 500), ScoreLog::default())
    }

    fn ticket(schedule: Schedule) -> TickTicket {
        match schedule {
            Schedule::After { ticket, .. } => ticket,
            Schedule::Stop => panic!("loop stopped unexpectedly"),
        }
    }

    #[test]
    fn test_start_arms_one_tick() {
        let (mut game, mut surface, mut score) = setup();

        let schedule = game.start(&mut surface, &mut score);

        assert!(matches!(
            schedule,
            Schedule::After { delay, .. } if delay == Duration::from_millis(75)
        ));
        assert_eq!(score.values, vec![0]);
        assert!(matches!(surface.commands[0], DrawCommand::FillCircle { .. }));
    }

    #[test]
    fn test_tick_order() {
        let (mut game, mut surface, mut score) = setup();
        let t = ticket(game.start(&mut surface, &mut score));
        game.state_mut().food = IVec2::new(300, 300);
        surface.clear();

        let next = game.tick(t, &mut surface, &mut score);

        assert!(matches!(next, Schedule::After { .. }));
        assert!(matches!(
            surface.commands[0],
            DrawCommand::FillRect { x: 0, y: 0, w: 500, h: 500, .. }
        ));
        assert!(matches!(surface.commands[1], DrawCommand::FillCircle { .. }));
        assert!(matches!(
            surface.commands[2],
            DrawCommand::FillRect { x: 125, y: 0, w: 25, h: 25, .. }
        ));
        assert_eq!(surface.commands.len(), 2 + 2 * 5);
        assert_eq!(game.state().head(), IVec2::new(125, 0));
    }

    #[test]
    fn test_score_pushed_on_food() {
        let (mut game, mut surface, mut score) = setup();
        let t = ticket(game.start(&mut surface, &mut score));
        game.state_mut().food = IVec2::new(125, 0);

        game.tick(t, &mut surface, &mut score);

        assert_eq!(score.values, vec![0, 1]);
        assert_eq!(game.state().snake.len(), 6);
    }

    #[test]
    fn test_game_over_stops_loop() {
        let (mut game, mut surface, mut score) = setup();
        let t = ticket(game.start(&mut surface, &mut score));
        {
            let state = game.state_mut();
            state.snake = VecDeque::from(vec![IVec2::new(0, 0), IVec2::new(25, 0)]);
            state.velocity = IVec2::new(-25, 0);
            state.food = IVec2::new(300, 300);
        }

        let next = game.tick(t, &mut surface, &mut score);

        assert_eq!(next, Schedule::Stop);
        assert!(!game.state().running);
        assert_eq!(game.state().game_over, Some(GameOverCause::Wall));
        assert_eq!(surface.texts(), vec!["GAME OVER!"]);
    }

    #[test]
    fn test_reset_cancels_pending_tick() {
        let (mut game, mut surface, mut score) = setup();
        let stale = ticket(game.start(&mut surface, &mut score));
        game.change_direction(Direction::Down);

        let fresh = ticket(game.reset(&mut surface, &mut score));
        surface.clear();

        assert_eq!(game.tick(stale, &mut surface, &mut score), Schedule::Stop);
        assert!(surface.commands.is_empty());
        assert_eq!(game.state().head(), IVec2::new(100, 0));

        assert!(matches!(
            game.tick(fresh, &mut surface, &mut score),
            Schedule::After { .. }
        ));
    }

    #[test]
    fn test_reset_after_game_over() {
        let (mut game, mut surface, mut score) = setup();
        let t = ticket(game.start(&mut surface, &mut score));
        {
            let state = game.state_mut();
            state.snake = VecDeque::from(vec![IVec2::new(475, 0), IVec2::new(450, 0)]);
            state.score = 4;
        }
        assert_eq!(game.tick(t, &mut surface, &mut score), Schedule::Stop);

        let schedule = game.reset(&mut surface, &mut score);

        let state = game.state();
        assert!(matches!(schedule, Schedule::After { .. }));
        assert!(state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.velocity, IVec2::new(25, 0));
        assert_eq!(
            state.snake.iter().copied().collect::<Vec<_>>(),
            [100, 75, 50, 25, 0].map(|x| IVec2::new(x, 0)).to_vec()
        );
        assert!(!state.is_occupied_by_snake(state.food));
        assert_eq!(score.last(), Some(0));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings::with_board(510, 500);
        assert!(Game::new(settings, 1).is_err());
    }
}
