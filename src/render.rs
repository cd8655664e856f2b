//! Drawing-surface abstraction and the board painter
//!
//! A `Surface` is anything that accepts the four primitives the game needs:
//! filled rect, stroked rect, filled circle and centred text. The painter
//! functions read `GameState` and never change it.

use crate::settings::Palette;
use crate::sim::{GameOverCause, GameState};

/// 2D drawing target with a fixed size. Colours are CSS colour names.
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str);
    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str);
    /// Draw `text` centred on (x, y)
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);
}

/// Text sink showing the current score
pub trait ScoreSink {
    fn set_score(&mut self, score: u32);
}

/// Paint the background over the whole surface
pub fn clear_board<S: Surface + ?Sized>(surface: &mut S, palette: &Palette) {
    let (w, h) = (surface.width(), surface.height());
    surface.fill_rect(0, 0, w, h, &palette.background);
}

/// Food is a circle inscribed in its cell
pub fn draw_food<S: Surface + ?Sized>(surface: &mut S, state: &GameState, palette: &Palette) {
    let half = state.board.unit as f64 / 2.0;
    surface.fill_circle(
        state.food.x as f64 + half,
        state.food.y as f64 + half,
        half,
        &palette.food,
    );
}

pub fn draw_snake<S: Surface + ?Sized>(surface: &mut S, state: &GameState, palette: &Palette) {
    let unit = state.board.unit;
    for segment in &state.snake {
        surface.fill_rect(segment.x, segment.y, unit, unit, &palette.snake);
        surface.stroke_rect(segment.x, segment.y, unit, unit, &palette.snake_border);
    }
}

/// Terminal banner in the middle of the board
pub fn draw_game_over<S: Surface + ?Sized>(
    surface: &mut S,
    cause: Option<GameOverCause>,
    palette: &Palette,
) {
    let banner = cause.map_or("GAME OVER!", |c| c.banner());
    let (cx, cy) = (surface.width() as f64 / 2.0, surface.height() as f64 / 2.0);
    surface.fill_text(banner, cx, cy, &palette.game_over_font, &palette.text);
}

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { x: i32, y: i32, w: i32, h: i32, color: String },
    StrokeRect { x: i32, y: i32, w: i32, h: i32, color: String },
    FillCircle { cx: f64, cy: f64, radius: f64, color: String },
    Text { text: String, x: f64, y: f64 },
}

/// In-memory surface that records what was drawn
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    width: i32,
    height: i32,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DrawList {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.commands.push(DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _font: &str, _color: &str) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}

/// Score sink that remembers every value it was given
#[derive(Debug, Clone, Default)]
pub struct ScoreLog {
    pub values: Vec<u32>,
}

impl ScoreLog {
    pub fn last(&self) -> Option<u32> {
        self.values.last().copied()
    }
}

impl ScoreSink for ScoreLog {
    fn set_score(&mut self, score: u32) {
        self.values.push(score);
    }
}
