//! Terminal front-end
//!
//! Rasterises the board into a grid of character cells, two columns per
//! board cell so squares look square. Drawing goes into an in-memory grid;
//! `present` flushes it through crossterm in one pass.
//!
//! Logs go to stderr, so run with `RUST_LOG=debug snake-canvas 2>snake.log`
//! to keep them off the board.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{QueueableCommand, cursor, terminal};

use crate::driver::{Game, Schedule, TickTicket};
use crate::input::Direction;
use crate::render::{ScoreSink, Surface};
use crate::settings::Settings;

/// Poll interval while no tick is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Terminal columns per board cell
const CELL_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Character-grid surface sized to the board
pub struct TerminalSurface {
    width: i32,
    height: i32,
    unit: i32,
    columns: usize,
    rows: usize,
    glyphs: Vec<Glyph>,
}

impl TerminalSurface {
    pub fn new(settings: &Settings) -> Self {
        let columns = settings.columns() as usize * CELL_COLUMNS;
        let rows = settings.rows() as usize;
        Self {
            width: settings.board_width,
            height: settings.board_height,
            unit: settings.unit_size,
            columns,
            rows,
            glyphs: vec![Glyph::default(); columns * rows],
        }
    }

    pub fn glyph(&self, column: usize, row: usize) -> Option<Glyph> {
        (column < self.columns && row < self.rows)
            .then(|| self.glyphs[row * self.columns + column])
    }

    fn glyph_mut(&mut self, column: usize, row: usize) -> Option<&mut Glyph> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(&mut self.glyphs[row * self.columns + column])
    }

    /// Board cells touched by a rectangle, clipped to the board
    fn cells_in(&self, x: i32, y: i32, w: i32, h: i32) -> impl Iterator<Item = (usize, usize)> {
        let unit = self.unit;
        let x0 = x.max(0) / unit;
        let y0 = y.max(0) / unit;
        let x1 = (x + w).min(self.width);
        let y1 = (y + h).min(self.height);
        let x1 = if x1 > 0 { (x1 + unit - 1) / unit } else { 0 };
        let y1 = if y1 > 0 { (y1 + unit - 1) / unit } else { 0 };
        (y0..y1).flat_map(move |row| (x0..x1).map(move |col| (col as usize, row as usize)))
    }

    /// Set both terminal columns of a board cell
    fn paint_cell(
        &mut self,
        col: usize,
        row: usize,
        chars: [char; CELL_COLUMNS],
        fg: Option<Color>,
        bg: Option<Color>,
    ) {
        for (i, ch) in chars.into_iter().enumerate() {
            if let Some(glyph) = self.glyph_mut(col * CELL_COLUMNS + i, row) {
                glyph.ch = ch;
                if let Some(fg) = fg {
                    glyph.fg = fg;
                }
                if let Some(bg) = bg {
                    glyph.bg = bg;
                }
            }
        }
    }

    /// Flush the grid and a status line below it
    pub fn present<W: Write>(&self, out: &mut W, score: u32) -> io::Result<()> {
        out.queue(cursor::MoveTo(0, 0))?;
        for row in 0..self.rows {
            for glyph in &self.glyphs[row * self.columns..(row + 1) * self.columns] {
                out.queue(SetForegroundColor(glyph.fg))?;
                out.queue(SetBackgroundColor(glyph.bg))?;
                out.queue(Print(glyph.ch))?;
            }
            out.queue(ResetColor)?;
            out.queue(Print("\r\n"))?;
        }
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.queue(Print(format!(
            "Score: {}   arrows/WASD steer, r reset, q quit",
            score
        )))?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str) {
        let bg = css_color(color);
        let cells: Vec<_> = self.cells_in(x, y, w, h).collect();
        for (col, row) in cells {
            self.paint_cell(col, row, [' ', ' '], None, Some(bg));
        }
    }

    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: &str) {
        let fg = css_color(color);
        let cells: Vec<_> = self.cells_in(x, y, w, h).collect();
        for (col, row) in cells {
            self.paint_cell(col, row, ['[', ']'], Some(fg), None);
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, _radius: f64, color: &str) {
        if cx < 0.0 || cy < 0.0 {
            return;
        }
        let col = (cx as i32 / self.unit) as usize;
        let row = (cy as i32 / self.unit) as usize;
        self.paint_cell(col, row, ['(', ')'], Some(css_color(color)), None);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _font: &str, color: &str) {
        let fg = css_color(color);
        let row = (y as i32 / self.unit).max(0) as usize;
        let centre = (x as i32 / self.unit).max(0) as usize * CELL_COLUMNS;
        let start = centre.saturating_sub(text.chars().count() / 2);
        for (i, ch) in text.chars().enumerate() {
            if let Some(glyph) = self.glyph_mut(start + i, row) {
                glyph.ch = ch;
                glyph.fg = fg;
            }
        }
    }
}

/// Score shown on the status line
#[derive(Debug, Default)]
pub struct StatusLine {
    pub score: u32,
}

impl ScoreSink for StatusLine {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

/// Map a CSS colour name onto the closest terminal colour
pub fn css_color(name: &str) -> Color {
    let name = name.trim().to_ascii_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(rgb) = u32::from_str_radix(hex, 16) {
                return Color::Rgb {
                    r: (rgb >> 16) as u8,
                    g: (rgb >> 8) as u8,
                    b: rgb as u8,
                };
            }
        }
        return Color::Reset;
    }

    match name.as_str() {
        "white" => Color::White,
        "black" => Color::Black,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "lightgreen" | "lime" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" => Color::DarkGrey,
        _ => Color::Reset,
    }
}

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Reset,
    Quit,
}

pub fn decode_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Left => Some(Command::Steer(Direction::Left)),
        KeyCode::Up => Some(Command::Steer(Direction::Up)),
        KeyCode::Right => Some(Command::Steer(Direction::Right)),
        KeyCode::Down => Some(Command::Steer(Direction::Down)),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        KeyCode::Char(c) => Direction::from_key(c.encode_utf8(&mut [0; 4])).map(Command::Steer),
        _ => None,
    }
}

/// Play in the current terminal until the player quits
pub fn run(settings: Settings, seed: u64) -> Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.queue(terminal::EnterAlternateScreen)?;
    stdout.queue(cursor::Hide)?;
    stdout.queue(terminal::Clear(terminal::ClearType::All))?;
    stdout.flush()?;

    let result = play(&mut stdout, settings, seed);

    // Always try to restore terminal state.
    let _ = stdout.queue(ResetColor);
    let _ = stdout.queue(cursor::Show);
    let _ = stdout.queue(terminal::LeaveAlternateScreen);
    let _ = stdout.flush();
    let _ = terminal::disable_raw_mode();
    result
}

fn play<W: Write>(out: &mut W, settings: Settings, seed: u64) -> Result<()> {
    let mut surface = TerminalSurface::new(&settings);
    let mut status = StatusLine::default();
    let mut game = Game::new(settings, seed)?;

    let mut pending = due(game.start(&mut surface, &mut status));
    surface.present(out, status.score)?;

    loop {
        let timeout = pending
            .as_ref()
            .map_or(IDLE_POLL, |(_, at)| at.saturating_duration_since(Instant::now()));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match decode_key(key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Reset) => {
                        pending = due(game.reset(&mut surface, &mut status));
                        surface.present(out, status.score)?;
                    }
                    Some(Command::Steer(direction)) => game.change_direction(direction),
                    None => {}
                }
            }
        }

        if pending.as_ref().is_some_and(|(_, at)| Instant::now() >= *at) {
            if let Some((ticket, _)) = pending.take() {
                pending = due(game.tick(ticket, &mut surface, &mut status));
                surface.present(out, status.score)?;
            }
        }
    }
}

fn due(schedule: Schedule) -> Option<(TickTicket, Instant)> {
    match schedule {
        Schedule::After { ticket, delay } => Some((ticket, Instant::now() + delay)),
        Schedule::Stop => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;
    use crate::sim::{Board, GameState};

    fn surface() -> TerminalSurface {
        TerminalSurface::new(&Settings::with_board(250, 125))
    }

    #[test]
    fn test_snake_rasterised_two_columns_per_cell() {
        let settings = Settings::with_board(250, 125);
        let state = GameState::new(Board::from_settings(&settings), 1);
        let mut surface = surface();

        render::clear_board(&mut surface, &settings.palette);
        render::draw_snake(&mut surface, &state, &settings.palette);

        let head_left = surface.glyph(8, 0).unwrap();
        let head_right = surface.glyph(9, 0).unwrap();
        assert_eq!((head_left.ch, head_right.ch), ('[', ']'));
        assert_eq!(head_left.bg, Color::Green);
        assert_eq!(head_left.fg, Color::Black);

        let empty = surface.glyph(0, 1).unwrap();
        assert_eq!(empty.ch, ' ');
        assert_eq!(empty.bg, Color::White);
    }

    #[test]
    fn test_off_board_segments_clipped() {
        let mut surface = surface();
        surface.fill_rect(-25, 0, 25, 25, "lightgreen");
        surface.fill_rect(250, 0, 25, 25, "lightgreen");
        assert!(surface.glyphs.iter().all(|g| g.bg == Color::Reset));
    }

    #[test]
    fn test_food_and_text() {
        let mut surface = surface();
        surface.fill_circle(62.5, 37.5, 12.5, "red");
        assert_eq!(surface.glyph(4, 1).unwrap().ch, '(');
        assert_eq!(surface.glyph(5, 1).unwrap().fg, Color::Red);

        surface.fill_text("GAME OVER!", 125.0, 62.5, "50px MV Boli", "black");
        let row: String = (0..surface.columns)
            .map(|c| surface.glyph(c, 2).unwrap().ch)
            .collect();
        assert!(row.contains("GAME OVER!"));
    }

    #[test]
    fn test_present_writes_status_line() {
        let surface = surface();
        let mut out = Vec::new();
        surface.present(&mut out, 7).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Score: 7"));
    }

    #[test]
    fn test_css_colors() {
        assert_eq!(css_color("LightGreen"), Color::Green);
        assert_eq!(
            css_color("#ff8000"),
            Color::Rgb {
                r: 255,
                g: 128,
                b: 0
            }
        );
        assert_eq!(css_color("papayawhip"), Color::Reset);
    }

    #[test]
    fn test_key_decoding() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(
            decode_key(key(KeyCode::Left)),
            Some(Command::Steer(Direction::Left))
        );
        assert_eq!(
            decode_key(key(KeyCode::Char('s'))),
            Some(Command::Steer(Direction::Down))
        );
        assert_eq!(decode_key(key(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(decode_key(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            decode_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(decode_key(key(KeyCode::Char('x'))), None);
        assert_eq!(decode_key(key(KeyCode::Enter)), None);
    }
}
