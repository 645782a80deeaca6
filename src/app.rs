//! The terminal shell around [`Game`]: key mapping, the fixed tick and drawing.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use tracing::debug;

use crate::consts::{FOOTER_TOP, GRID_HEIGHT, GRID_WIDTH, HEADER_ROWS, TICK_INTERVAL_MS};
use crate::game::{Game, Snapshot, Status};
use crate::rng::AppleSource;
use crate::snake::{Cell, Direction::{self, *}};
use crate::term::{Frame, Glyph, TermInt, TermManager};

/// Terminal columns per grid cell, so cells come out roughly square.
pub const CELL_COLS: TermInt = 2;
pub const CANVAS_WIDTH: TermInt = GRID_WIDTH as TermInt * CELL_COLS;
pub const CANVAS_HEIGHT: TermInt = GRID_HEIGHT as TermInt;

const BACKGROUND: Color = Color::Rgb { r: 0xA9, g: 0xF5, b: 0xD0 };
const BAR: Color = Color::Rgb { r: 25, g: 80, b: 0 };
const SNAKE: Color = Color::Rgb { r: 255, g: 128, b: 0 };
const APPLE: Color = Color::Rgb { r: 220, g: 20, b: 60 };
const TEXT: Color = Color::White;

const HELP: &str = "P - pause game / SPACE - start new game";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Turn(Direction),
    Pause,
    Resume,
    NewGame,
}

/// Maps a key press to a command. Which keys do anything depends on whether
/// the game is currently paused (manually or by a crash).
pub fn command_for(key: &KeyEvent, paused: bool) -> Option<Command> {
    if key.code == KeyCode::Esc || is_ctrl_c(key) {
        return Some(Command::Quit);
    }

    if paused {
        return match key.code {
            KeyCode::Char(' ') => Some(Command::NewGame),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Resume),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
        _ => None,
    }
}

/// Draws a snapshot onto a fresh canvas.
pub fn compose(snap: &Snapshot<'_>) -> Frame {
    let mut frame = Frame::new(CANVAS_WIDTH, CANVAS_HEIGHT, Glyph::new(' ', TEXT, BACKGROUND));

    for row in (0..HEADER_ROWS).chain(FOOTER_TOP..GRID_HEIGHT) {
        for x in 0..CANVAS_WIDTH {
            frame.set((x, row as TermInt), Glyph::new(' ', TEXT, BAR));
        }
    }

    let head = snap.cells.len().saturating_sub(1);
    for (i, cell) in snap.cells.iter().enumerate() {
        let ch = if i == head { snap.direction.head_char() } else { ' ' };
        fill_cell(&mut frame, *cell, ch, SNAKE);
    }

    if let Some(apple) = snap.apple {
        fill_cell(&mut frame, apple, ' ', APPLE);
    }

    frame.put_str((2, 0), &format!("SCORE: {}", snap.score), TEXT, BAR);
    let high = format!("HIGHSCORE: {}", snap.highscore);
    let high_x = CANVAS_WIDTH.saturating_sub(high.len() as TermInt + 2);
    frame.put_str((high_x, 0), &high, TEXT, BAR);
    frame.put_str((2, CANVAS_HEIGHT - 1), HELP, TEXT, BAR);

    frame
}

pub struct App<'t, A> {
    term: &'t mut TermManager,
    game: Game<A>,
    shown: Status,
}

impl<'t, A: AppleSource> App<'t, A> {
    pub fn new(term: &'t mut TermManager, game: Game<A>) -> Self {
        term.set_message_style(TEXT, BAR);
        App { term, game, shown: Status::Running }
    }

    /// Runs until the player quits.
    pub fn run(&mut self) -> Result<()> {
        let mut ticker = Ticker::new(Duration::from_millis(TICK_INTERVAL_MS), Instant::now());

        loop {
            self.game.spawn_apple();
            self.draw()?;

            let timeout = ticker.timeout(Instant::now());
            let mut keys: Vec<KeyEvent> = self.term.poll_key(timeout)?.into_iter().collect();
            keys.extend(self.term.read_key_events_queue()?);

            let was_paused = self.game.is_paused();
            for key in &keys {
                if let Some(cmd) = command_for(key, self.game.is_paused()) {
                    if cmd == Command::Quit {
                        return Ok(());
                    }
                    self.apply(cmd);
                }
            }

            // Coming back from a pause waits a full period before the first step.
            if was_paused && !self.game.is_paused() {
                ticker.restart(Instant::now());
            }

            if ticker.due(Instant::now()) {
                self.game.advance();
            }
        }
    }

    fn apply(&mut self, cmd: Command) {
        debug!(?cmd, "key");
        match cmd {
            Command::Turn(d) => self.game.set_direction(d),
            Command::Pause => self.game.pause(),
            Command::Resume => self.game.resume(),
            Command::NewGame => self.game.new_game(),
            Command::Quit => {}
        }
    }

    fn draw(&mut self) -> Result<()> {
        let frame = compose(&self.game.snapshot());
        self.term.draw_frame(&frame)?;

        let status = self.game.status();
        if status != self.shown {
            self.shown = status;
            match status {
                Status::Running => self.term.hide_message()?,
                Status::Paused => {
                    self.term.show_message(&["Paused", "P to resume", "SPACE for a new game"])?
                }
                Status::GameOver => {
                    let score = format!("Score: {}", self.game.score());
                    self.term.show_message(&[
                        "Game over!",
                        &score,
                        "",
                        "Press SPACE to play again,",
                        "or Esc to quit.",
                    ])?
                }
            }
        }

        Ok(())
    }
}

/// Fixed-period timer driving `Game::advance`.
#[derive(Debug, Clone, Copy)]
struct Ticker {
    period: Duration,
    last: Instant,
}

impl Ticker {
    fn new(period: Duration, now: Instant) -> Self {
        Ticker { period, last: now }
    }

    /// How long to wait for input before the next step is due.
    fn timeout(&self, now: Instant) -> Duration {
        self.period.checked_sub(now.saturating_duration_since(self.last)).unwrap_or_default()
    }

    /// Whether a step is due; if so the period starts over from `now`.
    fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }

    fn restart(&mut self, now: Instant) {
        self.last = now;
    }
}

fn fill_cell(frame: &mut Frame, cell: Cell, ch: char, bg: Color) {
    if cell.x < 0 || cell.y < 0 {
        return;
    }
    let x = cell.x as TermInt * CELL_COLS;
    let y = cell.y as TermInt;
    frame.set((x, y), Glyph::new(ch, TEXT, bg));
    for dx in 1..CELL_COLS {
        frame.set((x + dx, y), Glyph::new(' ', TEXT, bg));
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
