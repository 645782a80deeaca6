use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// One terminal character with its colours.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph { ch: ' ', fg: Color::Reset, bg: Color::Reset };

    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

/// A full canvas worth of glyphs, composed off-screen and then handed to
/// [`TermManager::draw_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: TermInt,
    height: TermInt,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn new(width: TermInt, height: TermInt, fill: Glyph) -> Self {
        Frame { width, height, glyphs: vec![fill; width as usize * height as usize] }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn get(&self, pos: Coords) -> Option<Glyph> {
        self.index(pos).map(|i| self.glyphs[i])
    }

    /// Writes a glyph. Positions off the canvas are dropped.
    pub fn set(&mut self, pos: Coords, glyph: Glyph) {
        if let Some(i) = self.index(pos) {
            self.glyphs[i] = glyph;
        }
    }

    /// Writes `text` left to right starting at `pos`, clipped at the right edge.
    pub fn put_str(&mut self, pos: Coords, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            let x = pos.0 as usize + i;
            if x >= self.width as usize {
                break;
            }
            self.set((x as TermInt, pos.1), Glyph::new(ch, fg, bg));
        }
    }

    /// Row-major iteration over every position and its glyph.
    pub fn iter(&self) -> impl Iterator<Item = (Coords, Glyph)> + '_ {
        let width = self.width as usize;
        self.glyphs
            .iter()
            .enumerate()
            .map(move |(i, g)| (((i % width) as TermInt, (i / width) as TermInt), *g))
    }

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.width && pos.1 < self.height {
            Some(self.width as usize * pos.1 as usize + pos.0 as usize)
        } else {
            None
        }
    }
}

/// Owns the terminal while the game runs: raw mode, the alternate screen and
/// a copy of what is currently on screen so only changed glyphs get written.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    origin: Coords,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
    message_style: (Color, Color),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    /// Prepares a `width` by `height` canvas centred in the terminal.
    pub fn new(width: TermInt, height: TermInt) -> Result<Self> {
        let term_size = terminal::size().context("reading terminal size")?;
        let origin = match centered_origin(term_size, (width, height)) {
            Some(origin) => origin,
            None => bail!(
                "terminal is {}x{}, the game needs at least {}x{}",
                term_size.0, term_size.1, width, height
            ),
        };

        Ok(TermManager {
            width,
            height,
            origin,
            stdout: stdout(),
            screen: vec![Glyph::BLANK; width as usize * height as usize],
            current_msg: None,
            message_style: (Color::White, Color::Black),
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("hiding cursor")?;
        self.clear()
    }

    /// Undoes `setup`. Every step runs even if an earlier one failed; the
    /// first failure is returned.
    pub fn restore(&mut self) -> Result<()> {
        let raw = terminal::disable_raw_mode().context("disabling raw mode");
        let screen = execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("leaving alternate screen");
        first_error([raw, screen])
    }

    /// Waits up to `timeout` for a key press.
    pub fn poll_key(&self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    /// Drains every key press already waiting in the queue.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn set_message_style(&mut self, fg: Color, bg: Color) {
        self.message_style = (fg, bg);
    }

    /// Brings the screen in line with `frame`, writing only what changed.
    pub fn draw_frame(&mut self, frame: &Frame) -> Result<()> {
        debug_assert_eq!((frame.width(), frame.height()), (self.width, self.height));

        for (pos, glyph) in frame.iter() {
            self.print_at(pos, glyph)?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg = Message::centered((self.width, self.height), lines);
        let (fg, bg) = self.message_style;

        // Print the top and bottom empty lines
        for y in [msg.top_left.1, msg.top_left.1 + msg.height - 1].iter() {
            for x_diff in 0..msg.width {
                self.print_at_no_save((msg.top_left.0 + x_diff, *y), Glyph::new(' ', fg, bg))?;
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg.width as usize);
            let y = msg.top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_at_no_save((msg.top_left.0 + x_diff as TermInt, y), Glyph::new(ch, fg, bg))?;
            }
        }

        self.current_msg = Some(msg);
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let pos = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let glyph = self.screen[self.index(pos)];
                self.print_at_no_save(pos, glyph)?;
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    /// Records `glyph` at `pos` and writes it unless it is already there or
    /// a message box covers it.
    pub fn print_at(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        let i = self.index(pos);
        if self.screen[i] == glyph {
            return Ok(());
        }
        self.screen[i] = glyph;

        if self.current_msg.as_ref().map_or(false, |m| m.covers(pos)) {
            return Ok(());
        }

        self.print_at_no_save(pos, glyph)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All)).context("clearing screen")?;
        self.screen = vec![Glyph::BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing stdout")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at_no_save(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        // Used for message boxes, which must not overwrite the buffer they are restored from
        let (x, y) = (self.origin.0 + pos.0, self.origin.1 + pos.1);
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            SetForegroundColor(glyph.fg),
            SetBackgroundColor(glyph.bg),
            Print(glyph.ch)
        )?;
        Ok(())
    }

    fn index(&self, pos: Coords) -> usize {
        self.width as usize * pos.1 as usize + pos.0 as usize
    }
}

impl Message {
    /// A box sized for `lines` plus one blank row above and below and one
    /// column of padding each side, centred on the canvas.
    fn centered(canvas: Coords, lines: &[&str]) -> Self {
        let height = (lines.len() + 2) as TermInt;
        let width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let width = width.min(canvas.0);
        let height = height.min(canvas.1);
        let top_left = ((canvas.0 - width) / 2, (canvas.1 - height) / 2);
        Message { top_left, width, height }
    }

    fn covers(&self, pos: Coords) -> bool {
        pos.0 >= self.top_left.0
            && pos.0 < self.top_left.0 + self.width
            && pos.1 >= self.top_left.1
            && pos.1 < self.top_left.1 + self.height
    }
}

fn first_error<I: IntoIterator<Item = Result<()>>>(steps: I) -> Result<()> {
    steps.into_iter().find(|r| r.is_err()).unwrap_or(Ok(()))
}

/// Top-left terminal position that centres `canvas`, or `None` if it does not fit.
pub fn centered_origin(term_size: Coords, canvas: Coords) -> Option<Coords> {
    let x = term_size.0.checked_sub(canvas.0)?;
    let y = term_size.1.checked_sub(canvas.1)?;
    Some((x / 2, y / 2))
}
