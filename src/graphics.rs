use core::fmt;
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::text::Text;

/// Clears the visible terminal buffer without moving the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Zero-based cursor position on the screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub column: usize,
    pub row: usize,
}

impl Location {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Returns the location `rows` lines below this one.
    pub fn down(self, rows: usize) -> Self {
        Self {
            column: self.column,
            row: self.row.saturating_add(rows),
        }
    }
}

impl From<(usize, usize)> for Location {
    fn from((column, row): (usize, usize)) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.row)
    }
}

/// Returns the sequence moving the cursor to `location`.
/// Terminals count rows and columns from one.
pub fn locate<L: Into<Location>>(location: L) -> String {
    let Location { column, row } = location.into();
    // ESC [ row ; col H
    format!(
        "\x1b[{};{}H",
        row.saturating_add(1),
        column.saturating_add(1)
    )
}

/// Builds the output drawing `text` as a rectangle whose top left corner
/// is at `location`. Every line is prefixed with its own positioning
/// sequence; nothing follows the last line.
pub fn render_block<L: Into<Location>>(text: &str, location: L) -> String {
    let location = location.into();
    let block = Text::new(text).strip_trailing_newline().fill();
    let mut out = String::with_capacity(block.as_str().len() * 2);
    for (i, line) in block.as_str().split('\n').enumerate() {
        out += &locate(location.down(i));
        out += line;
    }
    out
}

/// Draws `text` at `location` on stdout.
pub fn render<L: Into<Location>>(text: &str, location: L) -> Result<()> {
    Terminal::stdout().draw(text, location.into())
}

/// Clears stdout's screen.
pub fn clear_screen() -> Result<()> {
    Terminal::stdout().clear()
}

/// Output side of the interpreter.
pub trait Backend {
    /// Draws a block of text with its top left corner at `location`.
    fn draw(&mut self, text: &str, location: Location) -> Result<()>;
    /// Clears the screen.
    fn clear(&mut self) -> Result<()>;
    /// Blocks for `duration`.
    fn pause(&mut self, duration: Duration) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn draw(&mut self, text: &str, location: Location) -> Result<()> {
        (**self).draw(text, location)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn pause(&mut self, duration: Duration) -> Result<()> {
        (**self).pause(duration)
    }
}

/// Backend writing ANSI sequences to any writer.
///
/// Each draw is a single `write_all` followed by a flush, so a block shows
/// up at once. Pauses put the current thread to sleep.
#[derive(Debug)]
pub struct Terminal<W: Write> {
    out: W,
}

impl Terminal<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, s: &str) -> Result<()> {
        self.out.write_all(s.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Backend for Terminal<W> {
    fn draw(&mut self, text: &str, location: Location) -> Result<()> {
        self.write(&render_block(text, location))
    }

    fn clear(&mut self) -> Result<()> {
        self.write(CLEAR_SCREEN)
    }

    fn pause(&mut self, duration: Duration) -> Result<()> {
        thread::sleep(duration);
        Ok(())
    }
}
