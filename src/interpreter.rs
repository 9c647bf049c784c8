//! Playback of animation scripts.
//!
//! A script is a list of lines. Outside of a draw block every line is either
//! a command (see [`Directive`]) or ignored; `:column,row count` opens a
//! block and the next `count` lines are drawn as is, one below another,
//! starting at `column,row`:
//!
//! ```text
//! # a bouncing word
//! :4,1 1
//! hello
//! !0.5
//! :4,2 1
//! hello
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::graphics::{Backend, Location, Terminal};
use crate::script::Directive;
use crate::text::Text;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Drawing {
        /// Top left corner of the block.
        origin: Location,
        /// Line count declared by the draw command.
        count: usize,
        /// Lines still expected.
        remaining: usize,
        /// Lines already drawn at `origin`.
        drawn: usize,
    },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Normal
    }
}

/// Playback settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Treat the draw command line as the first line of its own block,
    /// drawn at the top left corner of the screen. Older players behaved
    /// this way; off by default.
    pub legacy_fallthrough: bool,
    /// Clear the screen before the first line.
    pub clear_screen: bool,
}

impl Options {
    pub fn legacy_fallthrough(mut self, on: bool) -> Self {
        self.legacy_fallthrough = on;
        self
    }

    pub fn clear_screen(mut self, on: bool) -> Self {
        self.clear_screen = on;
        self
    }
}

/// A draw block cut short by the end of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underrun {
    pub declared: usize,
    pub missing: usize,
}

/// What a finished run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub lines_drawn: usize,
    pub pauses: usize,
    pub paused: Duration,
    pub underrun: Option<Underrun>,
}

/// Plays scripts on a [`Backend`].
#[derive(Debug)]
pub struct Interpreter<B: Backend> {
    backend: B,
    options: Options,
    mode: Mode,
    summary: Summary,
}

impl<B: Backend> Interpreter<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            options: Options::default(),
            mode: Mode::Normal,
            summary: Summary::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Returns the state left by the last run.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Plays a whole script. One trailing newline is ignored.
    pub fn run(&mut self, script: &str) -> Result<Summary> {
        self.run_lines(Text::from(script).lines())
    }

    /// Plays a script given line by line.
    ///
    /// Every run starts in normal mode. A malformed command stops the run
    /// with an error; whatever was drawn before it stays on screen.
    pub fn run_lines<I, S>(&mut self, lines: I) -> Result<Summary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.mode = Mode::Normal;
        self.summary = Summary::default();
        if self.options.clear_screen {
            self.backend.clear()?;
        }
        for line in lines {
            self.step(line.as_ref())?;
        }
        Ok(self.finish())
    }

    /// Reads the whole script from `reader`, then plays it.
    pub fn run_reader<R: Read>(&mut self, mut reader: R) -> Result<Summary> {
        let mut script = String::new();
        reader.read_to_string(&mut script)?;
        self.run(&script)
    }

    /// Reads the whole UTF-8 script file, then plays it.
    pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Summary> {
        let script = fs::read_to_string(path)?;
        self.run(&script)
    }

    fn step(&mut self, line: &str) -> Result<()> {
        match self.mode {
            Mode::Normal => match Directive::parse(line)? {
                Some(Directive::Draw { origin, count }) => {
                    debug!(origin = %origin, count, "draw command");
                    self.mode = Mode::Drawing {
                        origin,
                        count,
                        remaining: count,
                        drawn: 0,
                    };
                    if self.options.legacy_fallthrough {
                        // The command line is consumed again, now as block content.
                        return self.draw(line, Some(Location::default()));
                    }
                    if count == 0 {
                        self.mode = Mode::Normal;
                    }
                }
                Some(Directive::Pause(duration)) => {
                    debug!(seconds = duration.as_secs_f64(), "pause");
                    self.backend.pause(duration)?;
                    self.summary.pauses += 1;
                    self.summary.paused += duration;
                }
                Some(Directive::Comment(_)) | None => {}
            },
            Mode::Drawing { .. } => self.draw(line, None)?,
        }
        Ok(())
    }

    // Draws one block line. `at` overrides the block position without
    // moving the following lines down.
    fn draw(&mut self, line: &str, at: Option<Location>) -> Result<()> {
        let (origin, count, remaining, drawn) = match self.mode {
            Mode::Drawing {
                origin,
                count,
                remaining,
                drawn,
            } => (origin, count, remaining, drawn),
            Mode::Normal => return Ok(()),
        };
        let remaining = remaining.saturating_sub(1);
        let (location, drawn) = match at {
            Some(location) => (location, drawn),
            None => (origin.down(drawn), drawn + 1),
        };
        trace!(location = %location, remaining, "draw line");
        self.backend.draw(line, location)?;
        self.summary.lines_drawn += 1;
        self.mode = if remaining == 0 {
            Mode::Normal
        } else {
            Mode::Drawing {
                origin,
                count,
                remaining,
                drawn,
            }
        };
        Ok(())
    }

    fn finish(&mut self) -> Summary {
        if let Mode::Drawing {
            count, remaining, ..
        } = self.mode
        {
            warn!(
                declared = count,
                missing = remaining,
                "script ended inside a draw block"
            );
            self.summary.underrun = Some(Underrun {
                declared: count,
                missing: remaining,
            });
        }
        std::mem::take(&mut self.summary)
    }
}

/// Plays `script` on stdout with default options.
pub fn interpret(script: &str) -> Result<Summary> {
    Interpreter::new(Terminal::stdout()).run(script)
}

/// Plays the script file at `path` on stdout with default options.
pub fn interpret_file<P: AsRef<Path>>(path: P) -> Result<Summary> {
    Interpreter::new(Terminal::stdout()).run_file(path)
}
