use core::fmt;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::graphics::Location;

/// Comment line prefix.
pub const COMMENT: char = '#';
/// Draw command prefix.
pub const DRAW: char = ':';
/// Pause command prefix.
pub const PAUSE: char = '!';

/// A command line of an animation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `#text`, does nothing.
    Comment(String),
    /// `:column,row count`, draws the next `count` lines at `origin`.
    Draw { origin: Location, count: usize },
    /// `!seconds`, blocks for the given time.
    Pause(Duration),
}

impl Directive {
    /// Parses a line seen outside of a draw block.
    ///
    /// Lines that do not start with a command prefix, blank ones included,
    /// are not directives and yield `None`. A line that starts with a
    /// command prefix but is malformed is an error.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        match line.chars().next() {
            Some(COMMENT) => Ok(Some(Directive::Comment(line[1..].into()))),
            Some(DRAW) => parse_draw(line).map(Some),
            Some(PAUSE) => parse_pause(line).map(Some),
            _ => Ok(None),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Comment(text) => write!(f, "{}{}", COMMENT, text),
            Directive::Draw { origin, count } => write!(f, "{}{} {}", DRAW, origin, count),
            Directive::Pause(duration) => write!(f, "{}{}", PAUSE, duration.as_secs_f64()),
        }
    }
}

// :column,row count
fn parse_draw(line: &str) -> Result<Directive> {
    let (origin, count) = match line.split_once(' ') {
        Some(split) => split,
        None => return Err(Error::DrawMissingCount(line.into())),
    };
    let (column, row) = match origin[DRAW.len_utf8()..].split_once(',') {
        Some(split) => split,
        None => return Err(Error::DrawCoordinates(line.into())),
    };
    let coordinate = |s: &str| {
        s.parse::<usize>()
            .map_err(|err| Error::DrawCoordinateParsing(line.into(), err))
    };
    let origin = Location::new(coordinate(column)?, coordinate(row)?);
    let count = match count.trim_end().parse::<usize>() {
        Ok(count) => count,
        Err(err) => return Err(Error::DrawCountParsing(line.into(), err)),
    };
    // Terminal coordinates are one-based and the block grows downwards.
    let last_row = origin.row.checked_add(count.max(1));
    if origin.column.checked_add(1).is_none() || last_row.is_none() {
        return Err(Error::DrawOutOfRange(line.into()));
    }
    Ok(Directive::Draw { origin, count })
}

// !seconds
fn parse_pause(line: &str) -> Result<Directive> {
    let seconds = match line[PAUSE.len_utf8()..].trim().parse::<f64>() {
        Ok(seconds) => seconds,
        Err(err) => return Err(Error::PauseParsing(line.into(), err)),
    };
    Duration::try_from_secs_f64(seconds)
        .map(Directive::Pause)
        .map_err(|_| Error::PauseDuration(line.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draw(column: usize, row: usize, count: usize) -> Option<Directive> {
        Some(Directive::Draw {
            origin: Location::new(column, row),
            count,
        })
    }

    #[test]
    fn draw_command() {
        assert_eq!(Directive::parse(":2,1 2").unwrap(), draw(2, 1, 2));
        assert_eq!(Directive::parse(":0,0 0").unwrap(), draw(0, 0, 0));
        // CRLF scripts leave a carriage return behind
        assert_eq!(Directive::parse(":10,3 4\r").unwrap(), draw(10, 3, 4));
    }

    #[test]
    fn pause_command() {
        assert_eq!(
            Directive::parse("!0.25").unwrap(),
            Some(Directive::Pause(Duration::from_millis(250)))
        );
        assert_eq!(
            Directive::parse("! 1.5 ").unwrap(),
            Some(Directive::Pause(Duration::from_millis(1500)))
        );
        assert_eq!(
            Directive::parse("!0.0").unwrap(),
            Some(Directive::Pause(Duration::from_secs(0)))
        );
    }

    #[test]
    fn comment_and_plain_lines() {
        assert_eq!(
            Directive::parse("# title").unwrap(),
            Some(Directive::Comment(" title".into()))
        );
        assert_eq!(Directive::parse("").unwrap(), None);
        assert_eq!(Directive::parse("hello").unwrap(), None);
        assert_eq!(Directive::parse(" :1,1 1").unwrap(), None);
    }

    #[test]
    fn malformed_draw() {
        assert!(matches!(
            Directive::parse(":x,1 2"),
            Err(Error::DrawCoordinateParsing(..))
        ));
        let negative = Directive::parse(":-1,0 1").unwrap_err();
        assert!(matches!(negative, Error::DrawCoordinateParsing(..)));
        assert!(negative.to_string().contains("non-negative"));
        assert!(matches!(
            Directive::parse(":1,2,3 1"),
            Err(Error::DrawCoordinateParsing(..))
        ));
        assert!(matches!(
            Directive::parse(":1,1"),
            Err(Error::DrawMissingCount(_))
        ));
        assert!(matches!(
            Directive::parse(":11 2"),
            Err(Error::DrawCoordinates(_))
        ));
        assert!(matches!(
            Directive::parse(":1,1 two"),
            Err(Error::DrawCountParsing(..))
        ));
        assert!(matches!(
            Directive::parse(":1,1 2 3"),
            Err(Error::DrawCountParsing(..))
        ));
    }

    #[test]
    fn malformed_pause() {
        assert!(matches!(Directive::parse("!"), Err(Error::PauseParsing(..))));
        assert!(matches!(
            Directive::parse("!soon"),
            Err(Error::PauseParsing(..))
        ));
        assert!(matches!(Directive::parse("!-1"), Err(Error::PauseDuration(_))));
        assert!(matches!(Directive::parse("!inf"), Err(Error::PauseDuration(_))));
        assert!(Directive::parse("!NaN").unwrap_err().is_parse());
    }

    #[test]
    fn draw_past_screen_limits() {
        let max = usize::MAX;
        for line in [
            format!(":0,{} 1", max),
            format!(":{},0 1", max),
            format!(":0,{} 2", max - 1),
            format!(":0,{} 0", max),
        ]
        .iter()
        {
            assert!(matches!(
                Directive::parse(line),
                Err(Error::DrawOutOfRange(_))
            ));
        }
        assert_eq!(
            Directive::parse(&format!(":{},{} 1", max - 1, max - 1)).unwrap(),
            draw(max - 1, max - 1, 1)
        );
    }

    #[test]
    fn displays_as_script_line() {
        assert_eq!(draw(2, 1, 2).unwrap().to_string(), ":2,1 2");
        assert_eq!(Directive::Pause(Duration::from_millis(500)).to_string(), "!0.5");
    }
}
