use core::fmt::Display;
use std::{
    num::{ParseFloatError, ParseIntError},
    sync::Arc,
};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing or playing an animation script.
#[derive(Debug, Clone)]
pub enum Error {
    /// Draw directive has no space separated line count.
    DrawMissingCount(String),
    /// Draw directive origin is not a `column,row` pair.
    DrawCoordinates(String),
    /// Failed to parse a draw origin component.
    DrawCoordinateParsing(String, ParseIntError),
    /// Failed to parse a draw line count.
    DrawCountParsing(String, ParseIntError),

    /// Failed to parse pause duration.
    PauseParsing(String, ParseFloatError),
    /// Pause duration is negative or not finite.
    PauseDuration(String),
    /// Draw block would reach past the addressable screen.
    DrawOutOfRange(String),

    /// Invalid pattern passed to pattern counting.
    Pattern(regex::Error),

    /// I/O error occurred.
    Io(Arc<std::io::Error>),
}

impl Error {
    /// Returns whether the error comes from a malformed directive line.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Error::DrawMissingCount(_)
                | Error::DrawCoordinates(_)
                | Error::DrawCoordinateParsing(..)
                | Error::DrawCountParsing(..)
                | Error::PauseParsing(..)
                | Error::PauseDuration(_)
                | Error::DrawOutOfRange(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.into())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DrawMissingCount(s) => write!(f, "no line count in draw command: {}", s),
            Error::DrawCoordinates(s) => {
                write!(f, "draw command origin must be 'column,row': {}", s)
            }
            Error::DrawCoordinateParsing(s, err) => {
                write!(
                    f,
                    "draw origin must be non-negative integers in '{}': {}",
                    s, err
                )
            }
            Error::DrawCountParsing(s, err) => {
                write!(f, "failed to parse draw line count in '{}': {}", s, err)
            }
            Error::PauseParsing(s, err) => {
                write!(f, "failed to parse pause duration in '{}': {}", s, err)
            }
            Error::PauseDuration(s) => write!(f, "pause duration out of range: {}", s),
            Error::DrawOutOfRange(s) => write!(f, "draw block out of range: {}", s),
            Error::Pattern(err) => write!(f, "invalid pattern: {}", err),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DrawCoordinateParsing(_, err) | Error::DrawCountParsing(_, err) => Some(err),
            Error::PauseParsing(_, err) => Some(err),
            Error::Pattern(err) => Some(err),
            Error::Io(err) => Some(&**err),
            _ => None,
        }
    }
}
