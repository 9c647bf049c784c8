use core::fmt;
use regex::Regex;

use crate::error::Result;

/// A block of newline separated text.
///
/// `Text` is a plain value: every transform returns a new `Text` and leaves
/// the receiver untouched, so calls can be chained freely. Widths are
/// measured in chars.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    text: String,
}

impl Text {
    /// Creates a new `Text` from anything string-like.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    /// Returns the underlying string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the value and returns the underlying string.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Returns the length of the longest line.
    pub fn width(&self) -> usize {
        self.text
            .split('\n')
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Returns the number of lines. A trailing partial line counts as a line,
    /// a trailing newline does not start a new one.
    pub fn height(&self) -> usize {
        // An empty text is still one empty line.
        if self.text.is_empty() {
            return 1;
        }
        self.ensure_trailing_newline().count_substring("\n")
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Returns the number of non-overlapping occurrences of `needle`.
    /// An empty needle never matches.
    pub fn count_substring(&self, needle: &str) -> usize {
        if needle.is_empty() {
            return 0;
        }
        self.text.matches(needle).count()
    }

    /// Returns the number of non-overlapping matches of the regex `pattern`.
    pub fn count_pattern(&self, pattern: &str) -> Result<usize> {
        let re = Regex::new(pattern)?;
        Ok(re.find_iter(&self.text).count())
    }

    /// Prepends `prefix` to every line, empty ones included.
    pub fn indent(&self, prefix: &str) -> Self {
        self.map_lines(|line| format!("{}{}", prefix, line))
    }

    /// Indents every line with a single tab.
    pub fn indent_tab(&self) -> Self {
        self.indent("\t")
    }

    /// Appends `suffix` to every line.
    pub fn outdent(&self, suffix: &str) -> Self {
        self.map_lines(|line| format!("{}{}", line, suffix))
    }

    /// Pads every line with trailing spaces up to the width of the text.
    pub fn fill(&self) -> Self {
        let width = self.width();
        self.map_lines(|line| format!("{:<width$}", line, width = width))
    }

    /// Removes one trailing newline if there is one.
    pub fn strip_trailing_newline(&self) -> Self {
        match self.text.strip_suffix('\n') {
            Some(stripped) => Self::new(stripped),
            None => self.clone(),
        }
    }

    /// Appends a newline unless the text already ends with one.
    /// Empty text is returned as is.
    pub fn ensure_trailing_newline(&self) -> Self {
        if self.text.is_empty() || self.text.ends_with('\n') {
            self.clone()
        } else {
            Self::new(format!("{}\n", self.text))
        }
    }

    /// Iterates over the lines, ignoring one trailing newline.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.text
            .strip_suffix('\n')
            .unwrap_or(&self.text)
            .split('\n')
    }

    fn map_lines<F>(&self, f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self::new(self.text.split('\n').map(f).collect::<Vec<_>>().join("\n"))
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl Into<String> for Text {
    fn into(self) -> String {
        self.text
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

pub fn width(text: &str) -> usize {
    Text::new(text).width()
}

pub fn height(text: &str) -> usize {
    Text::new(text).height()
}

pub fn dimensions(text: &str) -> (usize, usize) {
    Text::new(text).dimensions()
}

pub fn count_substring(text: &str, needle: &str) -> usize {
    Text::new(text).count_substring(needle)
}

pub fn count_pattern(text: &str, pattern: &str) -> Result<usize> {
    Text::new(text).count_pattern(pattern)
}

pub fn indent(text: &str, prefix: &str) -> String {
    Text::new(text).indent(prefix).into_string()
}

pub fn outdent(text: &str, suffix: &str) -> String {
    Text::new(text).outdent(suffix).into_string()
}

pub fn fill(text: &str) -> String {
    Text::new(text).fill().into_string()
}

pub fn strip_trailing_newline(text: &str) -> String {
    Text::new(text).strip_trailing_newline().into_string()
}

pub fn ensure_trailing_newline(text: &str) -> String {
    Text::new(text).ensure_trailing_newline().into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn width_of_ragged_block() {
        assert_eq!(width("ab\ncdef\ng"), 4);
        assert_eq!(width("héllo"), 5);
        assert_eq!(width(""), 0);
    }

    #[test]
    fn height_counts_partial_last_line() {
        assert_eq!(height(""), 1);
        assert_eq!(height("a"), 1);
        assert_eq!(height("a\n"), 1);
        assert_eq!(height("a\nb"), 2);
        assert_eq!(height("a\n\n"), 2);
    }

    #[test]
    fn dimensions_of_block() {
        assert_eq!(dimensions("ab\ncde"), (3, 2));
        assert_eq!(dimensions(""), (0, 1));
    }

    #[test]
    fn substring_counts() {
        assert_eq!(count_substring("aaa", "a"), 3);
        assert_eq!(count_substring("aaaa", "aa"), 2);
        assert_eq!(count_substring("", "x"), 0);
        assert_eq!(count_substring("abc", ""), 0);
    }

    #[test]
    fn pattern_counts() {
        assert_eq!(count_pattern("a1b22c333", r"\d+").unwrap(), 3);
        assert_eq!(count_pattern("no digits", r"\d").unwrap(), 0);
        assert!(matches!(count_pattern("x", "("), Err(Error::Pattern(_))));
    }

    #[test]
    fn indent_touches_every_line() {
        assert_eq!(indent("a\n\nb", "> "), "> a\n> \n> b");
        // the empty line after a trailing newline is indented too
        assert_eq!(Text::new("a\n").indent_tab().as_str(), "\ta\n\t");
    }

    #[test]
    fn outdent_appends_suffix() {
        assert_eq!(outdent("a\nb", ";"), "a;\nb;");
    }

    #[test]
    fn fill_makes_rectangle() {
        let text = "ab\nc\n\nlonger";
        let filled = fill(text);
        assert_eq!(filled, "ab    \nc     \n      \nlonger");
        for line in filled.split('\n') {
            assert_eq!(line.chars().count(), width(text));
        }
    }

    #[test]
    fn trailing_newline_helpers() {
        assert_eq!(strip_trailing_newline("a\n\n"), "a\n");
        assert_eq!(strip_trailing_newline("a"), "a");
        assert_eq!(strip_trailing_newline(""), "");
        assert_eq!(ensure_trailing_newline("a"), "a\n");
        assert_eq!(ensure_trailing_newline("a\n"), "a\n");
        assert_eq!(ensure_trailing_newline(""), "");
    }

    #[test]
    fn ensure_then_strip_restores_text() {
        for t in ["", "a", "a\nb", "  \n x"].iter() {
            assert_eq!(strip_trailing_newline(&ensure_trailing_newline(t)), *t);
        }
    }

    #[test]
    fn transforms_do_not_mutate() {
        let text = Text::new("ab\nc\n");
        let shaped = text.strip_trailing_newline().fill().indent("  ");
        assert_eq!(shaped.as_str(), "  ab\n  c ");
        assert_eq!(text.as_str(), "ab\nc\n");
    }

    #[test]
    fn lines_skip_one_trailing_newline() {
        let text = Text::from("a\n\nb\n");
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["a", "", "b"]);
        assert_eq!(Text::default().lines().collect::<Vec<_>>(), vec![""]);
    }
}
