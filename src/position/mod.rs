//! Offset <-> (line, column) mapping
//! Parameterized by the newline convention discovered at load time

use crate::constants::errors;
use crate::error::{ErrorType, JotterError, Result};
use unicode_width::UnicodeWidthChar;

/// Line-terminator convention, fixed per document at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    LF,
    CRLF,
}

impl LineEnding {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::LF => "\n",
            LineEnding::CRLF => "\r\n",
        }
    }

    /// Terminator length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    /// Convention of the first terminator observed in the text,
    /// LF when the text has none
    #[must_use]
    pub fn detect(text: &str) -> LineEnding {
        match text.find('\n') {
            Some(idx) if text[..idx].ends_with('\r') => LineEnding::CRLF,
            _ => LineEnding::LF,
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        LineEnding::LF
    }
}

/// A 1-based (line, column) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Maps flat character offsets to positions and back over a borrowed text.
///
/// Every offset in `[0, len]` maps to exactly one position and the mapping
/// is monotonic. Requests past the end are rejected rather than clamped;
/// callers clamp first when that is what they want.
pub struct PositionMapper<'a> {
    text: &'a str,
    line_ending: LineEnding,
}

impl<'a> PositionMapper<'a> {
    #[must_use]
    pub fn new(text: &'a str, line_ending: LineEnding) -> Self {
        Self { text, line_ending }
    }

    /// Document length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines under the document's convention.
    /// An empty document has one line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.split(self.line_ending.as_str()).count()
    }

    /// Map a character offset to its 1-based position.
    ///
    /// An offset right after a full terminator belongs to the start of the
    /// next line, column 1; an empty document reports (1, 1) for offset 0.
    pub fn offset_to_position(&self, offset: usize) -> Result<Position> {
        if offset > self.len() {
            return Err(out_of_range(format!(
                "offset {} past end of document ({})",
                offset,
                self.len()
            )));
        }

        let term_len = self.line_ending.len();
        let mut consumed = 0;
        for (idx, line) in self.text.split(self.line_ending.as_str()).enumerate() {
            let span = line.chars().count();
            if offset < consumed + span + term_len {
                return Ok(Position::new(idx + 1, offset - consumed + 1));
            }
            consumed += span + term_len;
        }
        // Unreachable while offset <= len: the final split piece always
        // covers the end of the text
        Err(JotterError::new(
            ErrorType::Internal,
            errors::INTERNAL_ERROR,
            format!("offset {} not covered by line walk", offset),
        ))
    }

    /// Map a 1-based position back to a character offset.
    ///
    /// A line outside `[1, line_count]` is rejected; the resulting offset is
    /// clamped to the text length.
    pub fn position_to_offset(&self, position: Position) -> Result<usize> {
        if position.line == 0 || position.column == 0 {
            return Err(out_of_range("line and column are 1-based".to_string()));
        }
        if position.line > self.line_count() {
            return Err(out_of_range(format!(
                "line {} past end of document ({} lines)",
                position.line,
                self.line_count()
            )));
        }

        let term_len = self.line_ending.len();
        let mut offset = 0;
        for line in self
            .text
            .split(self.line_ending.as_str())
            .take(position.line - 1)
        {
            offset += line.chars().count() + term_len;
        }
        Ok((offset + position.column - 1).min(self.len()))
    }

    /// Display column of an offset for status bars: tabs expand to the next
    /// stop, wide glyphs count double.
    pub fn display_column(&self, offset: usize, tab_width: usize) -> Result<usize> {
        let tab_width = tab_width.max(1);
        let position = self.offset_to_position(offset)?;
        let line_start = self.position_to_offset(Position::new(position.line, 1))?;
        let mut column = 0;
        for ch in self.text.chars().skip(line_start).take(offset - line_start) {
            if ch == '\t' {
                column += tab_width - (column % tab_width);
            } else {
                column += ch.width().unwrap_or(0);
            }
        }
        Ok(column + 1)
    }
}

/// Digits needed in a line-number gutter for the given line count
#[must_use]
pub fn gutter_width(line_count: usize) -> usize {
    let mut width = 1;
    let mut n = line_count;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

fn out_of_range(message: String) -> JotterError {
    JotterError::new(ErrorType::Position, errors::POSITION_OUT_OF_RANGE, message)
}
