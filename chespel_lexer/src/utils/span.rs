//! Source location tracking
//!
//! Positions are recorded as byte offsets plus 1-based line and column numbers.
//! Columns count characters, so a tab occupies one column.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            },
            _ => Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    /// Advance position by a string
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering `text` when it begins at `start`
    pub fn covering(start: Position, text: &str) -> Self {
        Self {
            start,
            end: start.advance_str(text),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a source text for excerpts
#[derive(Debug, Clone)]
pub struct SourceMap<'a> {
    source: &'a str,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(offset, _)| offset + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    /// Get a line of text by line number (1-based), without its newline
    pub fn get_line(&self, line_num: u32) -> Option<&'a str> {
        if line_num == 0 {
            return None;
        }

        let line_idx = (line_num - 1) as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(&self.source[start..end])
    }

    /// Render the line under `span` with a caret underline
    pub fn excerpt(&self, span: &Span) -> Option<String> {
        let line = self.get_line(span.start.line)?;
        let line_num = span.start.line.to_string();
        let gutter = " ".repeat(line_num.len());

        // Keep tabs in the padding so the carets line up under the source text
        let padding: String = line
            .chars()
            .take(span.start.column.saturating_sub(1) as usize)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();

        let width = if span.start.line == span.end.line {
            span.end.column.saturating_sub(span.start.column) as usize
        } else {
            line.chars().count().saturating_sub(padding.chars().count())
        };

        Some(format!(
            "{} |\n{} | {}\n{} | {}{}\n",
            gutter,
            line_num,
            line,
            gutter,
            padding,
            "^".repeat(width.max(1))
        ))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start().advance_str("ab\n\tc");
        assert_eq!(pos, Position::new(5, 2, 3));
    }

    #[test]
    fn test_source_map_lookup() {
        let source = "module evaluation\nrule foo:\n\tscore 5;\n";
        let map = SourceMap::new(source);

        assert_eq!(map.get_line(2), Some("rule foo:"));
        assert_eq!(map.get_line(4), Some(""));
        assert_eq!(map.get_line(5), None);
        assert_eq!(map.get_line(0), None);
    }

    #[test]
    fn test_excerpt_keeps_tabs_in_padding() {
        let source = "rule a:\n\tscore !;\n";
        let map = SourceMap::new(source);
        let start = Position::start().advance_str("rule a:\n\tscore ");
        let span = Span::covering(start, "!");

        let rendered = map.excerpt(&span).unwrap();
        assert_eq!(start, Position::new(15, 2, 8));
        assert!(rendered.contains("2 | \tscore !;"));
        assert!(rendered.ends_with("  | \t      ^\n"));
    }

    #[test]
    fn test_span_covering_and_display() {
        let source = "score 5;";
        let start = Position::start().advance_str("score ");
        let span = Span::covering(start, "5");

        assert_eq!(&source[span.start.offset..span.end.offset], "5");
        assert_eq!(span.end, Position::new(7, 1, 8));
        assert_eq!(span.to_string(), "1:7-8");
    }
}
