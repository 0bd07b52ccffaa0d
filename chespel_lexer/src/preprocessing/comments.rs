//! Comment stripping
//!
//! A four-state machine removes `//` and `/* */` comments. String literals
//! are copied verbatim, so comment markers inside quotes survive. A line
//! comment keeps its terminating newline.

use super::error::{CommentKind, PreprocessError};
use super::line_map::LineMap;
use crate::utils::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString,
    InLineComment,
    InBlockComment,
}

/// Remove comments from `input`
pub fn strip_comments(input: &str) -> Result<String, PreprocessError> {
    strip_comments_mapped(input).map(|(text, _)| text)
}

/// Remove comments and record which input line each output line starts on
pub fn strip_comments_mapped(input: &str) -> Result<(String, LineMap), PreprocessError> {
    let mut output = String::with_capacity(input.len());
    let mut origins = vec![1];
    let mut state = State::Normal;
    let mut opened_at = Position::start();
    let mut pos = Position::start();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        let here = pos;
        pos = pos.advance(ch);

        match state {
            State::Normal => match (ch, chars.peek()) {
                ('"', _) => {
                    state = State::InString;
                    output.push(ch);
                }
                ('/', Some('/')) => {
                    chars.next();
                    pos = pos.advance('/');
                    opened_at = here;
                    state = State::InLineComment;
                }
                ('/', Some('*')) => {
                    // Both opener characters are consumed, so "/*/" stays open
                    chars.next();
                    pos = pos.advance('*');
                    opened_at = here;
                    state = State::InBlockComment;
                }
                _ => output.push(ch),
            },
            State::InString => {
                if ch == '"' {
                    state = State::Normal;
                }
                output.push(ch);
            }
            State::InLineComment => {
                if ch == '\n' {
                    output.push(ch);
                    state = State::Normal;
                }
            }
            State::InBlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    pos = pos.advance('/');
                    state = State::Normal;
                }
            }
        }

        if ch == '\n' && output.ends_with('\n') && state != State::InBlockComment {
            origins.push(pos.line);
        }
    }

    let kind = match state {
        State::InLineComment => Some(CommentKind::Line),
        State::InBlockComment => Some(CommentKind::Block),
        State::Normal | State::InString => None,
    };

    match kind {
        Some(kind) => Err(PreprocessError::UnterminatedComment {
            kind,
            line: opened_at.line,
            column: opened_at.column,
        }),
        None => Ok((output, LineMap::from_origins(origins))),
    }
}
