//! Direct-lookahead shortcuts for characters whose token is decided by at
//! most one character of lookahead (or a scan to the closing quote).
//!
//! Every answer here must equal what [`super::classifier::longest_match`]
//! returns for the same input; the property tests hold the two together.
use crate::tokens::TokenKind;

/// Outcome of the shortcut dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastPath {
    /// Category and byte length of the token at the start of input
    Token(TokenKind, usize),
    /// No category accepts the first character
    Unrecognized,
    /// Needs the general predicate machinery
    Fallback,
}

/// Classify the start of `input` without consulting the predicate family
pub fn classify(input: &str) -> FastPath {
    let bytes = input.as_bytes();
    let Some(&first) = bytes.first() else {
        return FastPath::Unrecognized;
    };
    let next = bytes.get(1).copied();

    let single = |kind| FastPath::Token(kind, 1);
    let pair = |second, long, short| {
        if next == Some(second) {
            FastPath::Token(long, 2)
        } else {
            FastPath::Token(short, 1)
        }
    };

    match first {
        b',' => single(TokenKind::Comma),
        b':' => single(TokenKind::Colon),
        b';' => single(TokenKind::Semicolon),
        b'.' => single(TokenKind::Dot),
        b'(' => single(TokenKind::LeftParen),
        b')' => single(TokenKind::RightParen),
        b'[' => single(TokenKind::LeftBracket),
        b']' => single(TokenKind::RightBracket),
        b' ' => single(TokenKind::Space),
        b'\t' => single(TokenKind::Tab),
        b'\n' => single(TokenKind::Newline),
        b'*' => single(TokenKind::Star),
        b'+' => pair(b'+', TokenKind::Increment, TokenKind::Plus),
        b'<' => pair(b'=', TokenKind::LessEqual, TokenKind::Less),
        b'>' => pair(b'=', TokenKind::GreaterEqual, TokenKind::Greater),
        b'=' => pair(b'=', TokenKind::Equal, TokenKind::Assign),
        b'!' => match next {
            Some(b'=') => FastPath::Token(TokenKind::NotEqual, 2),
            _ => FastPath::Unrecognized,
        },
        b'$' => match next {
            Some(b'a'..=b'h') => FastPath::Token(TokenKind::Column, 2),
            Some(b'1'..=b'8') => FastPath::Token(TokenKind::Row, 2),
            _ => FastPath::Unrecognized,
        },
        b'"' => match input[1..].find('"') {
            Some(idx) => FastPath::Token(TokenKind::String, idx + 2),
            None => FastPath::Unrecognized,
        },
        _ => FastPath::Fallback,
    }
}
