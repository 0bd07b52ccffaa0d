//! Token categories and their (prefix, full) predicate pairs
//!
//! Every category answers two questions about a candidate string:
//! whether it can still grow into a token of that category (`is_prefix`),
//! and whether it already is one (`is_full`). Both predicates hold
//! `is_full(s) => is_prefix(s)`, and `is_prefix` is closed under dropping
//! the last character, which lets the scanner grow candidates one
//! character at a time.
use super::vocabulary::{
    self, BOOLEANS, CELLS, COLUMNS, KEYWORDS, MODULE_NAMES, PIECE_TYPES, PLAYERS, ROWS,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // === LITERALS ===
    Number,
    Identifier,
    String,
    LineComment,
    BlockComment,

    // === VOCABULARY ===
    Keyword,
    ModuleName,
    Row,
    Column,
    Cell,
    Player,
    PieceType,
    Boolean,
    /// `type-cell-player` triple such as `pawn-e2-me`
    Piece,

    // === OPERATORS ===
    Plus,
    Minus,
    Star,
    Slash,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Assign,
    Equal,
    NotEqual,
    Increment,

    // === PUNCTUATION ===
    Comma,
    Colon,
    Semicolon,
    Dot,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,

    // === WHITESPACE ===
    Space,
    Tab,
    Newline,

    /// A character no category accepts; never produced by classification
    Invalid,
}

impl TokenKind {
    /// Categories tried by the scanner, highest priority first.
    ///
    /// Ties on match length go to the earlier entry: numbers and the bare
    /// minus beat keywords and constants, which beat identifiers.
    pub const CLASSIFIED: [TokenKind; 37] = [
        Self::Number,
        Self::Minus,
        Self::Keyword,
        Self::ModuleName,
        Self::Cell,
        Self::Player,
        Self::PieceType,
        Self::Piece,
        Self::Boolean,
        Self::Row,
        Self::Column,
        Self::String,
        Self::LineComment,
        Self::BlockComment,
        Self::Plus,
        Self::Increment,
        Self::Star,
        Self::Slash,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Assign,
        Self::Equal,
        Self::NotEqual,
        Self::Comma,
        Self::Colon,
        Self::Semicolon,
        Self::Dot,
        Self::LeftParen,
        Self::RightParen,
        Self::LeftBracket,
        Self::RightBracket,
        Self::Space,
        Self::Tab,
        Self::Newline,
        Self::Identifier,
    ];

    /// Spellings of categories matched against a fixed word list
    pub fn spellings(self) -> Option<&'static [&'static str]> {
        let words: &'static [&'static str] = match self {
            Self::Keyword => &KEYWORDS,
            Self::ModuleName => &MODULE_NAMES,
            Self::Row => &ROWS,
            Self::Column => &COLUMNS,
            Self::Cell => &CELLS,
            Self::Player => &PLAYERS,
            Self::PieceType => &PIECE_TYPES,
            Self::Boolean => &BOOLEANS,
            Self::Plus => &["+"],
            Self::Minus => &["-"],
            Self::Star => &["*"],
            Self::Slash => &["/"],
            Self::Less => &["<"],
            Self::LessEqual => &["<="],
            Self::Greater => &[">"],
            Self::GreaterEqual => &[">="],
            Self::Assign => &["="],
            Self::Equal => &["=="],
            Self::NotEqual => &["!="],
            Self::Increment => &["++"],
            Self::Comma => &[","],
            Self::Colon => &[":"],
            Self::Semicolon => &[";"],
            Self::Dot => &["."],
            Self::LeftParen => &["("],
            Self::RightParen => &[")"],
            Self::LeftBracket => &["["],
            Self::RightBracket => &["]"],
            Self::Space => &[" "],
            Self::Tab => &["\t"],
            Self::Newline => &["\n"],
            Self::Number
            | Self::Identifier
            | Self::String
            | Self::LineComment
            | Self::BlockComment
            | Self::Piece
            | Self::Invalid => return None,
        };
        Some(words)
    }

    /// Can `s` still grow into a token of this category?
    pub fn is_prefix(self, s: &str) -> bool {
        if let Some(words) = self.spellings() {
            return vocabulary::has_prefix(words, s);
        }
        match self {
            Self::Number => number_prefix(s),
            Self::Identifier => s.is_empty() || identifier_full(s),
            Self::String => string_prefix(s),
            Self::LineComment => line_comment_prefix(s),
            Self::BlockComment => block_comment_prefix(s),
            Self::Piece => piece_prefix(s),
            _ => false,
        }
    }

    /// Is `s` exactly one complete token of this category?
    pub fn is_full(self, s: &str) -> bool {
        if let Some(words) = self.spellings() {
            return vocabulary::contains(words, s);
        }
        match self {
            Self::Number => number_full(s),
            Self::Identifier => identifier_full(s),
            Self::String => string_full(s),
            Self::LineComment => line_comment_full(s),
            Self::BlockComment => block_comment_full(s),
            Self::Piece => piece_full(s),
            _ => false,
        }
    }

    /// Stable lowercase name used in token listings
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::String => "string",
            Self::LineComment => "line_comment",
            Self::BlockComment => "block_comment",
            Self::Keyword => "keyword",
            Self::ModuleName => "module_name",
            Self::Row => "row",
            Self::Column => "column",
            Self::Cell => "cell",
            Self::Player => "player",
            Self::PieceType => "piece_type",
            Self::Boolean => "boolean",
            Self::Piece => "piece",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Star => "star",
            Self::Slash => "slash",
            Self::Less => "less",
            Self::LessEqual => "less_equal",
            Self::Greater => "greater",
            Self::GreaterEqual => "greater_equal",
            Self::Assign => "assign",
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::Increment => "increment",
            Self::Comma => "comma",
            Self::Colon => "colon",
            Self::Semicolon => "semicolon",
            Self::Dot => "dot",
            Self::LeftParen => "left_paren",
            Self::RightParen => "right_paren",
            Self::LeftBracket => "left_bracket",
            Self::RightBracket => "right_bracket",
            Self::Space => "space",
            Self::Tab => "tab",
            Self::Newline => "newline",
            Self::Invalid => "invalid",
        }
    }

    pub const fn is_operator(self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Less
                | Self::LessEqual
                | Self::Greater
                | Self::GreaterEqual
                | Self::Assign
                | Self::Equal
                | Self::NotEqual
                | Self::Increment
        )
    }

    pub const fn is_whitespace(self) -> bool {
        matches!(self, Self::Space | Self::Tab | Self::Newline)
    }

    pub const fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Board and game constants
    pub const fn is_constant(self) -> bool {
        matches!(
            self,
            Self::Row
                | Self::Column
                | Self::Cell
                | Self::Player
                | Self::PieceType
                | Self::Boolean
                | Self::Piece
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// CATEGORY PREDICATES
// ============================================================================

fn number_prefix(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    match digits.split_once('.') {
        None => digits.bytes().all(|b| b.is_ascii_digit()),
        Some((int, frac)) => {
            !int.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
    }
}

fn number_full(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    match digits.split_once('.') {
        None => all_digits(digits),
        Some((int, frac)) => all_digits(int) && all_digits(frac),
    }
}

fn identifier_full(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_lowercase() => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

fn string_prefix(s: &str) -> bool {
    match s.strip_prefix('"') {
        None => s.is_empty(),
        // A closing quote may only be the last character
        Some(rest) => match rest.find('"') {
            None => true,
            Some(idx) => idx == rest.len() - 1,
        },
    }
}

fn string_full(s: &str) -> bool {
    s.len() >= 2
        && s.starts_with('"')
        && s.ends_with('"')
        && !s[1..s.len() - 1].contains('"')
}

fn line_comment_prefix(s: &str) -> bool {
    if s.len() < 2 {
        return "//".starts_with(s);
    }
    match s.strip_prefix("//") {
        None => false,
        Some(rest) => match rest.find('\n') {
            None => true,
            Some(idx) => idx == rest.len() - 1,
        },
    }
}

fn line_comment_full(s: &str) -> bool {
    s.len() >= 3
        && s.starts_with("//")
        && s.ends_with('\n')
        && !s[2..s.len() - 1].contains('\n')
}

/// Byte index of the first `*/` that is not part of the opener
fn block_comment_close(s: &str) -> Option<usize> {
    s.get(2..).and_then(|rest| rest.find("*/")).map(|idx| idx + 2)
}

fn block_comment_prefix(s: &str) -> bool {
    if s.len() < 2 {
        return "/*".starts_with(s);
    }
    s.starts_with("/*")
        && match block_comment_close(s) {
            None => true,
            Some(idx) => idx == s.len() - 2,
        }
}

fn block_comment_full(s: &str) -> bool {
    s.len() >= 4 && s.starts_with("/*") && block_comment_close(s) == Some(s.len() - 2)
}

/// Segment categories of a piece constant, in order
const PIECE_SEGMENTS: [TokenKind; 3] = [TokenKind::PieceType, TokenKind::Cell, TokenKind::Player];

fn piece_prefix(s: &str) -> bool {
    let segments: Vec<&str> = s.split('-').collect();
    if segments.len() > PIECE_SEGMENTS.len() {
        return false;
    }
    let last = segments.len() - 1;
    segments
        .iter()
        .zip(PIECE_SEGMENTS)
        .enumerate()
        .all(|(i, (segment, kind))| {
            if i < last {
                kind.is_full(segment)
            } else {
                kind.is_prefix(segment)
            }
        })
}

fn piece_full(s: &str) -> bool {
    let segments: Vec<&str> = s.split('-').collect();
    segments.len() == PIECE_SEGMENTS.len()
        && segments
            .iter()
            .zip(PIECE_SEGMENTS)
            .all(|(segment, kind)| kind.is_full(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_predicates() {
        for full in ["5", "-5", "12.75", "-0.5", "007"] {
            assert!(TokenKind::Number.is_full(full), "{full}");
        }
        for partial in ["", "-", "5.", "-12."] {
            assert!(TokenKind::Number.is_prefix(partial), "{partial}");
            assert!(!TokenKind::Number.is_full(partial), "{partial}");
        }
        for bad in [".5", "-.5", "1.2.3", "--1", "5-", "1e3"] {
            assert!(!TokenKind::Number.is_prefix(bad), "{bad}");
        }
    }

    #[test]
    fn test_identifier_predicates() {
        assert!(TokenKind::Identifier.is_full("rulex"));
        assert!(TokenKind::Identifier.is_full("my_Var2"));
        assert!(TokenKind::Identifier.is_prefix(""));
        assert!(!TokenKind::Identifier.is_full(""));
        assert!(!TokenKind::Identifier.is_prefix("Rule"));
        assert!(!TokenKind::Identifier.is_prefix("2x"));
        assert!(!TokenKind::Identifier.is_prefix("a-b"));
    }

    #[test]
    fn test_string_predicates() {
        assert!(TokenKind::String.is_full("\"\""));
        assert!(TokenKind::String.is_full("\"hello // there\""));
        assert!(TokenKind::String.is_prefix("\"open"));
        assert!(!TokenKind::String.is_full("\""));
        assert!(!TokenKind::String.is_prefix("\"a\"b"));
        assert!(!TokenKind::String.is_prefix("a\""));
    }

    #[test]
    fn test_comment_predicates() {
        assert!(TokenKind::LineComment.is_prefix("/"));
        assert!(TokenKind::LineComment.is_prefix("// hi"));
        assert!(TokenKind::LineComment.is_full("// hi\n"));
        assert!(!TokenKind::LineComment.is_full("// hi"));
        assert!(!TokenKind::LineComment.is_prefix("// hi\nx"));

        assert!(TokenKind::BlockComment.is_prefix("/*/"));
        assert!(!TokenKind::BlockComment.is_full("/*/"));
        assert!(TokenKind::BlockComment.is_full("/**/"));
        assert!(TokenKind::BlockComment.is_full("/* a\nb */"));
        assert!(!TokenKind::BlockComment.is_prefix("/* a */ b"));
    }

    #[test]
    fn test_vocabulary_predicates() {
        assert!(TokenKind::Keyword.is_full("rule"));
        assert!(TokenKind::Keyword.is_prefix("ru"));
        assert!(!TokenKind::Keyword.is_full("rulex"));
        assert!(TokenKind::ModuleName.is_full("endgame"));
        assert!(TokenKind::Column.is_full("$c"));
        assert!(TokenKind::Column.is_prefix("$"));
        assert!(!TokenKind::Column.is_prefix("$9"));
        assert!(TokenKind::Row.is_full("$8"));
        assert!(TokenKind::PieceType.is_full("Q"));
        assert!(TokenKind::Player.is_full("foe"));
        assert!(TokenKind::NotEqual.is_prefix("!"));
        assert!(!TokenKind::NotEqual.is_full("!"));
    }

    #[test]
    fn test_piece_predicates() {
        assert!(TokenKind::Piece.is_full("pawn-e2-me"));
        assert!(TokenKind::Piece.is_full("K-h8-foe"));
        assert!(TokenKind::Piece.is_prefix("pawn-e"));
        assert!(TokenKind::Piece.is_prefix("pawn-"));
        assert!(!TokenKind::Piece.is_full("pawn-e2"));
        assert!(!TokenKind::Piece.is_prefix("pawn-i2"));
        assert!(!TokenKind::Piece.is_prefix("pawn-e2-me-x"));
    }

    #[test]
    fn test_full_implies_prefix_on_samples() {
        let samples = [
            "", "-", "-5", "rule", "pawn-e2-me", "\"s\"", "//c\n", "/**/", "$a", "<=", "\n",
        ];
        for kind in TokenKind::CLASSIFIED {
            for s in samples {
                if kind.is_full(s) {
                    assert!(kind.is_prefix(s), "{kind} full but not prefix on {s:?}");
                }
            }
        }
    }

    #[test]
    fn test_invalid_never_matches() {
        assert!(!TokenKind::Invalid.is_prefix(""));
        assert!(!TokenKind::Invalid.is_full("!"));
    }
}
