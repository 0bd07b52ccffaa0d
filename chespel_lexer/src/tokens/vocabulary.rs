//! Fixed vocabularies of the rule language
//!
//! Every exact-match token category draws its spellings from one of these
//! tables. Spellings are case sensitive.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four named sections a source file can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleName {
    Search,
    Evaluation,
    Opening,
    Endgame,
}

impl ModuleName {
    pub const ALL: [ModuleName; 4] = [
        Self::Search,
        Self::Evaluation,
        Self::Opening,
        Self::Endgame,
    ];

    /// Order used when printing discovered modules
    pub const DUMP_ORDER: [ModuleName; 4] = [
        Self::Search,
        Self::Evaluation,
        Self::Endgame,
        Self::Opening,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Evaluation => "evaluation",
            Self::Opening => "opening",
            Self::Endgame => "endgame",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == s)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const KEYWORDS: [&str; 10] = [
    "module", "sym", "rule", "score", "let", "if", "cell", "piece", "with", "in",
];

pub const MODULE_NAMES: [&str; 4] = ["search", "evaluation", "opening", "endgame"];

/// Long names first, then the single-letter notation
pub const PIECE_TYPES: [&str; 12] = [
    "pawn", "knight", "bishop", "rock", "queen", "king", "P", "N", "B", "R", "Q", "K",
];

pub const BOOLEANS: [&str; 2] = ["true", "false"];

pub const PLAYERS: [&str; 2] = ["me", "foe"];

pub const COLUMNS: [&str; 8] = ["$a", "$b", "$c", "$d", "$e", "$f", "$g", "$h"];

pub const ROWS: [&str; 8] = ["$1", "$2", "$3", "$4", "$5", "$6", "$7", "$8"];

#[rustfmt::skip]
pub const CELLS: [&str; 64] = [
    "a1", "a2", "a3", "a4", "a5", "a6", "a7", "a8",
    "b1", "b2", "b3", "b4", "b5", "b6", "b7", "b8",
    "c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8",
    "d1", "d2", "d3", "d4", "d5", "d6", "d7", "d8",
    "e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8",
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8",
    "g1", "g2", "g3", "g4", "g5", "g6", "g7", "g8",
    "h1", "h2", "h3", "h4", "h5", "h6", "h7", "h8",
];

/// Exact-match test against a vocabulary
pub fn contains(vocabulary: &[&str], s: &str) -> bool {
    vocabulary.iter().any(|word| *word == s)
}

/// True when `s` can still grow into some word of the vocabulary
pub fn has_prefix(vocabulary: &[&str], s: &str) -> bool {
    vocabulary.iter().any(|word| word.starts_with(s))
}
