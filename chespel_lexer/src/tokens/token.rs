//! Classified, verbatim slice of scanner input
use super::kind::TokenKind;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token carries its exact source text, so concatenating a token
/// sequence reproduces the scanned input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Pair used by listings and the JSON output
    pub fn as_pair(&self) -> (&'static str, &str) {
        (self.kind.name(), &self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

/// Concatenate token texts back into the source they were scanned from
pub fn reassemble(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
