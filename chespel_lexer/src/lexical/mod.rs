//! Lexical analysis for module bodies
//!
//! [`TokenKind`](crate::tokens::TokenKind) supplies the predicate pairs,
//! [`classifier`] runs maximal munch over them, [`fast_path`] shortcuts the
//! single-character cases, and [`scanner`] drives both across a body.

pub mod classifier;
pub mod fast_path;
pub mod scanner;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};

pub use scanner::{LexerError, LexicalMetrics, MaximalMunchScanner, ScanOutput, UnrecognizedToken};

/// Tokenize with default preferences
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexerError> {
    MaximalMunchScanner::new().tokenize(input)
}

/// Tokenize with custom runtime preferences (limits remain compile-time)
pub fn tokenize_with_preferences(
    input: &str,
    preferences: LexicalPreferences,
) -> Result<Vec<Token>, LexerError> {
    MaximalMunchScanner::with_preferences(preferences).tokenize(input)
}

/// Validate that lexical error codes are registered (for system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let required = [
        codes::lexical::UNRECOGNIZED_TOKEN,
        codes::lexical::TOO_MANY_TOKENS,
    ];

    for code in required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical limits initialized",
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_reported_unrecognized" => MAX_REPORTED_UNRECOGNIZED
    );

    Ok(())
}

/// Token distribution of a scanned body
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub numbers: usize,
    pub constants: usize,
    pub strings: usize,
    pub operators: usize,
    pub whitespace: usize,
    pub comments: usize,
}

impl TokenCounts {
    /// Count of tokens that are not whitespace or comments
    pub fn significant_tokens(&self) -> usize {
        self.total - self.whitespace - self.comments
    }

    pub fn is_within_limits(&self) -> bool {
        self.total <= MAX_TOKEN_COUNT
    }
}

pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    let mut counts = TokenCounts {
        total: tokens.len(),
        ..TokenCounts::default()
    };

    for token in tokens {
        match token.kind {
            TokenKind::Keyword | TokenKind::ModuleName => counts.keywords += 1,
            TokenKind::Identifier => counts.identifiers += 1,
            TokenKind::Number => counts.numbers += 1,
            TokenKind::String => counts.strings += 1,
            kind if kind.is_constant() => counts.constants += 1,
            kind if kind.is_operator() => counts.operators += 1,
            kind if kind.is_whitespace() => counts.whitespace += 1,
            kind if kind.is_comment() => counts.comments += 1,
            _ => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        assert!(init_lexical_analysis_logging().is_ok());
    }

    #[test]
    fn test_tokenize_with_preferences() {
        let preferences = LexicalPreferences {
            use_fast_path: false,
            ..Default::default()
        };
        let tokens = tokenize_with_preferences("score 1;", preferences).unwrap();
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_token_counts() {
        let tokens = tokenize("rule r:\n\tscore \"x\" + 2 * pawn-a2-me;\n").unwrap();
        let counts = get_token_counts(&tokens);

        assert_eq!(counts.keywords, 2);
        assert_eq!(counts.identifiers, 1);
        assert_eq!(counts.numbers, 1);
        assert_eq!(counts.strings, 1);
        assert_eq!(counts.constants, 1);
        assert_eq!(counts.operators, 2);
        assert_eq!(counts.significant_tokens(), counts.total - counts.whitespace);
        assert!(counts.is_within_limits());
    }
}
