//! Maximal-munch scanner
//!
//! Walks a module body left to right, emitting one token per step. A
//! character no category accepts becomes a one-character `Invalid` token
//! and an [`UnrecognizedToken`] entry, so the token sequence always
//! reassembles into the input and every bad character is reported at once.

use super::classifier;
use super::fast_path::{self, FastPath};
use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::utils::{Position, Span};
use crate::{log_debug, log_success};
use std::collections::HashMap;
use std::fmt;

/// A character the classifier could not place in any category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedToken {
    /// Position relative to the scanned text
    pub position: Position,
    pub text: String,
}

impl fmt::Display for UnrecognizedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized token {:?} at {}",
            self.text, self.position
        )
    }
}

/// Lexical analysis errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("{total} unrecognized token(s)")]
    UnrecognizedTokens {
        /// The first occurrences, in source order
        errors: Vec<UnrecognizedToken>,
        total: usize,
    },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnrecognizedTokens { .. } => codes::lexical::UNRECOGNIZED_TOKEN,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    /// Rewrite reported line numbers, keeping columns and offsets
    pub fn map_lines(self, map: impl Fn(u32) -> u32) -> Self {
        match self {
            LexerError::UnrecognizedTokens { errors, total } => LexerError::UnrecognizedTokens {
                errors: errors
                    .into_iter()
                    .map(|mut error| {
                        error.position.line = map(error.position.line);
                        error
                    })
                    .collect(),
                total,
            },
            other => other,
        }
    }

    fn from_unrecognized(mut errors: Vec<UnrecognizedToken>) -> Self {
        let total = errors.len();
        errors.truncate(MAX_REPORTED_UNRECOGNIZED);
        LexerError::UnrecognizedTokens { errors, total }
    }
}

/// Result of a full scan, before unrecognized characters are judged fatal
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<UnrecognizedToken>,
}

impl ScanOutput {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fail if any character was unrecognized
    pub fn into_result(self) -> Result<Vec<Token>, LexerError> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(LexerError::from_unrecognized(self.errors))
        }
    }
}

/// Lexical analysis metrics
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub number_tokens: usize,
    pub constant_tokens: usize,
    pub operator_tokens: usize,
    pub whitespace_tokens: usize,
    pub comment_tokens: usize,
    pub invalid_chars: usize,
    pub fast_path_hits: usize,
    pub operator_usage_patterns: HashMap<&'static str, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, kind: TokenKind, preferences: &LexicalPreferences) {
        if kind.is_whitespace() {
            if preferences.include_all_tokens_in_counts {
                self.total_tokens += 1;
            }
            self.whitespace_tokens += 1;
            return;
        }

        self.total_tokens += 1;
        match kind {
            TokenKind::Keyword | TokenKind::ModuleName => self.keyword_tokens += 1,
            TokenKind::Identifier => self.identifier_tokens += 1,
            TokenKind::Number => self.number_tokens += 1,
            TokenKind::LineComment | TokenKind::BlockComment => self.comment_tokens += 1,
            TokenKind::Invalid => self.invalid_chars += 1,
            kind if kind.is_constant() => self.constant_tokens += 1,
            kind if kind.is_operator() => {
                self.operator_tokens += 1;
                if preferences.track_operator_patterns {
                    *self.operator_usage_patterns.entry(kind.name()).or_insert(0) += 1;
                }
            }
            _ => {}
        }
    }
}

/// Maximal-munch scanner driven by the token predicate family
pub struct MaximalMunchScanner {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl MaximalMunchScanner {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    /// Metrics of the most recent scan
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Winning category and byte length at the start of `input`
    pub fn classify(&self, input: &str) -> Option<(TokenKind, usize)> {
        self.classify_counting(input).0
    }

    fn classify_counting(&self, input: &str) -> (Option<(TokenKind, usize)>, bool) {
        if !self.preferences.use_fast_path {
            return (classifier::longest_match(input), false);
        }
        match fast_path::classify(input) {
            FastPath::Token(kind, len) => (Some((kind, len)), true),
            FastPath::Unrecognized => (None, true),
            FastPath::Fallback => (classifier::longest_match(input), false),
        }
    }

    /// Scan all of `input`, collecting unrecognized characters instead of stopping
    pub fn scan(&mut self, input: &str) -> Result<ScanOutput, LexerError> {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting maximal-munch scan",
            "bytes" => input.len(),
            "fast_path" => self.preferences.use_fast_path,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );

        let mut output = ScanOutput::default();
        let mut offset = 0;
        let mut position = Position::start();

        while offset < input.len() {
            if output.tokens.len() >= MAX_TOKEN_COUNT {
                return Err(LexerError::TooManyTokens {
                    count: output.tokens.len(),
                });
            }

            let rest = &input[offset..];
            let (matched, fast) = self.classify_counting(rest);
            if fast {
                self.metrics.fast_path_hits += 1;
            }

            let (kind, len) = match matched {
                Some(found) => found,
                None => {
                    let len = rest.chars().next().map_or(1, char::len_utf8);
                    output.errors.push(UnrecognizedToken {
                        position,
                        text: rest[..len].to_string(),
                    });
                    (TokenKind::Invalid, len)
                }
            };

            let text = &rest[..len];
            let span = Span::covering(position, text);
            self.metrics.record_token(kind, &self.preferences);
            output.tokens.push(Token::new(kind, text, span));

            position = span.end;
            offset += len;
        }

        log_debug!("Scan finished",
            "tokens" => output.tokens.len(),
            "unrecognized" => output.errors.len(),
            "fast_path_hits" => self.metrics.fast_path_hits
        );

        Ok(output)
    }

    /// Scan `input` and fail if any character was unrecognized
    pub fn tokenize(&mut self, input: &str) -> Result<Vec<Token>, LexerError> {
        let tokens = self.scan(input)?.into_result()?;

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "tokens" => tokens.len(),
            "significant_tokens" => self.metrics.total_tokens
        );

        Ok(tokens)
    }
}

impl Default for MaximalMunchScanner {
    fn default() -> Self {
        Self::new()
    }
}
