//! Preprocessing errors
use crate::logging::{codes, Code};
use crate::tokens::ModuleName;
use std::fmt;

/// Which comment form was left open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentKind::Line => f.write_str("line"),
            CommentKind::Block => f.write_str("block"),
        }
    }
}

/// Errors raised by the whole-file text stages. Every one is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreprocessError {
    #[error("Unterminated {kind} comment starting at line {line}, column {column}")]
    UnterminatedComment {
        kind: CommentKind,
        line: u32,
        column: u32,
    },

    #[error("Unbalanced quotes: found {count} '\"' characters, the last at line {line}, column {column}")]
    UnbalancedQuotes { count: usize, line: u32, column: u32 },

    #[error("Duplicate module '{name}' at line {line} (first declared at line {first_line})")]
    DuplicateModule {
        name: ModuleName,
        first_line: u32,
        line: u32,
    },

    #[error("Missing mandatory 'evaluation' module")]
    MissingEvaluationModule,

    #[error("Module header at line {line} does not name a known module: '{header}'")]
    UnnamedModule { line: u32, header: String },

    #[error("Unexpected text '{extra}' after module name '{name}' at line {line}")]
    TrailingHeaderText {
        name: ModuleName,
        line: u32,
        extra: String,
    },

    #[error("Bad indentation at line {line}, column {column}: evaluation lines are indented with tabs only")]
    BadIndentation { line: u32, column: u32 },
}

impl PreprocessError {
    pub fn error_code(&self) -> Code {
        match self {
            PreprocessError::UnterminatedComment { .. } => {
                codes::preprocessing::UNTERMINATED_COMMENT
            }
            PreprocessError::UnbalancedQuotes { .. } => codes::preprocessing::UNBALANCED_QUOTES,
            PreprocessError::DuplicateModule { .. } => codes::preprocessing::DUPLICATE_MODULE,
            PreprocessError::MissingEvaluationModule => {
                codes::preprocessing::MISSING_EVALUATION_MODULE
            }
            PreprocessError::UnnamedModule { .. } | PreprocessError::TrailingHeaderText { .. } => {
                codes::preprocessing::UNNAMED_MODULE
            }
            PreprocessError::BadIndentation { .. } => codes::preprocessing::BAD_INDENTATION,
        }
    }

    /// Line and column the error points at, when it has one
    pub fn location(&self) -> Option<(u32, u32)> {
        match self {
            PreprocessError::UnterminatedComment { line, column, .. }
            | PreprocessError::UnbalancedQuotes { line, column, .. }
            | PreprocessError::BadIndentation { line, column } => Some((*line, *column)),
            PreprocessError::DuplicateModule { line, .. }
            | PreprocessError::UnnamedModule { line, .. }
            | PreprocessError::TrailingHeaderText { line, .. } => Some((*line, 1)),
            PreprocessError::MissingEvaluationModule => None,
        }
    }

    /// Rewrite line numbers, e.g. from a stage's own text back to the raw file
    pub fn map_lines(self, origin: impl Fn(u32) -> u32) -> Self {
        match self {
            PreprocessError::UnterminatedComment { kind, line, column } => {
                PreprocessError::UnterminatedComment {
                    kind,
                    line: origin(line),
                    column,
                }
            }
            PreprocessError::UnbalancedQuotes {
                count,
                line,
                column,
            } => PreprocessError::UnbalancedQuotes {
                count,
                line: origin(line),
                column,
            },
            PreprocessError::DuplicateModule {
                name,
                first_line,
                line,
            } => PreprocessError::DuplicateModule {
                name,
                first_line: origin(first_line),
                line: origin(line),
            },
            PreprocessError::UnnamedModule { line, header } => PreprocessError::UnnamedModule {
                line: origin(line),
                header,
            },
            PreprocessError::TrailingHeaderText { name, line, extra } => {
                PreprocessError::TrailingHeaderText {
                    name,
                    line: origin(line),
                    extra,
                }
            }
            PreprocessError::BadIndentation { line, column } => PreprocessError::BadIndentation {
                line: origin(line),
                column,
            },
            PreprocessError::MissingEvaluationModule => PreprocessError::MissingEvaluationModule,
        }
    }
}
