//! Whole-file text stages run before tokenization
//!
//! raw text -> comment stripping -> quote gate -> trailing whitespace
//! trimming -> module splitting -> (optional) evaluation normalization.
//! Each stage returns a fresh string and the first failing stage aborts.

pub mod comments;
pub mod error;
pub mod line_map;
pub mod modules;
pub mod normalizer;
pub mod quotes;
pub mod whitespace;

use crate::config::runtime::PreprocessingPreferences;
use crate::logging::codes;
use crate::tokens::ModuleName;
use crate::{log_debug, log_success};

pub use comments::{strip_comments, strip_comments_mapped};
pub use error::{CommentKind, PreprocessError};
pub use line_map::LineMap;
pub use modules::{split_modules, Module, ModuleSplitter, SourceModules};
pub use normalizer::normalize_evaluation;
pub use quotes::validate_quotes;
pub use whitespace::trim_trailing_whitespace;

/// Output of every preprocessing stage for one source
#[derive(Debug, Clone)]
pub struct PreprocessedSource {
    /// Text after comment stripping
    pub stripped: String,
    /// Text after trailing whitespace trimming; module line numbers refer to it
    pub trimmed: String,
    pub modules: SourceModules,
    /// Trimmed-text line to raw-file line
    pub line_map: LineMap,
    /// Output line to body line, when the evaluation body was normalized
    pub evaluation_map: Option<LineMap>,
    pub quote_count: usize,
}

impl PreprocessedSource {
    /// Raw-file line of `body_line` (1-based) within module `name`
    pub fn source_line(&self, name: ModuleName, body_line: u32) -> u32 {
        let Some(module) = self.modules.get(name) else {
            return body_line;
        };
        let body_line = match (&self.evaluation_map, name) {
            (Some(map), ModuleName::Evaluation) => map.origin(body_line),
            _ => body_line,
        };
        self.line_map.origin(module.start_line + body_line - 1)
    }
}

/// Runs the preprocessing stages in order
pub struct Preprocessor {
    preferences: PreprocessingPreferences,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::with_preferences(PreprocessingPreferences::default())
    }

    pub fn with_preferences(preferences: PreprocessingPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &PreprocessingPreferences {
        &self.preferences
    }

    pub fn run(&self, source: &str) -> Result<PreprocessedSource, PreprocessError> {
        let (stripped, line_map) = strip_comments_mapped(source)?;
        log_success!(codes::success::COMMENTS_STRIPPED, "Comments stripped",
            "removed_bytes" => source.len() - stripped.len()
        );

        let origin = |line| line_map.origin(line);

        let quote_count = validate_quotes(&stripped).map_err(|e| e.map_lines(origin))?;
        log_success!(codes::success::QUOTES_BALANCED, "Quotes balanced",
            "quotes" => quote_count
        );

        let trimmed = trim_trailing_whitespace(&stripped);
        log_success!(codes::success::WHITESPACE_TRIMMED, "Trailing whitespace trimmed",
            "removed_bytes" => stripped.len() - trimmed.len()
        );

        let mut modules = ModuleSplitter::with_preferences(self.preferences.clone())
            .split(&trimmed)
            .map_err(|e| e.map_lines(origin))?;
        log_success!(codes::success::MODULES_SPLIT, "Modules located",
            "modules" => modules.len()
        );

        let mut evaluation_map = None;
        if self.preferences.normalize_evaluation {
            if let Some(evaluation) = modules.get(ModuleName::Evaluation) {
                let start_line = evaluation.start_line;
                let (normalized, map) = normalize_evaluation(&evaluation.body, start_line)
                    .map_err(|e| e.map_lines(origin))?;
                log_success!(codes::success::EVALUATION_NORMALIZED, "Evaluation module normalized",
                    "lines" => map.len()
                );
                modules.replace_body(ModuleName::Evaluation, normalized);
                evaluation_map = Some(map);
            }
        }

        log_debug!("Preprocessing finished",
            "raw_bytes" => source.len(),
            "trimmed_bytes" => trimmed.len()
        );

        Ok(PreprocessedSource {
            stripped,
            trimmed,
            modules,
            line_map,
            evaluation_map,
            quote_count,
        })
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate that preprocessing error codes are registered (for system startup)
pub fn init_preprocessing_logging() -> Result<(), String> {
    let required = [
        codes::preprocessing::UNTERMINATED_COMMENT,
        codes::preprocessing::UNBALANCED_QUOTES,
        codes::preprocessing::DUPLICATE_MODULE,
        codes::preprocessing::MISSING_EVALUATION_MODULE,
        codes::preprocessing::UNNAMED_MODULE,
        codes::preprocessing::BAD_INDENTATION,
    ];

    for code in required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Preprocessing error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    Ok(())
}

/// Run every stage with default preferences
pub fn preprocess(source: &str) -> Result<PreprocessedSource, PreprocessError> {
    Preprocessor::new().run(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_init_logging() {
        assert!(init_preprocessing_logging().is_ok());
    }

    #[test]
    fn test_full_preprocessing() {
        let source = "// header\nmodule evaluation  \nrule a: /* inline */\n\tscore 1;\n";
        let result = preprocess(source).unwrap();

        assert_eq!(result.stripped, "\nmodule evaluation  \nrule a: \n\tscore 1;\n");
        assert_eq!(result.trimmed, "\nmodule evaluation\nrule a:\n\tscore 1;\n");
        assert_eq!(
            result.modules.body(ModuleName::Evaluation),
            "rule a:\n\tscore 1;\n"
        );
        assert_eq!(result.source_line(ModuleName::Evaluation, 2), 4);
    }

    #[test]
    fn test_final_line_spaces_do_not_reach_body() {
        let result = preprocess("module evaluation\nscore 1;   ").unwrap();
        assert_eq!(result.modules.body(ModuleName::Evaluation), "score 1;");

        let result = preprocess("module evaluation\nscore 1; \t\n").unwrap();
        assert_eq!(result.modules.body(ModuleName::Evaluation), "score 1; \t\n");
    }

    #[test]
    fn test_comment_markers_and_quotes() {
        assert_matches!(
            preprocess("\"a /* b"),
            Err(PreprocessError::UnbalancedQuotes { count: 1, .. })
        );
        assert_matches!(
            preprocess("x \" /* b"),
            Err(PreprocessError::UnbalancedQuotes { .. })
        );
        assert_matches!(
            preprocess("/* b \" */"),
            Err(PreprocessError::MissingEvaluationModule)
        );
    }

    #[test]
    fn test_errors_point_at_raw_lines() {
        let source = "/* one\ntwo\n*/\nmodule evaluation\nmodule evaluation\n";
        assert_matches!(
            preprocess(source),
            Err(PreprocessError::DuplicateModule {
                first_line: 4,
                line: 5,
                ..
            })
        );
    }

    #[test]
    fn test_normalization_is_optional() {
        let source = "module evaluation\nrule a:\n\n\tscore 1 +\n\t2;\n";

        let plain = preprocess(source).unwrap();
        assert!(plain.evaluation_map.is_none());
        assert_eq!(
            plain.modules.body(ModuleName::Evaluation),
            "rule a:\n\n\tscore 1 +\n\t2;\n"
        );

        let preferences = PreprocessingPreferences {
            normalize_evaluation: true,
            ..Default::default()
        };
        let normalized = Preprocessor::with_preferences(preferences)
            .run(source)
            .unwrap();
        assert_eq!(
            normalized.modules.body(ModuleName::Evaluation),
            "rule a:\n\tscore 1 + 2;\n"
        );
        assert_eq!(normalized.source_line(ModuleName::Evaluation, 2), 4);
    }
}
