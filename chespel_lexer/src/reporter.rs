//! Fatal diagnostics shared by every stage
//!
//! A failing stage produces one [`PipelineError`]. The reporter turns it into
//! diagnostics located on raw-file lines, logs each one, and renders them as
//! cargo-style text followed by a one-line summary.

use crate::lexical::LexerError;
use crate::logging::Code;
use crate::pipeline::PipelineError;
use crate::preprocessing::{CommentKind, PreprocessError};
use crate::utils::{Position, SourceMap, Span};
use crate::{log_error, log_info};

/// One reportable problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: Code,
    pub message: String,
    /// Raw-file line and column
    pub location: Option<(u32, u32)>,
    /// Source text expected at the location, underlined when it matches
    pub snippet: Option<String>,
}

impl Diagnostic {
    fn new(code: Code, message: String) -> Self {
        Self {
            code,
            message,
            location: None,
            snippet: None,
        }
    }

    fn at(mut self, location: Option<(u32, u32)>, snippet: Option<String>) -> Self {
        self.location = location;
        self.snippet = snippet;
        self
    }

    fn span(&self) -> Option<Span> {
        let (line, column) = self.location?;
        let start = Position::new(0, line, column);
        let text = self.snippet.as_deref().unwrap_or(" ");
        Some(Span::covering(start, text))
    }
}

/// Diagnostics for one failure, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
    /// Problems counted but not listed individually
    pub omitted: usize,
}

impl Report {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len() + self.omitted
    }

    pub fn summary_line(&self) -> String {
        let count = self.error_count();
        format!(
            "{} error{} detected. The source has not been tokenized.",
            count,
            if count == 1 { "" } else { "s" }
        )
    }
}

fn preprocess_snippet(error: &PreprocessError) -> Option<String> {
    match error {
        PreprocessError::UnterminatedComment { kind, .. } => Some(match kind {
            CommentKind::Line => "//".to_string(),
            CommentKind::Block => "/*".to_string(),
        }),
        PreprocessError::UnbalancedQuotes { .. } => Some("\"".to_string()),
        PreprocessError::DuplicateModule { .. } => Some("module".to_string()),
        PreprocessError::UnnamedModule { header, .. } => Some(header.clone()),
        PreprocessError::TrailingHeaderText { .. } => Some("module".to_string()),
        PreprocessError::BadIndentation { .. } => Some(" ".to_string()),
        PreprocessError::MissingEvaluationModule => None,
    }
}

/// Collect diagnostics for a failed pipeline run
pub fn collect(error: &PipelineError) -> Report {
    match error {
        PipelineError::Preprocessing(e) => Report {
            diagnostics: vec![Diagnostic::new(e.error_code(), e.to_string())
                .at(e.location(), preprocess_snippet(e))],
            omitted: 0,
        },
        PipelineError::LexicalAnalysis {
            module,
            source: LexerError::UnrecognizedTokens { errors, total },
        } => {
            let code = error.error_code();
            let mut diagnostics: Vec<Diagnostic> = errors
                .iter()
                .map(|e| {
                    Diagnostic::new(
                        code,
                        format!("unrecognized token {:?} in module '{}'", e.text, module),
                    )
                    .at(
                        Some((e.position.line, e.position.column)),
                        Some(e.text.clone()),
                    )
                })
                .collect();
            diagnostics.sort_by_key(|d| d.location);
            Report {
                omitted: total.saturating_sub(diagnostics.len()),
                diagnostics,
            }
        }
        other => Report {
            diagnostics: vec![Diagnostic::new(other.error_code(), other.to_string())],
            omitted: 0,
        },
    }
}

/// Renders and logs diagnostics for one source
pub struct ErrorReporter<'a> {
    label: String,
    source: Option<&'a str>,
}

impl<'a> ErrorReporter<'a> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            source: None,
        }
    }

    /// Raw text used for excerpts
    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    /// Underlined source line, only when the expected text is really there
    fn excerpt(&self, diagnostic: &Diagnostic) -> Option<String> {
        let map = SourceMap::new(self.source?);
        let (line, column) = diagnostic.location?;
        let text = map.get_line(line)?;
        let found: String = text.chars().skip(column.saturating_sub(1) as usize).collect();

        match &diagnostic.snippet {
            Some(snippet) if !found.starts_with(snippet.as_str()) => None,
            _ => map.excerpt(&diagnostic.span()?),
        }
    }

    pub fn render(&self, report: &Report) -> String {
        let mut output = String::new();

        for diagnostic in &report.diagnostics {
            output.push_str(&format!(
                "error[{}]: {}\n",
                diagnostic.code.as_str(),
                diagnostic.message
            ));
            match diagnostic.location {
                Some((line, column)) => {
                    output.push_str(&format!("  --> {}:{}:{}\n", self.label, line, column))
                }
                None => output.push_str(&format!("  --> {}\n", self.label)),
            }
            if let Some(excerpt) = self.excerpt(diagnostic) {
                output.push_str(&excerpt);
            }
            output.push('\n');
        }

        if report.omitted > 0 {
            output.push_str(&format!(
                "note: {} more error{} not shown\n",
                report.omitted,
                if report.omitted == 1 { "" } else { "s" }
            ));
        }

        output.push_str(&report.summary_line());
        output.push('\n');
        output
    }

    /// Log every diagnostic of `error` and return the rendered text
    pub fn report(&self, error: &PipelineError) -> String {
        let report = collect(error);

        for diagnostic in &report.diagnostics {
            match diagnostic.span() {
                Some(span) => log_error!(diagnostic.code, &diagnostic.message,
                    span = span,
                    "stage" => error.stage()
                ),
                None => log_error!(diagnostic.code, &diagnostic.message,
                    "stage" => error.stage()
                ),
            }
        }

        log_info!("Compilation aborted",
            "file" => self.label,
            "errors" => report.error_count()
        );

        self.render(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::pipeline::run_source;

    fn render(source: &str) -> String {
        let error = run_source(source, &RuntimeConfig::default()).unwrap_err();
        ErrorReporter::new("rules.chp")
            .with_source(source)
            .render(&collect(&error))
    }

    #[test]
    fn test_unterminated_comment_report() {
        let rendered = render("module evaluation\nscore 1; /* open");
        assert!(rendered.starts_with("error[E030]: Unterminated block comment"));
        assert!(rendered.contains("  --> rules.chp:2:10\n"));
        assert!(rendered.contains("2 | score 1; /* open\n"));
        assert!(rendered.contains("  |          ^^\n"));
        assert!(rendered.ends_with("1 error detected. The source has not been tokenized.\n"));
    }

    #[test]
    fn test_unrecognized_tokens_are_reported_together() {
        let source = "module evaluation\nrule a:\n\tscore !;\n\tlet # = 1;\n";
        let rendered = render(source);

        assert_eq!(rendered.matches("error[E040]").count(), 2);
        assert!(rendered.contains("unrecognized token \"!\" in module 'evaluation'"));
        assert!(rendered.contains("  --> rules.chp:3:8\n"));
        assert!(rendered.contains("  --> rules.chp:4:6\n"));
        assert!(rendered.ends_with("2 errors detected. The source has not been tokenized.\n"));
    }

    #[test]
    fn test_missing_evaluation_has_no_location() {
        let rendered = render("module search\nx\n");
        assert!(rendered.contains("error[E033]: Missing mandatory 'evaluation' module\n"));
        assert!(rendered.contains("  --> rules.chp\n"));
        assert!(!rendered.contains(" | "));
    }

    #[test]
    fn test_excerpt_skipped_when_text_moved() {
        let diagnostic = Diagnostic::new(Code::new("E040"), "x".to_string())
            .at(Some((1, 3)), Some("!".to_string()));
        let reporter = ErrorReporter::new("rules.chp").with_source("score 1;\n");
        let rendered = reporter.render(&Report {
            diagnostics: vec![diagnostic],
            omitted: 0,
        });
        assert!(!rendered.contains(" | "));
    }

    #[test]
    fn test_omitted_errors_are_counted() {
        let report = Report {
            diagnostics: vec![Diagnostic::new(Code::new("E040"), "x".to_string())],
            omitted: 4,
        };
        assert_eq!(report.error_count(), 5);
        let rendered = ErrorReporter::new("rules.chp").render(&report);
        assert!(rendered.contains("note: 4 more errors not shown\n"));
    }

    #[test]
    fn test_report_logs_and_renders() {
        let source = "module evaluation\nmodule evaluation\n";
        let error = run_source(source, &RuntimeConfig::default()).unwrap_err();
        let rendered = ErrorReporter::new("rules.chp").with_source(source).report(&error);
        assert!(rendered.starts_with("error[E032]: Duplicate module 'evaluation' at line 2"));
        assert!(rendered.contains("2 | module evaluation\n"));
    }
}
