use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::preprocessing::PreprocessError;
use crate::tokens::ModuleName;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Preprocessing failed: {0}")]
    Preprocessing(#[from] PreprocessError),

    #[error("Lexical analysis of module '{module}' failed: {source}")]
    LexicalAnalysis {
        module: ModuleName,
        /// Line numbers already refer to the raw file
        #[source]
        source: LexerError,
    },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::Preprocessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis { source, .. } => source.error_code(),
            PipelineError::Pipeline { .. } => codes::pipeline::PIPELINE_ERROR,
        }
    }

    /// Name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::FileProcessing(_) => "file processing",
            PipelineError::Preprocessing(_) => "preprocessing",
            PipelineError::LexicalAnalysis { .. } => "lexical analysis",
            PipelineError::Pipeline { .. } => "pipeline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_follow_the_stage() {
        let error = PipelineError::from(PreprocessError::MissingEvaluationModule);
        assert_eq!(error.error_code().as_str(), "E033");
        assert_eq!(error.stage(), "preprocessing");

        let error = PipelineError::pipeline_error("worker vanished");
        assert_eq!(error.error_code().as_str(), "E070");
        assert_eq!(error.to_string(), "Pipeline error: worker vanished");
    }

    #[test]
    fn test_lexical_error_mentions_module() {
        let error = PipelineError::LexicalAnalysis {
            module: ModuleName::Evaluation,
            source: LexerError::TooManyTokens { count: 3 },
        };
        assert!(error.to_string().contains("'evaluation'"));
        assert_eq!(error.error_code().as_str(), "E041");
    }
}
