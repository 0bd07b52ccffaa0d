use crate::file_processor::FileMetadata;
use crate::lexical::{get_token_counts, LexicalMetrics, TokenCounts};
use crate::logging::codes;
use crate::preprocessing::PreprocessedSource;
use crate::tokens::{ModuleName, Token};
use std::time::Duration;

/// Tokens scanned from one module body
#[derive(Debug, Clone)]
pub struct ModuleTokens {
    pub name: ModuleName,
    /// Spans are relative to the module body
    pub tokens: Vec<Token>,
    pub metrics: LexicalMetrics,
}

impl ModuleTokens {
    pub fn counts(&self) -> TokenCounts {
        get_token_counts(&self.tokens)
    }
}

/// Everything one pipeline pass produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Present when the source came from disk
    pub file_metadata: Option<FileMetadata>,
    pub preprocessed: PreprocessedSource,
    /// Scanned modules in dump order
    pub modules: Vec<ModuleTokens>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn module(&self, name: ModuleName) -> Option<&ModuleTokens> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn tokens(&self, name: ModuleName) -> &[Token] {
        self.module(name).map(|m| m.tokens.as_slice()).unwrap_or(&[])
    }

    pub fn token_count(&self) -> usize {
        self.modules.iter().map(|m| m.tokens.len()).sum()
    }

    pub fn log_success(&self, label: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let tokens_per_sec = if seconds > 0.0 {
            self.token_count() as f64 / seconds
        } else {
            0.0
        };

        crate::log_success!(
            codes::success::PIPELINE_COMPLETE,
            "Preprocessing and tokenization succeeded",
            "file" => label,
            "modules_scanned" => self.modules.len(),
            "tokens" => self.token_count(),
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "processing_rate_tokens_per_sec" => format!("{:.0}", tokens_per_sec)
        );
    }
}
