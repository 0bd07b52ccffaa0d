use crate::config::compile_time::{file_processing, lexical};
use crate::file_processor::SOURCE_EXTENSION;
use crate::tokens::{ModuleName, TokenKind};

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub stages: Vec<&'static str>,
    pub token_categories: usize,
    pub module_names: Vec<&'static str>,
    pub max_file_size: u64,
    pub max_token_count: usize,
    pub supported_extensions: Vec<String>,
    pub cargo_style_output: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Chespel Lexical Pipeline:\n\
             - Stages: {}\n\
             - Token Categories: {}\n\
             - Modules: {}\n\
             - Max File Size: {} MB\n\
             - Max Tokens Per Module: {}\n\
             - Supported Extensions: {}\n\
             - Cargo-style Output: {}",
            self.stages.join(" -> "),
            self.token_categories,
            self.module_names.join(", "),
            self.max_file_size / (1024 * 1024),
            self.max_token_count,
            self.supported_extensions.join(", "),
            self.cargo_style_output
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage Chespel front end with {} token categories",
            self.stages.len(),
            self.token_categories
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        stages: vec![
            "comment stripping",
            "quote validation",
            "whitespace trimming",
            "module splitting",
            "tokenization",
        ],
        token_categories: TokenKind::CLASSIFIED.len(),
        module_names: ModuleName::ALL.iter().map(|name| name.as_str()).collect(),
        max_file_size: file_processing::MAX_FILE_SIZE,
        max_token_count: lexical::MAX_TOKEN_COUNT,
        supported_extensions: vec![SOURCE_EXTENSION.to_string()],
        cargo_style_output: crate::logging::config::use_cargo_style_output(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_info() {
        let info = get_pipeline_info();
        assert_eq!(info.stages.len(), 5);
        assert_eq!(info.module_names, ["search", "evaluation", "opening", "endgame"]);
        assert!(info.report().contains("module splitting -> tokenization"));
        assert!(info.summary().starts_with("5-stage"));
    }
}
