mod error;
mod info;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::{format_module_dump, format_token_listing, PipelineOutput};
pub use result::{ModuleTokens, PipelineResult};
pub use validation::validate_pipeline;

use crate::config::RuntimeConfig;
use crate::lexical::MaximalMunchScanner;
use crate::logging;
use crate::preprocessing::{PreprocessedSource, Preprocessor};
use crate::tokens::ModuleName;
use std::path::Path;
use std::time::Instant;

/// Modules the scanner visits for this configuration, in dump order
fn modules_to_scan(preprocessed: &PreprocessedSource, config: &RuntimeConfig) -> Vec<ModuleName> {
    if config.lexical.scan_all_modules {
        preprocessed
            .modules
            .in_dump_order()
            .map(|module| module.name)
            .collect()
    } else {
        vec![ModuleName::Evaluation]
    }
}

/// Preprocess `source` and tokenize its modules; stops at the first failing stage
pub fn run_source(source: &str, config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    let preprocessed = Preprocessor::with_preferences(config.preprocessing.clone()).run(source)?;

    let mut scanner = MaximalMunchScanner::with_preferences(config.lexical.clone());
    let mut modules = Vec::new();

    for name in modules_to_scan(&preprocessed, config) {
        let body = preprocessed.modules.body(name);
        crate::log_debug!("Scanning module", "module" => name, "bytes" => body.len());

        let tokens = scanner
            .tokenize(body)
            .map_err(|source| PipelineError::LexicalAnalysis {
                module: name,
                source: source.map_lines(|line| preprocessed.source_line(name, line)),
            })?;

        modules.push(ModuleTokens {
            name,
            tokens,
            metrics: scanner.metrics().clone(),
        });
    }

    Ok(PipelineResult {
        file_metadata: None,
        preprocessed,
        modules,
        processing_duration: start_time.elapsed(),
    })
}

/// Process a single file with default settings
pub fn process_file(file_path: &Path) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

/// Process a single file (read -> preprocess -> tokenize)
pub fn process_file_with_config(
    file_path: &Path,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(file_path.to_path_buf(), 0, || {
        process_file_in_context(file_path, config)
    })
}

/// Same as [`process_file_with_config`], for callers that already set a file context
pub(crate) fn process_file_in_context(
    file_path: &Path,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let label = file_path.display().to_string();

    crate::log_info!("Starting preprocessing and tokenization", "file" => label);

    let file_result = crate::file_processor::FileProcessor::from_preferences(
        &config.file_processor,
    )
    .process_file(file_path)?;

    let mut result = run_source(&file_result.source, config)?;
    result.file_metadata = Some(file_result.metadata);
    result.processing_duration = start_time.elapsed();

    result.log_success(&label);
    Ok(result)
}
