//! Consolidated error codes and classification system
//!
//! Single source of truth for all error, warning and success codes used by the
//! lexer, together with their behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Whole-file preprocessing error codes
pub mod preprocessing {
    use super::Code;

    pub const UNTERMINATED_COMMENT: Code = Code::new("E030");
    pub const UNBALANCED_QUOTES: Code = Code::new("E031");
    pub const DUPLICATE_MODULE: Code = Code::new("E032");
    pub const MISSING_EVALUATION_MODULE: Code = Code::new("E033");
    pub const UNNAMED_MODULE: Code = Code::new("E034");
    pub const BAD_INDENTATION: Code = Code::new("E035");

    // Warnings
    pub const PREAMBLE_IGNORED: Code = Code::new("W030");
    pub const LARGE_MODULE_BODY: Code = Code::new("W031");
    pub const EMPTY_EVALUATION_MODULE: Code = Code::new("W032");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNRECOGNIZED_TOKEN: Code = Code::new("E040");
    pub const TOO_MANY_TOKENS: Code = Code::new("E041");
}

/// Batch and pipeline orchestration error codes
pub mod pipeline {
    use super::Code;

    pub const PIPELINE_ERROR: Code = Code::new("E070");
    pub const BATCH_DIRECTORY_ERROR: Code = Code::new("E071");
    pub const BATCH_WORKER_FAILURE: Code = Code::new("E072");
}

/// Success codes
pub mod success {
    use super::Code;

    // System
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_VALIDATION_PASSED: Code = Code::new("I007");

    // Preprocessing
    pub const COMMENTS_STRIPPED: Code = Code::new("I010");
    pub const QUOTES_BALANCED: Code = Code::new("I011");
    pub const WHITESPACE_TRIMMED: Code = Code::new("I012");
    pub const MODULES_SPLIT: Code = Code::new("I013");
    pub const EVALUATION_NORMALIZED: Code = Code::new("I014");

    // Lexical
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    // Orchestration
    pub const PIPELINE_COMPLETE: Code = Code::new("I030");
    pub const BATCH_COMPLETE: Code = Code::new("I031");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();
        let mut register = |metadata: ErrorMetadata| {
            registry.insert(metadata.code, metadata);
        };

        // System errors
        register(ErrorMetadata::new(
            "ERR001",
            "System",
            Severity::Critical,
            false,
            true,
            "Critical internal system error",
            "File a bug report with the input that triggered it",
        ));
        register(ErrorMetadata::new(
            "ERR002",
            "System",
            Severity::Critical,
            false,
            true,
            "System initialization failure",
            "Check logging configuration and environment variables",
        ));
        register(ErrorMetadata::new(
            "ERR003",
            "System",
            Severity::High,
            false,
            true,
            "Runtime configuration could not be loaded",
            "Fix the configuration file or remove it to use defaults",
        ));

        // File processing errors
        register(ErrorMetadata::new(
            "E005",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File not found at specified path",
            "Check file path and ensure file exists",
        ));
        register(ErrorMetadata::new(
            "E006",
            "FileProcessing",
            Severity::Low,
            true,
            false,
            "File does not have .chp extension",
            "Rename file with .chp extension or verify file type",
        ));
        register(ErrorMetadata::new(
            "E007",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File exceeds maximum size limit",
            "Reduce file size or rebuild with a larger limit profile",
        ));
        register(ErrorMetadata::new(
            "E008",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File is empty when content expected",
            "Provide a source file with at least an evaluation module",
        ));
        register(ErrorMetadata::new(
            "E009",
            "FileProcessing",
            Severity::High,
            false,
            true,
            "Permission denied when accessing file",
            "Check file permissions",
        ));
        register(ErrorMetadata::new(
            "E010",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File is not valid UTF-8",
            "Save the source file as UTF-8 or ASCII",
        ));
        register(ErrorMetadata::new(
            "E011",
            "FileProcessing",
            Severity::High,
            false,
            true,
            "I/O error while reading file",
            "Check disk health and file accessibility",
        ));
        register(ErrorMetadata::new(
            "E012",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "Path is not a regular file",
            "Pass a source file or a directory to batch mode",
        ));
        register(ErrorMetadata::new(
            "E013",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File exceeds maximum line count",
            "Split the source into smaller files",
        ));

        // Preprocessing errors
        register(ErrorMetadata::new(
            "E030",
            "Preprocessing",
            Severity::High,
            false,
            true,
            "Comment still open at end of input",
            "Close the block comment with */ or end the line comment with a newline",
        ));
        register(ErrorMetadata::new(
            "E031",
            "Preprocessing",
            Severity::High,
            false,
            true,
            "Odd number of string delimiters",
            "Close the string literal started at the reported position",
        ));
        register(ErrorMetadata::new(
            "E032",
            "Preprocessing",
            Severity::High,
            false,
            true,
            "Module declared more than once",
            "Merge the duplicate module sections into one",
        ));
        register(ErrorMetadata::new(
            "E033",
            "Preprocessing",
            Severity::High,
            false,
            true,
            "No evaluation module declared",
            "Add a 'module evaluation' header",
        ));
        register(ErrorMetadata::new(
            "E034",
            "Preprocessing",
            Severity::High,
            false,
            true,
            "Malformed module header",
            "Write 'module' followed by exactly one of: search, evaluation, opening, endgame",
        ));
        register(ErrorMetadata::new(
            "E035",
            "Preprocessing",
            Severity::Medium,
            false,
            true,
            "Indentation contains spaces",
            "Indent evaluation rules with tabs only",
        ));

        // Preprocessing warnings
        register(ErrorMetadata::new(
            "W030",
            "Preprocessing",
            Severity::Low,
            true,
            false,
            "Text before the first module header is ignored",
            "Move the text into a module or delete it",
        ));
        register(ErrorMetadata::new(
            "W031",
            "Preprocessing",
            Severity::Low,
            true,
            false,
            "Module body is unusually large",
            "Consider splitting rules across modules",
        ));
        register(ErrorMetadata::new(
            "W032",
            "Preprocessing",
            Severity::Low,
            true,
            false,
            "Evaluation module has an empty body",
            "Add at least one rule to the evaluation module",
        ));

        // Lexical errors
        register(ErrorMetadata::new(
            "E040",
            "LexicalAnalysis",
            Severity::High,
            false,
            true,
            "Character does not start any token",
            "Remove or replace the character at the reported position",
        ));
        register(ErrorMetadata::new(
            "E041",
            "LexicalAnalysis",
            Severity::High,
            false,
            true,
            "Token count exceeds maximum limit",
            "Split the module or rebuild with a larger limit profile",
        ));

        // Orchestration errors
        register(ErrorMetadata::new(
            "E070",
            "Pipeline",
            Severity::High,
            false,
            true,
            "Pipeline stage failed",
            "Inspect the preceding diagnostics",
        ));
        register(ErrorMetadata::new(
            "E071",
            "Batch",
            Severity::Medium,
            false,
            true,
            "Batch directory could not be read",
            "Check the directory path and permissions",
        ));
        register(ErrorMetadata::new(
            "E072",
            "Batch",
            Severity::High,
            false,
            true,
            "Batch worker thread failed",
            "Re-run with --sequential to isolate the failing file",
        ));

        // Success codes
        register(ErrorMetadata::new(
            "I004",
            "System",
            Severity::Low,
            true,
            false,
            "Logging system initialized",
            "No action required",
        ));
        register(ErrorMetadata::new(
            "I006",
            "FileProcessing",
            Severity::Low,
            true,
            false,
            "File read and validated",
            "Continue to preprocessing",
        ));
        register(ErrorMetadata::new(
            "I013",
            "Preprocessing",
            Severity::Low,
            true,
            false,
            "Source split into modules",
            "Continue to tokenization",
        ));
        register(ErrorMetadata::new(
            "I020",
            "LexicalAnalysis",
            Severity::Low,
            true,
            false,
            "Module body tokenized",
            "Token stream ready for the parser",
        ));
        register(ErrorMetadata::new(
            "I030",
            "Pipeline",
            Severity::Low,
            true,
            false,
            "All stages completed",
            "No action required",
        ));

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
