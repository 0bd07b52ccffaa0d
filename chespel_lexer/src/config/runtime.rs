// RUNTIME PREFERENCES (User Experience)

use crate::logging::events::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Read an environment variable and parse it, falling back to `default`
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to reject files without the .chp extension
    pub require_chp_extension: bool,

    /// Whether to log per-file timing information
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_chp_extension: env_or(env_vars::REQUIRE_CHP_EXTENSION, false),
            enable_performance_logging: env_or(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessingPreferences {
    /// Run the indentation check and line joining on the evaluation module
    pub normalize_evaluation: bool,

    /// Warn when non-blank text precedes the first module header
    pub warn_on_preamble: bool,
}

impl Default for PreprocessingPreferences {
    fn default() -> Self {
        Self {
            normalize_evaluation: env_or(env_vars::PREPROCESSING_NORMALIZE_EVALUATION, false),
            warn_on_preamble: env_or(env_vars::PREPROCESSING_WARN_ON_PREAMBLE, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Use direct lookahead for single-character categories
    pub use_fast_path: bool,

    /// Scan every present module instead of only `evaluation`
    pub scan_all_modules: bool,

    /// Whether to include whitespace in significant token counts
    pub include_all_tokens_in_counts: bool,

    /// Whether to track operator usage patterns
    pub track_operator_patterns: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            use_fast_path: env_or(env_vars::LEXICAL_FAST_PATH, true),
            scan_all_modules: env_or(env_vars::LEXICAL_SCAN_ALL_MODULES, true),
            include_all_tokens_in_counts: env_or(env_vars::LEXICAL_INCLUDE_ALL_TOKENS, false),
            track_operator_patterns: env_or(env_vars::LEXICAL_TRACK_OPERATORS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the configured logger
    pub min_log_level: LogLevel,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_or(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_or(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            enable_cargo_style_output: env_or(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_or(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Failure to load a runtime configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration in '{path}': {message}")]
    Parse { path: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub preprocessing: PreprocessingPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a configuration from TOML text; missing sections keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a configuration file such as `chespel.toml`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_CHP_EXTENSION: &str = "CHESPEL_REQUIRE_CHP_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "CHESPEL_ENABLE_PERFORMANCE_LOGGING";

    // Preprocessing
    pub const PREPROCESSING_NORMALIZE_EVALUATION: &str = "CHESPEL_NORMALIZE_EVALUATION";
    pub const PREPROCESSING_WARN_ON_PREAMBLE: &str = "CHESPEL_WARN_ON_PREAMBLE";

    // Lexical
    pub const LEXICAL_FAST_PATH: &str = "CHESPEL_LEXICAL_FAST_PATH";
    pub const LEXICAL_SCAN_ALL_MODULES: &str = "CHESPEL_LEXICAL_SCAN_ALL_MODULES";
    pub const LEXICAL_INCLUDE_ALL_TOKENS: &str = "CHESPEL_LEXICAL_INCLUDE_ALL_TOKENS";
    pub const LEXICAL_TRACK_OPERATORS: &str = "CHESPEL_LEXICAL_TRACK_OPERATORS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "CHESPEL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CHESPEL_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "CHESPEL_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "CHESPEL_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "CHESPEL_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            "[preprocessing]\nnormalize_evaluation = true\n\n[lexical]\nuse_fast_path = false\n",
        )
        .unwrap();

        assert!(config.preprocessing.normalize_evaluation);
        assert!(!config.lexical.use_fast_path);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(RuntimeConfig::from_toml_str("[lexical\nuse_fast_path = 3").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuntimeConfig::load(Path::new("/nonexistent/chespel.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chespel.toml");
        std::fs::write(&path, "[logging]\nmin_log_level = \"Debug\"\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }
}
