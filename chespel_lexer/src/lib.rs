pub mod batch;
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod preprocessing;
pub mod reporter;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{BatchConfig, BatchError, BatchResults};
pub use pipeline::output::PipelineOutput;
pub use pipeline::{run_source, PipelineError, PipelineResult};
pub use reporter::ErrorReporter;
pub use tokens::{Token, TokenKind};
