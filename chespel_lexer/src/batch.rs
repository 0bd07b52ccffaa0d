//! Directory-based batch tokenization
//!
//! Each file runs through the whole pipeline on its own; files share no
//! state, so they can be spread across worker threads. Results are
//! collected with the global logging context set per file.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::config::RuntimeConfig;
use crate::file_processor::SOURCE_EXTENSION;
use crate::logging::{self, codes};
use crate::pipeline::{self, PipelineError, PipelineResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    pub fail_fast: bool,
    /// Preferences handed to every per-file pipeline run
    pub runtime: RuntimeConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(MAX_WORKER_THREADS))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            progress_reporting: false,
            fail_fast: false,
            runtime: RuntimeConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Thread count clamped to the compile-time worker limit
    pub fn effective_threads(&self) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS)
    }

    fn file_limit(&self) -> usize {
        self.max_files
            .unwrap_or(MAX_FILES_PER_BATCH)
            .min(MAX_FILES_PER_BATCH)
    }
}

/// Batch processing results
#[derive(Debug, Default)]
pub struct BatchResults {
    pub successful_files: Vec<(PathBuf, PipelineResult)>,
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.successful_files.len() as f64 / self.files_processed as f64
        }
    }

    pub fn total_tokens(&self) -> usize {
        self.successful_files
            .iter()
            .map(|(_, result)| result.token_count())
            .sum()
    }

    pub fn add_success(&mut self, file_path: PathBuf, result: PipelineResult) {
        self.successful_files.push((file_path, result));
        self.files_processed += 1;
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.successful_files.extend(other.successful_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    /// Order both lists by path so parallel runs report deterministically
    fn sort(&mut self) {
        self.successful_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed, {} successful ({:.1}%), {} failed, {} tokens, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.total_tokens(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No .chp files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Thread pool error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> logging::Code {
        match self {
            BatchError::ThreadError { .. } => codes::pipeline::BATCH_WORKER_FAILURE,
            _ => codes::pipeline::BATCH_DIRECTORY_ERROR,
        }
    }
}

/// Poisoned locks still hold valid results; a panicking worker only loses its own file
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Discover `.chp` files in a directory, sorted by path
pub fn discover_chp_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        let error = BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        };
        crate::log_error!(error.error_code(), "Batch directory not found",
            "directory" => dir_path.display()
        );
        return Err(error);
    }

    let mut files = Vec::new();
    visit_directory(dir_path, &mut files, config)?;

    if files.is_empty() {
        return Err(BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        });
    }

    files.sort();

    crate::log_success!(
        codes::success::FILE_VALIDATION_PASSED,
        "File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

/// Returns false once the file limit is reached
fn visit_directory(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<bool, BatchError> {
    let entries = fs::read_dir(dir_path).map_err(|e| BatchError::IoError {
        error: format!("{}: {}", dir_path.display(), e),
    })?;

    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BatchError::IoError {
            error: e.to_string(),
        })?;
    paths.sort();

    let limit = config.file_limit();
    for path in paths {
        if path.is_dir() {
            if config.recursive && !visit_directory(&path, files, config)? {
                return Ok(false);
            }
        } else if is_chp_file(&path) {
            files.push(path);
            if files.len() >= limit {
                crate::log_warning!(
                    "Reached maximum file limit",
                    "files_found" => files.len(),
                    "limit" => limit
                );
                return Ok(false);
            }
        }
    }

    Ok(true)
}

fn is_chp_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

fn process_one(file_path: &Path, file_id: usize, config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        let outcome = pipeline::process_file_in_context(file_path, config);
        if let Err(error) = &outcome {
            crate::log_error!(error.error_code(), "File processing failed",
                "stage" => error.stage(),
                "error" => error
            );
        }
        outcome
    })
}

/// Process a directory of `.chp` files one after another
pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch processing",
        "directory" => dir_path.display()
    );

    let files = discover_chp_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            eprintln!(
                "Processing file {} of {}: {}",
                file_id + 1,
                files.len(),
                file_path.display()
            );
        }

        match process_one(file_path, file_id, &config.runtime) {
            Ok(result) => results.add_success(file_path.clone(), result),
            Err(error) => {
                results.add_failure(file_path.clone(), error);
                if config.fail_fast {
                    crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
                    break;
                }
            }
        }
    }

    results.processing_duration = start_time.elapsed();
    log_batch_complete("sequential", &results, 1);
    Ok(results)
}

/// Process files in parallel using worker threads
pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.effective_threads();

    crate::log_info!("Starting parallel batch processing",
        "directory" => dir_path.display(),
        "max_threads" => threads
    );

    let files = discover_chp_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    let chunk_size = calculate_chunk_size(files.len(), threads);

    crate::log_debug!("Parallel processing configuration",
        "total_files" => files.len(),
        "chunk_size" => chunk_size,
        "threads" => threads
    );

    for (chunk_idx, chunk) in files.chunks(chunk_size).enumerate() {
        let first_id = chunk_idx * chunk_size;
        results.merge(process_chunk_parallel(chunk, first_id, threads, &config.runtime)?);

        if config.fail_fast && results.failure_count() > 0 {
            crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.sort();
    results.processing_duration = start_time.elapsed();
    log_batch_complete("parallel", &results, threads);
    Ok(results)
}

fn process_chunk_parallel(
    files: &[PathBuf],
    first_id: usize,
    threads: usize,
    runtime: &RuntimeConfig,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let files_per_thread = files.len().div_ceil(threads);
    let mut handles = Vec::new();

    for (thread_idx, thread_files) in files.chunks(files_per_thread.max(1)).enumerate() {
        let thread_files = thread_files.to_vec();
        let results = Arc::clone(&results);
        let runtime = runtime.clone();
        let base_id = first_id + thread_idx * files_per_thread;

        let handle = thread::Builder::new()
            .name(format!("chespel-worker-{}", thread_idx))
            .spawn(move || {
                for (offset, file_path) in thread_files.into_iter().enumerate() {
                    let outcome = process_one(&file_path, base_id + offset, &runtime);
                    let mut guard = lock(&results);
                    match outcome {
                        Ok(result) => guard.add_success(file_path, result),
                        Err(error) => guard.add_failure(file_path, error),
                    }
                }
            })
            .map_err(|e| BatchError::ThreadError {
                message: e.to_string(),
            })?;
        handles.push(handle);
    }

    let mut panicked = 0;
    for handle in handles {
        if handle.join().is_err() {
            panicked += 1;
        }
    }
    if panicked > 0 {
        crate::log_error!(codes::pipeline::BATCH_WORKER_FAILURE, "Worker thread panicked",
            "workers" => panicked
        );
    }

    let collected = std::mem::take(&mut *lock(&results));
    Ok(collected)
}

/// Files per chunk, bounded to keep memory flat on large batches
fn calculate_chunk_size(file_count: usize, threads: usize) -> usize {
    const MAX_CHUNK_SIZE: usize = 50;
    file_count.div_ceil(threads.max(1)).clamp(1, MAX_CHUNK_SIZE)
}

fn log_batch_complete(mode: &str, results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::BATCH_COMPLETE,
        "Batch processing completed",
        "mode" => mode,
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Process a directory with default configuration
pub fn process_directory(dir_path: &Path) -> Result<BatchResults, BatchError> {
    process_directory_with_config(dir_path, &BatchConfig::default())
}

/// Process a directory with custom configuration
pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.effective_threads() == 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const VALID: &str = "module evaluation\nrule a:\n\tscore 1;\n";

    fn sample_dir() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.chp"), VALID).unwrap();
        fs::write(dir.path().join("b.chp"), "module search\nx\n").unwrap();
        fs::write(dir.path().join("notes.txt"), VALID).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.chp"), VALID).unwrap();
        dir
    }

    #[test]
    fn test_file_discovery() {
        let dir = sample_dir();

        let files = discover_chp_files(dir.path(), &BatchConfig::default()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().unwrap() == "chp"));

        let config = BatchConfig {
            recursive: false,
            ..Default::default()
        };
        assert_eq!(discover_chp_files(dir.path(), &config).unwrap().len(), 2);
    }

    #[test]
    fn test_file_limit() {
        let dir = sample_dir();
        let config = BatchConfig {
            max_files: Some(1),
            ..Default::default()
        };
        assert_eq!(discover_chp_files(dir.path(), &config).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_and_empty_directories() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            discover_chp_files(&dir.path().join("missing"), &BatchConfig::default()),
            Err(BatchError::DirectoryNotFound { .. })
        ));
        assert!(matches!(
            discover_chp_files(dir.path(), &BatchConfig::default()),
            Err(BatchError::NoFilesFound { .. })
        ));
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let dir = sample_dir();

        let sequential = BatchConfig {
            max_threads: 1,
            ..Default::default()
        };
        let parallel = BatchConfig {
            max_threads: 3,
            ..Default::default()
        };

        let seq = process_directory_with_config(dir.path(), &sequential).unwrap();
        let par = process_directory_with_config(dir.path(), &parallel).unwrap();

        for results in [&seq, &par] {
            assert_eq!(results.files_processed, 3);
            assert_eq!(results.success_count(), 2);
            assert_eq!(results.failure_count(), 1);
            assert!(results.failed_files[0].0.ends_with("b.chp"));
            assert!(matches!(
                results.failed_files[0].1,
                PipelineError::Preprocessing(_)
            ));
        }
        assert_eq!(seq.total_tokens(), par.total_tokens());
    }

    #[test]
    fn test_fail_fast() {
        let dir = sample_dir();
        let config = BatchConfig {
            max_threads: 1,
            fail_fast: true,
            ..Default::default()
        };
        let results = process_directory_with_config(dir.path(), &config).unwrap();
        assert_eq!(results.files_processed, 2);
        assert_eq!(results.failure_count(), 1);
    }

    #[test]
    fn test_chunk_size_calculation() {
        assert_eq!(calculate_chunk_size(100, 4), 25);
        assert_eq!(calculate_chunk_size(10, 4), 3);
        assert_eq!(calculate_chunk_size(1, 4), 1);
        assert_eq!(calculate_chunk_size(200, 4), 50);
        assert_eq!(calculate_chunk_size(0, 4), 1);
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert!(config.effective_threads() >= 1);
        assert!(config.effective_threads() <= MAX_WORKER_THREADS);
        assert!(config.recursive);
        assert!(!config.fail_fast);
        assert!(config.max_files.is_none());
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let mutex = Arc::new(Mutex::new(BatchResults::new()));
        let poisoner = Arc::clone(&mutex);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("worker failure");
        })
        .join();

        assert!(mutex.is_poisoned());
        assert_eq!(lock(&mutex).files_processed, 0);
    }
}
