use chespel_lexer::batch::{self, BatchConfig};
use chespel_lexer::config::RuntimeConfig;
use chespel_lexer::logging::{self, service, LoggingService};
use chespel_lexer::pipeline::{self, PipelineOutput, PipelineResult};
use chespel_lexer::reporter::ErrorReporter;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

/// Command line options
#[derive(Debug, Default)]
struct CliOptions {
    input: Option<PathBuf>,
    help: bool,
    dump_modules: bool,
    tokens: bool,
    json: bool,
    normalize: bool,
    evaluation_only: bool,
    config_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
    batch: BatchConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("chespel-lex");
    let options = parse_args(&args[1.min(args.len())..]);

    if options.help {
        print_help(program);
        return Ok(());
    }

    let Some(input_path) = options.input.clone() else {
        eprintln!("Usage: {} <input.chp|directory> [options]", program);
        eprintln!("       {} --help", program);
        process::exit(1);
    };

    let runtime = load_runtime_config(&options)?;
    init_logging(&runtime, options.log_file.as_deref())?;
    pipeline::validate_pipeline()?;

    if input_path.is_file() {
        process_single_file(&input_path, &runtime, &options);
    } else if input_path.is_dir() {
        let mut batch_config = options.batch.clone();
        batch_config.runtime = runtime;
        process_directory_batch(&input_path, &batch_config, &options);
    } else {
        eprintln!("Error: Input must be a .chp file or a directory");
        eprintln!("  Path: {}", input_path.display());
        process::exit(1);
    }

    Ok(())
}

fn load_runtime_config(options: &CliOptions) -> Result<RuntimeConfig, Box<dyn std::error::Error>> {
    let mut runtime = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };

    if options.normalize {
        runtime.preprocessing.normalize_evaluation = true;
    }
    if options.evaluation_only {
        runtime.lexical.scan_all_modules = false;
    }

    Ok(runtime)
}

fn init_logging(runtime: &RuntimeConfig, log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    logging::config::init_runtime_preferences(runtime.logging.clone())?;

    match log_file {
        Some(path) => {
            let min_level = logging::config::get_min_log_level();
            let multi = service::create_configured_multi_logger().with_file(
                path,
                min_level,
                logging::config::use_structured_logging(),
            )?;
            let service = LoggingService::new(Arc::new(multi), min_level);
            logging::init_global_logging_with_service(Arc::new(service))?;
        }
        None => logging::init_global_logging()?,
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("Chespel Lexer v{}", env!("CARGO_PKG_VERSION"));
    println!("Preprocessing and tokenization for Chespel evaluation rules");
    println!();
    println!("USAGE:");
    println!("    {} <input.chp> [options]          # Process single file", program_name);
    println!("    {} <directory> [options]          # Process directory", program_name);
    println!();
    println!("OUTPUT OPTIONS:");
    println!("    --dump-modules      Print every module body between separators");
    println!("    --tokens            Print the (category, text) token list");
    println!("    --json              Print tokens as JSON");
    println!();
    println!("PIPELINE OPTIONS:");
    println!("    --normalize         Check tab indentation and join continuation lines in 'evaluation'");
    println!("    --evaluation-only   Tokenize only the 'evaluation' module");
    println!("    --config FILE       Load runtime preferences from a TOML file");
    println!("    --log-file FILE     Also write log events to FILE");
    println!();
    println!("BATCH OPTIONS:");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop on first failing file");
    println!("    --quiet             Suppress progress reporting");
    println!("    --help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    {} rules.chp --tokens", program_name);
    println!("    {} rules.chp --dump-modules --normalize", program_name);
    println!("    {} engines/ --threads 4 --fail-fast", program_name);
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
}

fn parse_number(args: &[String], i: usize, option: &str) -> Option<usize> {
    match args.get(i + 1) {
        Some(value) => match value.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                eprintln!("Warning: Invalid value '{}' for {}, ignoring", value, option);
                None
            }
        },
        None => {
            eprintln!("Warning: {} requires a number", option);
            None
        }
    }
}

fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        batch: BatchConfig {
            progress_reporting: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--dump-modules" => options.dump_modules = true,
            "--tokens" => options.tokens = true,
            "--json" => options.json = true,
            "--normalize" => options.normalize = true,
            "--evaluation-only" => options.evaluation_only = true,
            "--config" | "--log-file" => {
                match args.get(i + 1) {
                    Some(path) => {
                        let path = Some(PathBuf::from(path));
                        if args[i] == "--config" {
                            options.config_path = path;
                        } else {
                            options.log_file = path;
                        }
                    }
                    None => eprintln!("Warning: {} requires a path", args[i]),
                }
                i += 1;
            }
            "--sequential" => options.batch.max_threads = 1,
            "--threads" => {
                if let Some(threads) = parse_number(args, i, "--threads") {
                    options.batch.max_threads = threads.max(1);
                }
                i += 1;
            }
            "--no-recursive" => options.batch.recursive = false,
            "--max-files" => {
                if let Some(max_files) = parse_number(args, i, "--max-files") {
                    options.batch.max_files = Some(max_files);
                }
                i += 1;
            }
            "--fail-fast" => options.batch.fail_fast = true,
            "--quiet" => options.batch.progress_reporting = false,
            arg if arg.starts_with("--") => eprintln!("Warning: Unknown option '{}'", arg),
            arg => {
                if options.input.is_some() {
                    eprintln!("Warning: Extra input '{}' ignored", arg);
                } else {
                    options.input = Some(PathBuf::from(arg));
                }
            }
        }
        i += 1;
    }

    options
}

fn print_result(label: &str, result: &PipelineResult, options: &CliOptions) {
    if options.json {
        match PipelineOutput::new(Some(label.to_string()), result).to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: cannot serialize tokens: {}", e),
        }
        return;
    }

    if options.dump_modules {
        print!("{}", pipeline::format_module_dump(&result.preprocessed.modules));
    }
    if options.tokens {
        print!("{}", pipeline::format_token_listing(result));
    }
    if !options.dump_modules && !options.tokens {
        let modules: Vec<String> = result
            .modules
            .iter()
            .map(|m| format!("{} ({} tokens)", m.name, m.tokens.len()))
            .collect();
        println!("{}: ok, {}", label, modules.join(", "));
    }
}

fn process_single_file(file_path: &Path, runtime: &RuntimeConfig, options: &CliOptions) {
    let label = file_path.display().to_string();

    match pipeline::process_file_with_config(file_path, runtime) {
        Ok(result) => print_result(&label, &result, options),
        Err(error) => {
            // Excerpts are best-effort; the file may be unreadable
            let source = fs::read_to_string(file_path).ok();
            let mut reporter = ErrorReporter::new(label);
            if let Some(source) = source.as_deref() {
                reporter = reporter.with_source(source);
            }
            eprint!("{}", reporter.report(&error));
            process::exit(1);
        }
    }
}

fn process_directory_batch(dir_path: &Path, config: &BatchConfig, options: &CliOptions) {
    if config.progress_reporting {
        eprintln!("Starting batch processing: {}", dir_path.display());
        eprintln!(
            "Configuration: {} threads, recursive={}, fail_fast={}",
            config.effective_threads(),
            config.recursive,
            config.fail_fast
        );
    }

    match batch::process_directory_with_config(dir_path, config) {
        Ok(results) => {
            for (path, result) in &results.successful_files {
                if options.json || options.dump_modules || options.tokens {
                    print_result(&path.display().to_string(), result, options);
                }
            }

            logging::print_cargo_style_summary();
            eprintln!("{}", results.summary());

            if results.failure_count() > 0 {
                process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("Batch processing failed: {}", error);
            logging::print_cargo_style_summary();
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_output_options() {
        let options = parse_args(&args(&[
            "rules.chp",
            "--tokens",
            "--dump-modules",
            "--normalize",
            "--evaluation-only",
            "--config",
            "chespel.toml",
        ]));

        assert_eq!(options.input, Some(PathBuf::from("rules.chp")));
        assert!(options.tokens && options.dump_modules);
        assert!(options.normalize && options.evaluation_only);
        assert_eq!(options.config_path, Some(PathBuf::from("chespel.toml")));
        assert!(!options.json);
    }

    #[test]
    fn test_parse_batch_options() {
        let options = parse_args(&args(&[
            "engines/",
            "--threads",
            "4",
            "--fail-fast",
            "--no-recursive",
            "--max-files",
            "7",
            "--quiet",
        ]));

        assert_eq!(options.batch.max_threads, 4);
        assert!(options.batch.fail_fast);
        assert!(!options.batch.recursive);
        assert_eq!(options.batch.max_files, Some(7));
        assert!(!options.batch.progress_reporting);
    }

    #[test]
    fn test_parse_options_invalid() {
        let options = parse_args(&args(&["--threads", "many", "--unknown-option"]));
        assert_ne!(options.batch.max_threads, 0);
        assert!(options.input.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let options = parse_args(&args(&["rules.chp", "--normalize", "--evaluation-only"]));
        let runtime = load_runtime_config(&options).unwrap();
        assert!(runtime.preprocessing.normalize_evaluation);
        assert!(!runtime.lexical.scan_all_modules);
    }
}
