//! Command line behavior of the `chespel-lex` binary

use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chespel-lex"))
        .args(args)
        .env("CHESPEL_LOGGING_ENABLE_CONSOLE", "false")
        .output()
        .unwrap()
}

#[test]
fn tokens_are_listed_for_a_valid_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.chp");
    fs::write(&path, "module evaluation\nrule a:\n\tscore -5;\n").unwrap();

    let output = run(&[path.to_str().unwrap(), "--tokens", "--evaluation-only"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("keyword        \"rule\""));
    assert!(stdout.contains("number         \"-5\""));
}

#[test]
fn module_dump_and_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.chp");
    fs::write(&path, "module opening\ne4\nmodule evaluation\nscore 1;\n").unwrap();

    let dump = run(&[path.to_str().unwrap(), "--dump-modules"]);
    let stdout = String::from_utf8_lossy(&dump.stdout);
    let evaluation = stdout.find("module evaluation").unwrap();
    let opening = stdout.find("module opening").unwrap();
    assert!(evaluation < opening);

    let json = run(&[path.to_str().unwrap(), "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert_eq!(value["modules"][0]["name"], "evaluation");
    assert_eq!(value["modules"][0]["tokens"][0]["category"], "keyword");
}

#[test]
fn failure_exits_non_zero_with_diagnostics() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.chp");
    fs::write(&path, "module evaluation\nscore \"oops;\n").unwrap();

    let output = run(&[path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("error[E031]"));
    assert!(stderr.contains("1 error detected. The source has not been tokenized."));
    assert!(output.stdout.is_empty());
}

#[test]
fn directory_batch_reports_failures() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("good.chp"), "module evaluation\nscore 1;\n").unwrap();
    fs::write(dir.path().join("bad.chp"), "module search\nx\n").unwrap();

    let output = run(&[dir.path().to_str().unwrap(), "--sequential", "--quiet"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("2 files processed, 1 successful"));
}

#[test]
fn missing_input_prints_usage() {
    let output = run(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
}
