//! Integration tests for the `jay` binary

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command for the jay binary, isolated from user and project config
fn jay(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jay").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path())
        .env_remove("JAY_LOG");
    cmd
}

/// Helper function to create a test file
fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_run_file() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "hello.jay", "write: \"Hello, World!\"\nwrite: 1 + 2");

    jay(&dir)
        .arg("run")
        .arg(&file)
        .assert()
        .success()
        .stdout("Hello, World!\n3\n");
}

#[test]
fn test_bare_file_argument_runs_it() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "bare.jay", "write: 7");

    jay(&dir).arg(&file).assert().success().stdout("7\n");
}

#[test]
fn test_parse_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "bad.jay", "x <- (1 +\nwrite: x");

    jay(&dir)
        .arg("run")
        .arg(&file)
        .assert()
        .code(65)
        .stdout("")
        .stderr(predicate::str::contains("error[E0100]").and(predicate::str::contains("bad.jay:")));
}

#[test]
fn test_runtime_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "fail.jay", "write: 1\n3 frobnicate");

    jay(&dir)
        .arg(&file)
        .assert()
        .code(70)
        .stdout("1\n")
        .stderr(predicate::str::contains("does not understand 'frobnicate'"));
}

#[test]
fn test_runaway_recursion_is_reported() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "deep.jay", "o <- [ down: n { self down: n + 1 } ]\no down: 0");

    jay(&dir)
        .arg(&file)
        .assert()
        .code(70)
        .stderr(predicate::str::contains("E0308"));
}

#[test]
fn test_missing_file_exit_code() {
    let dir = TempDir::new().unwrap();

    jay(&dir)
        .arg("run")
        .arg(dir.path().join("nope.jay"))
        .assert()
        .code(74)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_check_does_not_run() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "ok.jay", "o <- [ f { 1 }, g { 2 } ]\nwrite: o f");

    jay(&dir)
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("ok (2 method(s))"));
}

#[test]
fn test_compile_prints_generated_code() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "gen.jay", "x <- 1\nx to-string");

    jay(&dir)
        .arg("compile")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("(function(){").and(predicate::str::contains("var $x;")));

    jay(&dir)
        .args(["compile", "--inline"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("ReturnExpr").not());
}

#[test]
fn test_ast_prints_grouping() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "tree.jay", "1 + 2 * 3");

    jay(&dir).arg("ast").arg(&file).assert().success().stdout("((1 + 2) * 3)\n");
}

#[test]
fn test_eval() {
    let dir = TempDir::new().unwrap();

    jay(&dir).args(["eval", "1 + 2"]).assert().success().stdout("3\n");
    jay(&dir).args(["eval", "write: \"hi\""]).assert().success().stdout("hi\n");
}

#[test]
fn test_json_error_format() {
    let dir = TempDir::new().unwrap();
    let output = jay(&dir)
        .args(["--error-format", "json", "eval", "1 + )"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(65));
    let report: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(report[0]["code"], "E0100");
    assert_eq!(report[0]["severity"], "error");
}

#[test]
fn test_project_config_sets_error_format() {
    let dir = TempDir::new().unwrap();
    create_test_file(&dir, "jay.toml", "[diagnostics]\nformat = \"json\"\n");

    jay(&dir)
        .args(["eval", "nowhere"])
        .assert()
        .code(70)
        .stderr(predicate::str::contains("\"code\": \"E0301\""));
}

#[test]
fn test_repl_reads_stdin() {
    let dir = TempDir::new().unwrap();

    jay(&dir)
        .arg("repl")
        .write_stdin("x <- 2\nx * 21\no <- [\n  v <- 5\n]\no v\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("42").and(predicate::str::contains("5")));
}
