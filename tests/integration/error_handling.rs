//! Errors as seen through the library API

use jay::frontend::CompileFailure;
use jay::middle::CompileError;
use jay::{compile, CompileOptions, RuntimeError};

#[test]
fn test_all_parse_errors_reported_at_once() {
    let source = "a <- (1 +\nb <- 2\nc <- ]\nd <- 4";
    let failure = compile("broken.jay", source, CompileOptions::default()).unwrap_err();
    let CompileFailure::Parse(errors) = &failure else {
        panic!("expected parse errors, got {:?}", failure);
    };
    assert!(errors.len() >= 2, "{:?}", errors);

    let diagnostics = failure.diagnostics();
    assert!(diagnostics.iter().all(|d| d.location.is_some()));
    assert!(diagnostics.iter().any(|d| d.location.as_ref().unwrap().line == 3));
}

#[test]
fn test_compile_error_is_not_a_parse_error() {
    let failure = compile("x.jay", "o <- [ f { await 1 } ]", CompileOptions::default()).unwrap_err();
    assert_eq!(failure, CompileFailure::Codegen(CompileError::AwaitOutsideAsync));
}

#[test]
fn test_run_errors_downcast() {
    let error = jay::run("3 frobnicate").unwrap_err();
    assert!(matches!(
        error.downcast_ref::<RuntimeError>(),
        Some(RuntimeError::DoesNotUnderstand { .. })
    ));

    let error = jay::run("(1").unwrap_err();
    assert!(error.downcast_ref::<CompileFailure>().is_some());
}

#[test]
fn test_run_file_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let error = jay::run_file(&dir.path().join("absent.jay")).unwrap_err();
    assert!(format!("{:#}", error).contains("Failed to read file"));
}

#[test]
fn test_run_file_returns_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("value.jay");
    std::fs::write(&path, "x <- 6\nx * 7").unwrap();
    let value = jay::run_file(&path).unwrap();
    assert_eq!(format!("{:?}", value), "42");
}

#[test]
fn test_runtime_error_diagnostics() {
    let error = jay::run("nowhere").unwrap_err();
    let error = error.downcast_ref::<RuntimeError>().unwrap();
    let diagnostic = error.diagnostic();
    assert_eq!(diagnostic.code, "E0301");
    assert!(diagnostic.message.contains("nowhere"));
}
