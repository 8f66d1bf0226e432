//! Runtime tests
//!
//! - dispatch: prototype chains, fields, binds and bridging
//! - limits: call depth and printing bounds
//! - returns: non-local return and method frames
//! - scopes: assignment forms and variable lookup
//! - primitives: the native tables
//! - promises: async blocks, await and timers

mod dispatch;

use super::{Runtime, RuntimeError, SharedOutput, Value};
use crate::frontend::{compile, CompileOptions};

/// Compile and run `source` as a whole program
pub(super) fn run(source: &str) -> Result<Value, RuntimeError> {
    run_with_output(source).0
}

pub(super) fn run_with_output(source: &str) -> (Result<Value, RuntimeError>, String) {
    let output = SharedOutput::new();
    let mut runtime = Runtime::with_output(Box::new(output.clone()));
    let result = eval_in(&mut runtime, source, CompileOptions::default());
    (result, output.contents())
}

pub(super) fn eval_in(
    runtime: &mut Runtime,
    source: &str,
    options: CompileOptions,
) -> Result<Value, RuntimeError> {
    let program = compile("test.jay", source, options).expect("compile failed");
    runtime.execute(&program)
}

/// Value of a program that must succeed, as printed
pub(super) fn show(source: &str) -> String {
    match run(source) {
        Ok(value) => format!("{:?}", value),
        Err(error) => panic!("runtime error for {:?}: {}", source, error),
    }
}
