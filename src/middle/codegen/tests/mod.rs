//! Code generation tests
//!
//! - mangle: identifier rewriting
//! - lowering: locals, properties, assignments and compile errors
//! - returns: method ids and non-local return targets
//! - emit: rendered source text

mod emit;
mod lowering;

use super::{compile, CompileError, Program};
use crate::frontend::parser::parse_source;

pub(super) fn program(source: &str) -> Program {
    compile_source(source, false).expect("compile failed")
}

pub(super) fn inline(source: &str) -> Program {
    compile_source(source, true).expect("compile failed")
}

pub(super) fn compile_source(
    source: &str,
    inline: bool,
) -> Result<Program, CompileError> {
    let (expr, errors) = parse_source("test.jay", source);
    assert!(errors.is_empty(), "parse errors: {:?}", errors);
    compile(&expr, inline)
}
