//! Parser tests module
//!
//! - precedence: the expression ladder and its tie-breaks
//! - literals: objects, arrays, blocks and defines
//! - recovery: error reporting and multi-error passes
//! - print: pretty printer output
//! - fuzz: property tests

mod literals;
mod precedence;
mod print;

use super::{parse_source, Expr, ParseError};

/// Parse and assert there were no errors
pub(super) fn parse_ok(source: &str) -> Expr {
    let (expr, errors) = parse_source("test.jay", source);
    assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
    expr
}

pub(super) fn parse_errors(source: &str) -> Vec<ParseError> {
    parse_source("test.jay", source).1
}

pub(super) fn num(value: f64) -> Expr {
    Expr::Number(value)
}

pub(super) fn send(
    receiver: Expr,
    name: &str,
    args: Vec<Expr>,
) -> Expr {
    Expr::message(Some(receiver), name, args)
}
