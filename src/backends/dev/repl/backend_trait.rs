//! REPL Backend Trait
//!
//! Defines the abstract interface for REPL backends.

use crate::runtime::Value;

/// Evaluation result
#[derive(Debug)]
pub enum EvalResult {
    /// Evaluation produced a value
    Value(Value),
    /// Evaluation produced `nil`
    Ok,
    /// Compilation or evaluation failed; the text is ready to print
    Error(String),
    /// More input needed (an open bracket or string)
    Incomplete,
}

/// REPL Backend Trait
///
/// What a line editor needs from an evaluator.
pub trait ReplBackend {
    /// Evaluate one complete input
    fn eval(
        &mut self,
        code: &str,
    ) -> EvalResult;

    /// Generated code of the last successful compile, when code display is on
    fn generated_code(&self) -> Option<&str>;

    /// Flip code display and return the new setting
    fn toggle_code(&mut self) -> bool;

    /// Drop all state and start over with a fresh environment
    fn reset(&mut self);
}
