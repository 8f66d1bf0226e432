//! Runtime errors and control transfer
//!
//! Evaluation returns `ExecResult`. Besides ordinary errors, the `Err` side
//! carries non-local returns: a `return` inside a block unwinds through
//! every intermediate call until the method activation it names catches it.

use thiserror::Error;

use super::scope::FrameToken;
use super::value::Value;
use crate::util::diagnostic::Diagnostic;

/// Runtime errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("{receiver} does not understand '{selector}'")]
    DoesNotUnderstand { receiver: String, selector: String },

    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("Cannot assign to '{0}' with '<--': no enclosing binding")]
    UnboundAssignment(String),

    #[error("Cannot bind members onto {0}")]
    BindTarget(String),

    #[error("Cannot store field '{field}' on {receiver}")]
    FieldOnPrimitive { receiver: String, field: String },

    #[error("Parent must be an object, got {0}")]
    InvalidParent(String),

    #[error("Cannot return from a method that has already returned")]
    StrayReturn,

    #[error("Cannot return out of an async block")]
    AsyncReturn,

    #[error("Stack overflow: more than {0} nested calls")]
    StackOverflow(usize),

    #[error("Index {index} is out of range (arrays hold at most {limit} elements)")]
    IndexOutOfRange { index: String, limit: usize },

    #[error("Awaited a promise whose task is still running")]
    AwaitRunning,

    #[error("Expected {expected}, got {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("{0} is not callable")]
    NotCallable(String),

    #[error("Promise rejected: {0}")]
    Rejected(String),

    #[error("Output error: {0}")]
    Io(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl RuntimeError {
    pub fn type_mismatch(
        expected: &'static str,
        found: &Value,
    ) -> Self {
        RuntimeError::TypeMismatch {
            expected,
            found: found.to_string(),
        }
    }

    /// Stable diagnostic code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            RuntimeError::DoesNotUnderstand { .. } => "E0300",
            RuntimeError::UndefinedVariable(_) => "E0301",
            RuntimeError::UnboundAssignment(_) => "E0302",
            RuntimeError::BindTarget(_) | RuntimeError::InvalidParent(_) => "E0303",
            RuntimeError::FieldOnPrimitive { .. } => "E0304",
            RuntimeError::StrayReturn | RuntimeError::AsyncReturn => "E0305",
            RuntimeError::TypeMismatch { .. } | RuntimeError::NotCallable(_) => "E0306",
            RuntimeError::Rejected(_) | RuntimeError::AwaitRunning => "E0307",
            RuntimeError::StackOverflow(_) => "E0308",
            RuntimeError::IndexOutOfRange { .. } => "E0309",
            RuntimeError::Io(_) | RuntimeError::Scheduler(_) => "E0399",
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code(), self.to_string())
    }
}

/// Why evaluation stopped early
#[derive(Debug, Clone)]
pub enum Unwind {
    /// Non-local return headed for the method activation holding `token`
    Return { value: Value, token: FrameToken },
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

pub type ExecResult<T> = Result<T, Unwind>;
