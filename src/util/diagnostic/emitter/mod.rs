//! Diagnostic renderers

pub mod json;
pub mod text;

pub use json::JsonEmitter;
pub use text::{EmitterConfig, TextEmitter};

use crate::util::diagnostic::Diagnostic;
use crate::util::span::SourceFile;

/// Renders a batch of diagnostics against the file they refer to
pub trait DiagnosticEmitter {
    fn emit(
        &self,
        diagnostics: &[Diagnostic],
        source: Option<&SourceFile>,
    ) -> String;
}
