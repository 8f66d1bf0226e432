//! JSON diagnostic renderer

use serde_json::to_string_pretty;

use super::DiagnosticEmitter;
use crate::util::diagnostic::Diagnostic;
use crate::util::span::SourceFile;

/// Renders diagnostics as a JSON array for tooling
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn render_all(diagnostics: &[Diagnostic]) -> String {
        to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string())
    }
}

impl DiagnosticEmitter for JsonEmitter {
    fn emit(
        &self,
        diagnostics: &[Diagnostic],
        _source: Option<&SourceFile>,
    ) -> String {
        Self::render_all(diagnostics)
    }
}
