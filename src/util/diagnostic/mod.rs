//! Diagnostics: structured, located error reports and their renderers

pub mod emitter;
pub mod error;

pub use emitter::{DiagnosticEmitter, EmitterConfig, JsonEmitter, TextEmitter};
pub use error::{Diagnostic, Severity};

use serde::{Deserialize, Serialize};

/// How diagnostics are printed by the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorFormat {
    /// Human readable text with source snippets
    #[default]
    Text,
    /// One JSON array per report
    Json,
}
