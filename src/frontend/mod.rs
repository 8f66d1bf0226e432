//! Frontend compilation pipeline
//!
//! Source text goes through the lexer and parser here and is handed to the
//! code generator in `middle`. Parse errors are collected, not raised, so a
//! failed compile reports every independent problem at once.

use thiserror::Error;
use tracing::debug;

use crate::middle::codegen::{self, CompileError, Program};
use crate::util::diagnostic::Diagnostic;

pub mod lexer;
pub mod parser;

pub use parser::ParseError;

/// Options for one compile call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit a bare statement list for an interactive session instead of a
    /// self-contained program
    pub inline: bool,
}

impl CompileOptions {
    pub fn inline() -> Self {
        Self { inline: true }
    }
}

/// Why a compile produced no program
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileFailure {
    #[error("{}", render_parse_errors(.0))]
    Parse(Vec<ParseError>),

    #[error(transparent)]
    Codegen(#[from] CompileError),
}

fn render_parse_errors(errors: &[ParseError]) -> String {
    errors.iter().map(ParseError::to_string).collect::<Vec<_>>().join("\n")
}

impl CompileFailure {
    /// Structured reports for the diagnostic emitters
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            CompileFailure::Parse(errors) => errors
                .iter()
                .map(|error| {
                    let code = if error.found == lexer::TokenKind::Error { "E0001" } else { "E0100" };
                    let diagnostic = Diagnostic::error(code, error.message.clone()).at(error.location.clone());
                    if error.at_end_of_input() {
                        diagnostic.with_help("the input ended early; check for an unclosed bracket or string")
                    } else {
                        diagnostic
                    }
                })
                .collect(),
            CompileFailure::Codegen(error) => vec![Diagnostic::error("E0200", error.to_string())],
        }
    }

    /// Whether more input could complete the source: every error is the
    /// input running out, inside a group or an open string or comment
    pub fn is_incomplete(&self) -> bool {
        match self {
            CompileFailure::Parse(errors) => !errors.is_empty() && errors.iter().all(runs_off_the_end),
            CompileFailure::Codegen(_) => false,
        }
    }
}

fn runs_off_the_end(error: &ParseError) -> bool {
    if error.at_end_of_input() {
        return true;
    }
    let open = [
        lexer::LexError::UnterminatedString,
        lexer::LexError::UnterminatedEscape,
        lexer::LexError::UnterminatedComment,
    ];
    error.found == lexer::TokenKind::Error && open.iter().any(|lex| error.message == lex.to_string())
}

/// Compile `source` (named `path` in diagnostics) into a program
pub fn compile(
    path: &str,
    source: &str,
    options: CompileOptions,
) -> Result<Program, CompileFailure> {
    debug!("compiling {} ({} bytes)", path, source.len());

    let (expr, errors) = parser::parse(lexer::tokenize(path, source));
    if !errors.is_empty() {
        debug!("{} parse error(s) in {}", errors.len(), path);
        return Err(CompileFailure::Parse(errors));
    }

    Ok(codegen::compile(&expr, options.inline)?)
}
