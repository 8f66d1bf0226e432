//! Recursive-descent parser
//!
//! The parser pulls tokens from the lexer through a small lookahead queue
//! and never stops at the first error: a failed production becomes an
//! `Expr::Error` node and parsing carries on, so one pass reports every
//! independent problem.

pub mod ast;
mod defines;
mod expressions;
pub mod parser_state;
mod primary;
pub mod print;

pub use ast::{selector_arity, Block, Define, Expr};
pub use parser_state::{ParseError, ParseResult, ParserState, MAX_NESTING};

use crate::frontend::lexer::{tokenize, Lexer, TokenKind};

impl ParserState {
    /// Parse the whole input. Junk after a complete expression is reported
    /// and skipped, then parsing resumes with the next expression.
    pub fn parse_program(&mut self) -> Expr {
        let mut exprs = Vec::new();

        loop {
            while self.skip(TokenKind::Comma).is_some() {}
            if self.at(TokenKind::Eof) {
                break;
            }

            // Top-level expressions recover one at a time so an error
            // does not swallow its neighbours.
            let result = self.bind();
            match self.recover(result) {
                Expr::Sequence(items) => exprs.extend(items),
                expr => exprs.push(expr),
            }

            if self.at(TokenKind::Eof) {
                break;
            }
            // A failed expression leaves its separator behind.
            if self.at(TokenKind::Comma) {
                continue;
            }
            let token = self.bump();
            let error = self.unexpected("Expect end of input.", &token);
            self.error(error);
        }

        Expr::sequence(exprs)
    }
}

/// Parse a token stream into one top-level expression plus every error found
pub fn parse(lexer: Lexer) -> (Expr, Vec<ParseError>) {
    let mut state = ParserState::new(lexer);
    let expr = state.parse_program();
    let errors = state.take_errors();
    tracing::debug!("parsed with {} error(s)", errors.len());
    (expr, errors)
}

/// Lex and parse `source` in one go
pub fn parse_source(
    path: &str,
    source: &str,
) -> (Expr, Vec<ParseError>) {
    parse(tokenize(path, source))
}

#[cfg(test)]
mod tests;
