//! Lexer tests module
//!
//! - basic: token classes and reserved words
//! - layout: newline filtering
//! - literals: numbers and strings
//! - comments: line and nested block comments

mod layout;

use super::{tokenize, Token, TokenKind};

/// Tokens up to (not including) Eof
pub(super) fn lex(source: &str) -> Vec<Token> {
    tokenize("test.jay", source)
        .take_while(|t| t.kind != TokenKind::Eof)
        .collect()
}

pub(super) fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).into_iter().map(|t| t.kind).collect()
}

pub(super) fn texts(source: &str) -> Vec<String> {
    lex(source).into_iter().map(|t| t.text).collect()
}
