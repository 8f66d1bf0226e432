//! Lexer module
//!
//! Pull-based: the parser asks for one token at a time.

pub mod tokenizer;
pub mod tokens;

pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

/// Start lexing `source`; tokens are produced lazily, ending with one `Eof`
pub fn tokenize(
    path: &str,
    source: &str,
) -> Lexer {
    tracing::debug!("lexing {} ({} bytes)", path, source.len());
    Lexer::new(path, source)
}

/// Log a token for debugging
pub(crate) fn log_token(token: &Token) {
    match token.kind {
        TokenKind::Error => tracing::debug!("lex error at {}: {}", token.location(), token.text),
        kind => tracing::trace!("token {} {:?}", kind, token.text),
    }
}

#[cfg(test)]
mod tests;
