//! Parser state and error handling

use std::collections::VecDeque;

use thiserror::Error;

use crate::frontend::lexer::{log_token, Lexer, Token, TokenKind};
use crate::util::span::Location;

/// A located syntax error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: Location,
    /// The token the parser was looking at when it gave up
    pub found: TokenKind,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        token: &Token,
    ) -> Self {
        Self {
            message: message.into(),
            location: token.location(),
            found: token.kind,
        }
    }

    /// Raised because the input ran out, e.g. an unclosed bracket
    pub fn at_end_of_input(&self) -> bool {
        self.found == TokenKind::Eof
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting of brackets, blocks and chained assignments
pub const MAX_NESTING: usize = 128;

/// Token lookahead queue filled on demand from the lexer, plus the list of
/// errors reported so far.
pub struct ParserState {
    lexer: Lexer,
    lookahead: VecDeque<Token>,
    errors: Vec<ParseError>,
    cascades: usize,
    depth: usize,
    /// Set once nesting overflowed; later errors are only its echoes
    gave_up: bool,
}

impl ParserState {
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            lookahead: VecDeque::with_capacity(2),
            errors: Vec::new(),
            cascades: 0,
            depth: 0,
            gave_up: false,
        }
    }

    fn fill(
        &mut self,
        count: usize,
    ) {
        while self.lookahead.len() < count {
            let token = self.lexer.next_token();
            log_token(&token);
            self.lookahead.push_back(token);
        }
    }

    pub fn current(&mut self) -> &Token {
        self.fill(1);
        &self.lookahead[0]
    }

    pub fn peek_kind(
        &mut self,
        n: usize,
    ) -> TokenKind {
        self.fill(n + 1);
        self.lookahead[n].kind
    }

    pub fn at(
        &mut self,
        kind: TokenKind,
    ) -> bool {
        self.peek_kind(0) == kind
    }

    pub fn at2(
        &mut self,
        first: TokenKind,
        second: TokenKind,
    ) -> bool {
        self.at(first) && self.peek_kind(1) == second
    }

    /// Whether the current token ends the surrounding group
    pub fn at_group_end(&mut self) -> bool {
        let kind = self.peek_kind(0);
        kind.is_closer() || kind == TokenKind::Eof
    }

    pub fn bump(&mut self) -> Token {
        self.fill(1);
        match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.lexer.next_token(),
        }
    }

    pub fn skip(
        &mut self,
        kind: TokenKind,
    ) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Take the next token, failing with `message` if it is not `kind`.
    /// The token is consumed either way.
    pub fn consume(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> ParseResult<Token> {
        let token = self.bump();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(message, &token))
        }
    }

    /// Build an error for `token`; lexer error tokens report their own message
    pub fn unexpected(
        &self,
        message: &str,
        token: &Token,
    ) -> ParseError {
        if token.kind == TokenKind::Error {
            ParseError::new(token.text.clone(), token)
        } else {
            ParseError::new(message, token)
        }
    }

    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        if self.gave_up {
            return;
        }
        tracing::debug!("parse error: {}", error);
        self.errors.push(error);
    }

    /// Run `parse` one nesting level deeper. Past `MAX_NESTING` the rest of
    /// the input is skipped and reported as a single error.
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            let token = self.current().clone();
            let error = ParseError::new(format!("Expression nested too deeply (limit {}).", MAX_NESTING), &token);
            self.error(error.clone());
            self.gave_up = true;
            while !self.at(TokenKind::Eof) {
                self.bump();
            }
            return Err(error);
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Hidden local holding a cascade receiver. `#` cannot start a name in
    /// source, so these never collide with user variables.
    pub fn fresh_cascade_name(&mut self) -> String {
        let name = format!("#cascade{}", self.cascades);
        self.cascades += 1;
        name
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }
}
