//! Tokenizer implementation
//!
//! Two layers: [`Lexer::next_token_raw`] turns characters into tokens, and
//! [`Lexer::next_token`] applies layout rules so that newlines only separate
//! expressions where an expression can actually end.

use std::sync::Arc;

use super::tokens::{LexError, Token, TokenKind};
use crate::util::span::{SourceFile, Span};

/// Main lexer structure
pub struct Lexer {
    file: Arc<SourceFile>,
    pos: usize,
    start: usize,
    eat_newlines: bool,
    finished: bool,
}

#[inline]
fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_operator(c: char) -> bool {
    "-+=/<>?~!%^&*".contains(c)
}

#[inline]
fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
fn is_identifier(c: char) -> bool {
    is_alpha(c) || is_operator(c) || is_digit(c)
}

#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

impl Lexer {
    /// Create a new lexer for the given source
    pub fn new(
        path: &str,
        source: &str,
    ) -> Self {
        Self::from_file(Arc::new(SourceFile::new(path, source)))
    }

    pub fn from_file(file: Arc<SourceFile>) -> Self {
        Self {
            file,
            pos: 0,
            start: 0,
            eat_newlines: true,
            finished: false,
        }
    }

    /// Shared handle to the file being lexed
    pub fn file(&self) -> Arc<SourceFile> {
        Arc::clone(&self.file)
    }

    fn current(&self) -> Option<char> {
        self.file.content[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.file.content[self.pos..].chars().nth(1)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(
        &mut self,
        condition: impl Fn(char) -> bool,
    ) {
        while self.current().is_some_and(&condition) {
            self.advance();
        }
    }

    /// Next token with layout applied: a newline (or `,`) is dropped while
    /// the previous token cannot end an expression.
    pub fn next_token(&mut self) -> Token {
        loop {
            let token = self.next_token_raw();

            match token.kind {
                TokenKind::Comma => {
                    if self.eat_newlines {
                        continue;
                    }
                    self.eat_newlines = true;
                }
                TokenKind::IgnoreLine => {
                    self.eat_newlines = true;
                    continue;
                }
                TokenKind::Eof => {}
                kind => self.eat_newlines = kind.continues_expression(),
            }

            return token;
        }
    }

    /// Next token straight from the source, newlines included
    pub fn next_token_raw(&mut self) -> Token {
        loop {
            self.start = self.pos;
            let Some(c) = self.current() else {
                return self.make_token(TokenKind::Eof);
            };

            match c {
                '(' => return self.single_token(TokenKind::LeftParen),
                ')' => return self.single_token(TokenKind::RightParen),
                '[' => return self.single_token(TokenKind::LeftBracket),
                ']' => return self.single_token(TokenKind::RightBracket),
                '{' => return self.single_token(TokenKind::LeftBrace),
                '}' => return self.single_token(TokenKind::RightBrace),
                ',' | '\n' => return self.single_token(TokenKind::Comma),
                '\\' => return self.single_token(TokenKind::IgnoreLine),
                ';' => return self.single_token(TokenKind::Semicolon),
                '.' => return self.single_token(TokenKind::Dot),
                '|' => return self.single_token(TokenKind::Pipe),
                '#' => return self.single_token(TokenKind::Hash),
                '"' => return self.read_string(),

                '/' if self.peek_next() == Some('/') => {
                    // The newline itself is left for the next call.
                    self.advance_while(|c| c != '\n');
                    return self.make_token(TokenKind::Comma);
                }
                '/' if self.peek_next() == Some('*') => {
                    if let Err(error) = self.skip_block_comment() {
                        return self.error_token(error);
                    }
                }

                ':' => {
                    self.advance();
                    if self.current() == Some(':') {
                        self.advance();
                        return self.make_token(TokenKind::Bind);
                    }
                    return self.make_token(TokenKind::Keyword);
                }

                '-' if self.peek_next().is_some_and(is_digit) => {
                    self.advance();
                    return self.read_number();
                }

                c if is_whitespace(c) => self.advance_while(is_whitespace),
                c if is_alpha(c) => return self.read_name(),
                c if is_operator(c) => return self.read_operator(),
                c if is_digit(c) => return self.read_number(),

                other => {
                    self.advance();
                    return self.error_token(LexError::UnexpectedCharacter(other));
                }
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        self.advance();
        self.advance();

        let mut depth = 1usize;
        while depth > 0 {
            match (self.current(), self.peek_next()) {
                (None, _) => return Err(LexError::UnterminatedComment),
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    depth += 1;
                }
                (Some('*'), Some('/')) => {
                    self.advance();
                    self.advance();
                    depth -= 1;
                }
                _ => {
                    self.advance();
                }
            }
        }

        Ok(())
    }

    /// A trailing `:` turns a name or operator into a keyword, unless it
    /// starts a `::`.
    fn take_keyword_colon(&mut self) -> bool {
        if self.current() == Some(':') && self.peek_next() != Some(':') {
            self.advance();
            true
        } else {
            false
        }
    }

    fn read_name(&mut self) -> Token {
        self.advance_while(is_identifier);

        let kind = if self.take_keyword_colon() {
            TokenKind::Keyword
        } else {
            TokenKind::Name
        };
        self.make_token(kind)
    }

    fn read_operator(&mut self) -> Token {
        let mut kind = TokenKind::Operator;

        while let Some(c) = self.current() {
            if is_alpha(c) {
                kind = TokenKind::Name;
            } else if !is_operator(c) {
                break;
            }
            self.advance();
        }

        if self.take_keyword_colon() {
            kind = TokenKind::Keyword;
        }
        self.make_token(kind)
    }

    fn read_number(&mut self) -> Token {
        self.advance_while(is_digit);
        self.make_token(TokenKind::Number)
    }

    fn read_string(&mut self) -> Token {
        self.advance();

        let mut text = String::new();
        loop {
            let Some(c) = self.advance() else {
                return self.error_token(LexError::UnterminatedString);
            };

            match c {
                '"' => return Token::new(TokenKind::String, text, self.span()),
                '\\' => {
                    let Some(escape) = self.advance() else {
                        return self.error_token(LexError::UnterminatedEscape);
                    };
                    match escape {
                        'n' => text.push('\n'),
                        '"' => text.push('"'),
                        '\\' => text.push('\\'),
                        't' => text.push('\t'),
                        other => return self.error_token(LexError::UnrecognizedEscape(other)),
                    }
                }
                c => text.push(c),
            }
        }
    }

    fn single_token(
        &mut self,
        kind: TokenKind,
    ) -> Token {
        self.advance();
        self.make_token(kind)
    }

    fn span(&self) -> Span {
        Span::new(Arc::clone(&self.file), self.start, self.pos)
    }

    fn error_token(
        &self,
        error: LexError,
    ) -> Token {
        Token::new(TokenKind::Error, error.to_string(), self.span())
    }

    /// Build a token from the current lexeme, promoting reserved spellings
    fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        let text = &self.file.content[self.start..self.pos];
        let kind = match (kind, text) {
            (TokenKind::Operator, "<-") => TokenKind::Arrow,
            (TokenKind::Operator, "<--") => TokenKind::LongArrow,
            (TokenKind::Name, "self") => TokenKind::SelfKw,
            (TokenKind::Name, "undefined") => TokenKind::Undefined,
            (TokenKind::Name, "return") => TokenKind::Return,
            (TokenKind::Name, "async") => TokenKind::Async,
            (TokenKind::Name, "await") => TokenKind::Await,
            (kind, _) => kind,
        };
        Token::new(kind, text, self.span())
    }
}

/// Yields every token up to and including a single `Eof`
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}
