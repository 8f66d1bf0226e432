//! Token definitions

use std::fmt;

use thiserror::Error;

use crate::util::span::{Location, Span};

/// Lexical problems. They never abort lexing: each one becomes an
/// [`TokenKind::Error`] token whose text is the rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Unterminated string escape")]
    UnterminatedEscape,
    #[error("Unrecognized string escape: '{0}'")]
    UnrecognizedEscape(char),
    #[error("Unterminated block comment")]
    UnterminatedComment,
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    /// `,` or a newline
    Comma,
    Semicolon,
    Dot,
    Pipe,
    /// `<-`
    Arrow,
    /// `<--`
    LongArrow,
    Hash,
    /// `::`
    Bind,
    SelfKw,
    Undefined,
    /// Reserved, never produced by the tokenizer
    Break,
    Return,
    Async,
    Await,
    Number,
    String,
    Name,
    Operator,
    Keyword,
    /// `\` line continuation
    IgnoreLine,
    Eof,
    Error,
}

impl TokenKind {
    /// Tokens after which a newline cannot end the expression
    pub fn continues_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword
                | TokenKind::Operator
                | TokenKind::Pipe
                | TokenKind::Arrow
                | TokenKind::LongArrow
                | TokenKind::Semicolon
                | TokenKind::LeftParen
                | TokenKind::LeftBracket
                | TokenKind::LeftBrace
                | TokenKind::Async
                | TokenKind::Await
        )
    }

    /// Tokens that close a bracketed group
    pub fn is_closer(self) -> bool {
        matches!(
            self,
            TokenKind::RightParen | TokenKind::RightBracket | TokenKind::RightBrace
        )
    }

    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "left paren",
            TokenKind::RightParen => "right paren",
            TokenKind::LeftBracket => "left bracket",
            TokenKind::RightBracket => "right bracket",
            TokenKind::LeftBrace => "left brace",
            TokenKind::RightBrace => "right brace",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Dot => "dot",
            TokenKind::Pipe => "pipe",
            TokenKind::Arrow => "arrow",
            TokenKind::LongArrow => "long arrow",
            TokenKind::Hash => "hash",
            TokenKind::Bind => "bind",
            TokenKind::SelfKw => "self",
            TokenKind::Undefined => "undefined",
            TokenKind::Break => "break",
            TokenKind::Return => "return",
            TokenKind::Async => "async",
            TokenKind::Await => "await",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Name => "name",
            TokenKind::Operator => "operator",
            TokenKind::Keyword => "keyword",
            TokenKind::IgnoreLine => "ignore line",
            TokenKind::Eof => "end of input",
            TokenKind::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Token with its text and source span.
///
/// For strings `text` is the decoded value; for errors it is the message.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    #[inline]
    pub fn is(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.kind == kind
    }

    pub fn location(&self) -> Location {
        self.span.location()
    }
}

impl fmt::Display for Token {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::String => write!(f, "{:?} ({})", self.text, self.kind),
            _ => write!(f, "'{}' ({})", self.text, self.kind),
        }
    }
}
