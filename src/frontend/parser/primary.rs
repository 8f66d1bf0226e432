//! Primary expressions and literals

use super::ast::{Block, Expr};
use super::parser_state::{ParseError, ParseResult, ParserState};
use crate::frontend::lexer::TokenKind;

impl ParserState {
    pub(super) fn primary(&mut self) -> ParseResult<Expr> {
        self.nested(Self::atom)
    }

    fn atom(&mut self) -> ParseResult<Expr> {
        match self.peek_kind(0) {
            TokenKind::Number => {
                let token = self.bump();
                let value = token
                    .text
                    .parse::<f64>()
                    .map_err(|_| ParseError::new(format!("Invalid number '{}'.", token.text), &token))?;
                Ok(Expr::Number(value))
            }
            TokenKind::String => Ok(Expr::String(self.bump().text)),
            TokenKind::Name => Ok(Expr::Name(self.bump().text)),
            TokenKind::SelfKw => {
                self.bump();
                Ok(Expr::SelfRef)
            }
            TokenKind::Return => {
                self.bump();
                let value = if self.at(TokenKind::Comma) || self.at_group_end() {
                    None
                } else {
                    Some(Box::new(self.assignment()?))
                };
                Ok(Expr::Return(value))
            }
            TokenKind::LeftParen => {
                self.bump();
                let expr = self.expression();
                self.consume(TokenKind::RightParen, "Expect closing ')'.")?;
                Ok(expr)
            }
            TokenKind::LeftBracket => self.object_literal(),
            TokenKind::Hash => self.array_literal(),
            TokenKind::LeftBrace => self.block_literal(false),
            TokenKind::Async => {
                self.bump();
                if self.at(TokenKind::LeftBrace) {
                    self.block_literal(true)
                } else {
                    let token = self.bump();
                    Err(self.unexpected("Expect block after 'async'.", &token))
                }
            }
            TokenKind::Await => {
                self.bump();
                Ok(Expr::Await(Box::new(self.keyword()?)))
            }
            // A keyword message with no receiver goes to Ether.
            TokenKind::Keyword => {
                let (name, args) = self.keyword_parts()?;
                Ok(Expr::message(None, name, args))
            }
            TokenKind::Eof => {
                let token = self.current().clone();
                Err(ParseError::new("Unexpected end of input.", &token))
            }
            _ => {
                let token = self.bump();
                Err(self.unexpected(&format!("Could not parse {}.", token), &token))
            }
        }
    }

    /// `[ |parent| defines ]`
    fn object_literal(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::LeftBracket, "Expect '[' to begin object literal.")?;

        let parent = if self.skip(TokenKind::Pipe).is_some() {
            let parent = self.assignment()?;
            self.consume(TokenKind::Pipe, "Expect closing '|' after parent.")?;
            Some(Box::new(parent))
        } else {
            None
        };

        let defines = if self.skip(TokenKind::RightBracket).is_some() {
            Vec::new()
        } else {
            self.parse_defines(TokenKind::RightBracket)?
        };

        Ok(Expr::Object { parent, defines })
    }

    /// `#[ elements ]`
    fn array_literal(&mut self) -> ParseResult<Expr> {
        self.consume(TokenKind::Hash, "Expect '#' to begin array literal.")?;
        self.consume(TokenKind::LeftBracket, "Expect '[' to begin array literal.")?;

        if self.skip(TokenKind::RightBracket).is_some() {
            return Ok(Expr::Array(Vec::new()));
        }

        let elements = self.parse_sequence()?;
        self.consume(TokenKind::RightBracket, "Expect ']' to end array literal.")?;
        Ok(Expr::Array(elements))
    }

    /// `{ |params| body }`; an empty body is `nil`
    fn block_literal(
        &mut self,
        is_async: bool,
    ) -> ParseResult<Expr> {
        self.consume(TokenKind::LeftBrace, "Expect '{' to begin block.")?;
        let params = self.parse_params()?;

        let body = if self.at(TokenKind::RightBrace) {
            Expr::name("nil")
        } else {
            self.expression()
        };
        self.consume(TokenKind::RightBrace, "Expect '}' to end block.")?;

        Ok(Expr::Block(Block {
            params,
            body: Box::new(body),
            is_async,
        }))
    }

    fn parse_params(&mut self) -> ParseResult<Vec<String>> {
        let mut params = Vec::new();

        if self.skip(TokenKind::Pipe).is_some() {
            while let Some(name) = self.skip(TokenKind::Name) {
                params.push(name.text);
            }
            self.consume(TokenKind::Pipe, "Expect '|' to end argument list.")?;
        }

        Ok(params)
    }
}
