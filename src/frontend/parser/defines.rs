//! Member definitions for object literals and binds
//!
//! ```text
//! name <- value           field with accessor
//! name { body }           unary method
//! + other { body }        operator method
//! at: i put: v { body }   keyword method
//! ```

use super::ast::{Define, Expr};
use super::parser_state::{ParseResult, ParserState};
use crate::frontend::lexer::TokenKind;

impl ParserState {
    /// Definitions up to and including `closer`
    pub(super) fn parse_defines(
        &mut self,
        closer: TokenKind,
    ) -> ParseResult<Vec<Define>> {
        let mut defines = Vec::new();

        loop {
            defines.push(self.parse_define()?);

            if self.skip(closer).is_some() {
                return Ok(defines);
            }
            self.consume(TokenKind::Comma, "Expect ',' or newline between definitions.")?;
            if self.skip(closer).is_some() {
                return Ok(defines);
            }
        }
    }

    pub(super) fn parse_define(&mut self) -> ParseResult<Define> {
        if self.at2(TokenKind::Name, TokenKind::Arrow) {
            let name = self.bump().text;
            self.bump();
            let body = self.assignment()?;
            return Ok(Define::field(name, body));
        }

        if let Some(name) = self.skip(TokenKind::Name) {
            let body = self.method_body(Vec::new())?;
            return Ok(Self::method(name.text, body));
        }

        if let Some(operator) = self.skip(TokenKind::Operator) {
            let param = self.consume(TokenKind::Name, "Expect parameter name after operator.")?;
            let body = self.method_body(vec![param.text])?;
            return Ok(Self::method(operator.text, body));
        }

        if self.at(TokenKind::Keyword) {
            let mut name = String::new();
            let mut params = Vec::new();

            while let Some(keyword) = self.skip(TokenKind::Keyword) {
                name.push_str(&keyword.text);
                let param = self.consume(TokenKind::Name, "Expect parameter name after keyword.")?;
                params.push(param.text);
            }

            let body = self.method_body(params)?;
            return Ok(Self::method(name, body));
        }

        let token = self.bump();
        Err(self.unexpected(&format!("Unexpected {} in definition.", token), &token))
    }

    fn method(
        name: String,
        body: Expr,
    ) -> Define {
        Define {
            name,
            body,
            is_method: true,
        }
    }

    /// `{ body }` for a method taking `params`; an empty body is `nil`
    fn method_body(
        &mut self,
        params: Vec<String>,
    ) -> ParseResult<Expr> {
        self.consume(TokenKind::LeftBrace, "Expect block body for method.")?;

        let body = if self.at(TokenKind::RightBrace) {
            Expr::name("nil")
        } else {
            self.expression()
        };
        self.consume(TokenKind::RightBrace, "Expect '}' after method body.")?;

        Ok(Expr::block(params, body))
    }
}
