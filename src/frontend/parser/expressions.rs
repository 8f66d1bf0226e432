//! Expression ladder, loosest to tightest:
//! sequence, bind, assignment, cascade, keyword, operator, unary.

use super::ast::Expr;
use super::parser_state::{ParseResult, ParserState};
use crate::frontend::lexer::TokenKind;

impl ParserState {
    /// Parse a sequence, recording a failure as an `Error` node
    pub fn expression(&mut self) -> Expr {
        let result = self.parse_sequence().map(Expr::sequence);
        self.recover(result)
    }

    /// Record a failed production and stand an `Error` node in for it
    pub(super) fn recover(
        &mut self,
        result: ParseResult<Expr>,
    ) -> Expr {
        result.unwrap_or_else(|error| {
            let cause = error.message.clone();
            self.error(error);
            Expr::Error(cause)
        })
    }

    /// Comma (or newline) separated expressions; a separator right before a
    /// closing bracket or the end of input is allowed.
    pub(super) fn parse_sequence(&mut self) -> ParseResult<Vec<Expr>> {
        let mut exprs = vec![self.bind()?];

        while self.skip(TokenKind::Comma).is_some() {
            if self.at_group_end() {
                break;
            }
            exprs.push(self.bind()?);
        }

        Ok(exprs)
    }

    pub(super) fn bind(&mut self) -> ParseResult<Expr> {
        let mut expr = self.assignment()?;

        while self.skip(TokenKind::Bind).is_some() {
            let defines = if self.skip(TokenKind::LeftParen).is_some() {
                if self.skip(TokenKind::RightParen).is_some() {
                    Vec::new()
                } else {
                    self.parse_defines(TokenKind::RightParen)?
                }
            } else {
                vec![self.parse_define()?]
            };

            expr = Expr::Bind {
                receiver: Box::new(expr),
                defines,
            };
        }

        Ok(expr)
    }

    /// `name <- value` and `name <-- value`, right-associative
    pub(super) fn assignment(&mut self) -> ParseResult<Expr> {
        if self.at2(TokenKind::Name, TokenKind::Arrow) {
            let name = self.bump().text;
            self.bump();
            let value = Box::new(self.nested(Self::assignment)?);
            return Ok(Expr::Var { name, value });
        }

        if self.at2(TokenKind::Name, TokenKind::LongArrow) {
            let name = self.bump().text;
            self.bump();
            let value = Box::new(self.nested(Self::assignment)?);
            return Ok(Expr::Set { name, value });
        }

        self.cascade()
    }

    /// `receiver first; second; third`
    ///
    /// The receiver is stored in a hidden local so it is evaluated once;
    /// the cascade's value is the last message's result.
    fn cascade(&mut self) -> ParseResult<Expr> {
        let expr = self.keyword()?;
        if !self.at(TokenKind::Semicolon) {
            return Ok(expr);
        }

        let (receiver, name, args) = match expr {
            Expr::Message {
                receiver,
                name,
                args,
            } => (receiver, name, args),
            other => return Ok(other),
        };

        let mut exprs = Vec::new();
        let holder = match receiver {
            Some(receiver) => {
                let holder = self.fresh_cascade_name();
                exprs.push(Expr::Var {
                    name: holder.clone(),
                    value: receiver,
                });
                Some(holder)
            }
            // Receiver-less messages all go to Ether anyway.
            None => None,
        };
        let target = || holder.clone().map(Expr::Name);

        exprs.push(Expr::message(target(), name, args));
        while self.skip(TokenKind::Semicolon).is_some() {
            let (name, args) = self.cascade_message()?;
            exprs.push(Expr::message(target(), name, args));
        }

        Ok(Expr::Sequence(exprs))
    }

    fn cascade_message(&mut self) -> ParseResult<(String, Vec<Expr>)> {
        if let Some(name) = self.skip(TokenKind::Name) {
            return Ok((name.text, Vec::new()));
        }

        if let Some(operator) = self.skip(TokenKind::Operator) {
            let arg = self.unary()?;
            return Ok((operator.text, vec![arg]));
        }

        if self.at(TokenKind::Keyword) {
            return self.keyword_parts();
        }

        let token = self.bump();
        Err(self.unexpected("Expect message after ';'.", &token))
    }

    /// Accumulate `a: x b: y` into one `a:b:` selector
    pub(super) fn keyword_parts(&mut self) -> ParseResult<(String, Vec<Expr>)> {
        let mut name = String::new();
        let mut args = Vec::new();

        while let Some(keyword) = self.skip(TokenKind::Keyword) {
            name.push_str(&keyword.text);
            args.push(self.operator()?);
        }

        Ok((name, args))
    }

    pub(super) fn keyword(&mut self) -> ParseResult<Expr> {
        let expr = self.operator()?;
        if !self.at(TokenKind::Keyword) {
            return Ok(expr);
        }

        let (name, args) = self.keyword_parts()?;
        Ok(Expr::message(Some(expr), name, args))
    }

    /// Binary operators: one precedence level, left-associative
    pub(super) fn operator(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.skip(TokenKind::Operator) {
            let right = self.unary()?;
            expr = Expr::message(Some(expr), operator.text, vec![right]);
        }

        Ok(expr)
    }

    pub(super) fn unary(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        while let Some(name) = self.skip(TokenKind::Name) {
            expr = Expr::message(Some(expr), name.text, Vec::new());
        }

        Ok(expr)
    }
}
