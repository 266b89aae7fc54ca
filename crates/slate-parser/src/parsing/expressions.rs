//! Expression parsing with operator precedence.

use super::parser::Parser;
use crate::ast::{BinaryOperator, Expression};
use slate_core::{Error, Result};
use slate_lexer::TokenKind;

impl Parser<'_> {
    /// Parses an expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_assignment()
    }

    /// Parses an assignment: `name = expr`. Right-associative, so
    /// `a = b = 1` assigns through.
    fn parse_assignment(&mut self) -> Result<Expression> {
        if self.check(&TokenKind::Identifier) && self.check_ahead(1, &TokenKind::Equal) {
            let start_span = self.current_span();
            let target = self.peek().0.text.clone();
            self.advance();
            self.advance();

            let value = self.parse_assignment()?;
            let span = start_span.merge(value.span());
            return Ok(Expression::Assign {
                target,
                value: Box::new(value),
                span,
            });
        }

        self.parse_comparison()
    }

    /// Parses comparison operators: `==`, `!=`, `<`, `<=`, `>`, `>=`.
    fn parse_comparison(&mut self) -> Result<Expression> {
        let mut expr = self.parse_term()?;

        while let Some(kind) = self.match_tokens(&[
            TokenKind::EqualEqual,
            TokenKind::BangEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
            TokenKind::Greater,
            TokenKind::GreaterEqual,
        ]) {
            let operator = match kind {
                TokenKind::EqualEqual => BinaryOperator::Equal,
                TokenKind::BangEqual => BinaryOperator::NotEqual,
                TokenKind::Less => BinaryOperator::Less,
                TokenKind::LessEqual => BinaryOperator::LessEqual,
                TokenKind::Greater => BinaryOperator::Greater,
                _ => BinaryOperator::GreaterEqual,
            };
            let right = self.parse_term()?;
            let span = expr.span().merge(right.span());
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    /// Parses additive operators: `+`, `-`.
    fn parse_term(&mut self) -> Result<Expression> {
        let mut expr = self.parse_factor()?;

        while let Some(kind) = self.match_tokens(&[TokenKind::Plus, TokenKind::Minus]) {
            let operator = if kind == TokenKind::Plus {
                BinaryOperator::Add
            } else {
                BinaryOperator::Subtract
            };
            let right = self.parse_factor()?;
            let span = expr.span().merge(right.span());
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    /// Parses multiplicative operators: `*`, `/`.
    fn parse_factor(&mut self) -> Result<Expression> {
        let mut expr = self.parse_call()?;

        while let Some(kind) = self.match_tokens(&[TokenKind::Star, TokenKind::Slash]) {
            let operator = if kind == TokenKind::Star {
                BinaryOperator::Multiply
            } else {
                BinaryOperator::Divide
            };
            let right = self.parse_call()?;
            let span = expr.span().merge(right.span());
            expr = Expression::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    /// Parses a call suffix on a primary expression. Only bare
    /// identifiers are callable.
    fn parse_call(&mut self) -> Result<Expression> {
        let expr = self.parse_primary()?;

        if self.check(&TokenKind::LeftParen) {
            let Expression::Variable { name, span } = &expr else {
                return Err(Error::Parser(
                    "Only identifiers can be called".to_string(),
                    self.current_span(),
                ));
            };
            let callee = name.clone();
            let start_span = *span;

            self.advance();
            let arguments = self.parse_argument_list()?;
            let end_span = self.expect(&TokenKind::RightParen)?;

            return Ok(Expression::Call {
                callee,
                arguments,
                span: start_span.merge(end_span),
            });
        }

        Ok(expr)
    }

    fn parse_argument_list(&mut self) -> Result<Vec<Expression>> {
        let mut arguments = Vec::new();

        if !self.check(&TokenKind::RightParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(arguments)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let span = self.current_span();

        match self.peek().0.kind {
            TokenKind::Integer => self.parse_integer_literal(),
            TokenKind::Float => self.parse_float_literal(),
            TokenKind::String => self.parse_string_literal(),
            TokenKind::Identifier => {
                let name = self.advance().0.text.clone();
                Ok(Expression::Variable { name, span })
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(expr)
            }
            _ => Err(Error::Parser(
                format!("Unexpected token '{}'", self.peek().0.text),
                span,
            )),
        }
    }

    fn parse_integer_literal(&mut self) -> Result<Expression> {
        let span = self.current_span();
        let text = &self.peek().0.text;
        let value = text.parse::<i64>().map_err(|_| {
            Error::Parser(format!("Invalid integer literal '{text}'"), span)
        })?;
        self.advance();
        Ok(Expression::Integer { value, span })
    }

    fn parse_float_literal(&mut self) -> Result<Expression> {
        let span = self.current_span();
        let text = &self.peek().0.text;
        let value = text.parse::<f64>().map_err(|_| {
            Error::Parser(format!("Invalid float literal '{text}'"), span)
        })?;
        self.advance();
        Ok(Expression::Float { value, span })
    }

    /// Parses a string literal, stripping the quotes and resolving
    /// escape sequences.
    fn parse_string_literal(&mut self) -> Result<Expression> {
        let span = self.current_span();
        let text = &self.peek().0.text;
        let value = unescape(&text[1..text.len() - 1]);
        self.advance();
        Ok(Expression::String { value, span })
    }
}

/// Resolves `\n`, `\t`, `\r`, `\\` and `\"` escapes. Unknown escapes
/// are kept verbatim.
fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            value.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('\\') => value.push('\\'),
            Some('"') => value.push('"'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            }
            None => value.push('\\'),
        }
    }

    value
}
