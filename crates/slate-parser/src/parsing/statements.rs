//! Statement parsing.

use super::parser::Parser;
use crate::ast::{Expression, FunctionDecl, Parameter, Statement};
use slate_core::{Error, Result};
use slate_lexer::TokenKind;

impl Parser<'_> {
    /// Parses a top-level statement. Function declarations are only
    /// legal here, never inside a block.
    pub(crate) fn parse_top_level_statement(&mut self) -> Result<Statement> {
        if self.check(&TokenKind::Function) || self.check(&TokenKind::Local) {
            Ok(Statement::Function(self.parse_function()?))
        } else {
            self.parse_statement()
        }
    }

    /// Parses a statement inside a function body or the module body.
    pub(crate) fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek().0.kind {
            TokenKind::Function | TokenKind::Local => Err(Error::Parser(
                "Function declarations are only allowed at module level".to_string(),
                self.current_span(),
            )),
            TokenKind::Var => self.parse_var_declaration(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Comment => self.parse_comment_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses a function declaration:
    /// `[local] function name = |a, b| { ... }`.
    fn parse_function(&mut self) -> Result<FunctionDecl> {
        let start_span = self.current_span();
        let external = !self.match_token(&TokenKind::Local);
        self.expect(&TokenKind::Function)?;

        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Equal)?;

        let params = if self.check(&TokenKind::Pipe) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };

        let body = self.parse_block()?;
        let span = start_span.merge(body.span);

        Ok(FunctionDecl {
            name,
            params,
            body,
            external,
            span,
        })
    }

    /// Parses a pipe-delimited parameter list: `|a, b: int|`.
    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>> {
        self.expect(&TokenKind::Pipe)?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::Pipe) {
            loop {
                let span = self.current_span();
                let name = self.expect_identifier()?;
                let annotation = if self.match_token(&TokenKind::Colon) {
                    Some(self.expect_identifier()?)
                } else {
                    None
                };
                params.push(Parameter {
                    name,
                    annotation,
                    span,
                });

                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(&TokenKind::Pipe)?;
        Ok(params)
    }

    /// Parses a variable declaration: `var name: type = expr`. The
    /// annotation and the initializer are both optional.
    fn parse_var_declaration(&mut self) -> Result<Statement> {
        let start_span = self.expect(&TokenKind::Var)?;
        let name = self.expect_identifier()?;

        let annotation = if self.match_token(&TokenKind::Colon) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let initializer = if self.match_token(&TokenKind::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let end_span = initializer
            .as_ref()
            .map_or_else(|| self.previous_span(), Expression::span);

        Ok(Statement::VariableDeclaration {
            name,
            annotation,
            initializer,
            span: start_span.merge(end_span),
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        let start_span = self.expect(&TokenKind::Return)?;
        let value = self.parse_expression()?;
        let span = start_span.merge(value.span());
        Ok(Statement::Return { value, span })
    }

    /// Parses a comment token into a comment statement, stripping the
    /// leading `#` marker.
    fn parse_comment_statement(&mut self) -> Result<Statement> {
        let span = self.current_span();
        let text = self.peek().0.text.trim_start_matches('#').trim().to_string();
        self.advance();
        Ok(Statement::Comment { text, span })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let expression = self.parse_expression()?;
        let span = expression.span();
        Ok(Statement::Expression { expression, span })
    }
}
