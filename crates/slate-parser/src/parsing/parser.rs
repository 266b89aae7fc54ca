//! Core parser structure and helper methods.

use crate::ast::{Block, Import, Program};
use slate_core::{Error, Result, Span};
use slate_lexer::{Token, TokenKind};

/// Parser for Slate source code.
pub struct Parser<'a> {
    tokens: &'a [(Token, Span)],
    current: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given token stream.
    #[must_use]
    pub fn new(tokens: &'a [(Token, Span)]) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parses a complete program: the module header, any imports, then
    /// top-level statements until the end of input.
    pub fn parse_program(&mut self) -> Result<Program> {
        if self.tokens.is_empty() {
            return Err(Error::Parser(
                "Expected 'module' header, found empty input".to_string(),
                Span::at(0),
            ));
        }

        let start_span = self.expect(&TokenKind::Module)?;
        let module = self.expect_identifier()?;

        let mut imports = Vec::new();
        while self.check(&TokenKind::Import) {
            imports.push(self.parse_import()?);
        }

        let body_start = self.current_span();
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_top_level_statement()?);
        }

        let end_span = self.previous_span();
        let block = Block {
            statements,
            span: body_start.merge(end_span),
        };

        Ok(Program {
            module,
            imports,
            block,
            span: start_span.merge(end_span),
        })
    }

    fn parse_import(&mut self) -> Result<Import> {
        let start_span = self.expect(&TokenKind::Import)?;
        let name = self.expect_identifier()?;
        Ok(Import {
            name,
            span: start_span.merge(self.previous_span()),
        })
    }

    /// Parses a brace-delimited block of statements.
    pub(crate) fn parse_block(&mut self) -> Result<Block> {
        let start_span = self.expect(&TokenKind::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        let end_span = self.expect(&TokenKind::RightBrace)?;
        Ok(Block {
            statements,
            span: start_span.merge(end_span),
        })
    }

    /// Returns true if all tokens have been consumed.
    pub(crate) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Returns the current token without consuming it.
    ///
    /// Falls back to the last token when past the end, so callers get a
    /// sensible span for end-of-input errors.
    pub(crate) fn peek(&self) -> &(Token, Span) {
        if self.is_at_end() {
            &self.tokens[self.tokens.len() - 1]
        } else {
            &self.tokens[self.current]
        }
    }

    /// Checks whether the current token has the given kind.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && &self.peek().0.kind == kind
    }

    /// Checks whether the token `offset` positions ahead has the given kind.
    pub(crate) fn check_ahead(&self, offset: usize, kind: &TokenKind) -> bool {
        self.tokens
            .get(self.current + offset)
            .is_some_and(|(token, _)| &token.kind == kind)
    }

    /// Consumes the current token and returns it.
    pub(crate) fn advance(&mut self) -> &(Token, Span) {
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it matches any of the given kinds,
    /// returning the matched kind.
    pub(crate) fn match_tokens(&mut self, kinds: &[TokenKind]) -> Option<TokenKind> {
        for kind in kinds {
            if self.check(kind) {
                let kind = self.advance().0.kind.clone();
                return Some(kind);
            }
        }
        None
    }

    /// Consumes a token of the given kind or reports a parse error.
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<Span> {
        if self.check(kind) {
            Ok(self.advance().1)
        } else {
            Err(Error::Parser(
                format!("Expected {kind}, found '{}'", self.peek_text()),
                self.current_span(),
            ))
        }
    }

    /// Consumes an identifier token and returns its text.
    pub(crate) fn expect_identifier(&mut self) -> Result<String> {
        if self.check(&TokenKind::Identifier) {
            Ok(self.advance().0.text.clone())
        } else {
            Err(Error::Parser(
                format!("Expected identifier, found '{}'", self.peek_text()),
                self.current_span(),
            ))
        }
    }

    /// Returns the span of the current token, or of the last token when
    /// past the end of input.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().1
    }

    /// Returns the span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        if self.current == 0 {
            self.current_span()
        } else {
            self.tokens[self.current - 1].1
        }
    }

    fn peek_text(&self) -> &str {
        if self.is_at_end() {
            "end of input"
        } else {
            &self.peek().0.text
        }
    }
}
