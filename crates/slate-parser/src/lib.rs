//! Parser for the Slate language.
//!
//! This crate turns token streams into Abstract Syntax Trees (ASTs).
//! A program is one module: a `module` header, optional imports, then
//! top-level statements and function declarations.

pub mod ast;
mod parsing;

pub use ast::{
    BinaryOperator, Block, Expression, FunctionDecl, Import, Parameter, Program, Statement,
};
pub use parsing::Parser;

use slate_core::{Result, Span};
use slate_lexer::Token;

/// Parses a token stream into a Slate program.
///
/// # Errors
///
/// Returns an error if the token stream does not form a valid program.
///
/// # Examples
///
/// ```
/// use slate_lexer::tokenize;
/// use slate_parser::parse;
///
/// let tokens = tokenize("module demo\nprintln(42)").unwrap();
/// let program = parse(&tokens).unwrap();
/// assert_eq!(program.module, "demo");
/// ```
pub fn parse(tokens: &[(Token, Span)]) -> Result<Program> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}
