//! Error types and result aliases for the Slate compiler.

use crate::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Main error type for the Slate compiler.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lexer error: {0}")]
    Lexer(String),

    #[error("Parser error: {0}")]
    #[diagnostic(code(slate::parser))]
    Parser(String, #[label("here")] Span),

    #[error("Unresolved function call '{0}'")]
    #[diagnostic(
        code(slate::lower::unresolved_call),
        help("callees resolve as '<module>_<name>' against functions already in the module")
    )]
    UnresolvedCall(String, #[label("called here")] Span),

    #[error("Assignment to undeclared variable '{0}'")]
    #[diagnostic(code(slate::lower::undeclared_variable))]
    UndeclaredVariable(String, #[label("assigned here")] Span),

    #[error("Binary operator '{0}' is not supported by lowering")]
    #[diagnostic(code(slate::lower::unsupported_operator))]
    UnsupportedOperator(String, #[label("used here")] Span),

    #[error("Expression produces no value")]
    #[diagnostic(
        code(slate::lower::missing_value),
        help("the first mention of a variable declares it and yields nothing usable as an operand")
    )]
    MissingValue(#[label("this expression")] Span),

    #[error("Module verification failed: {0}")]
    #[diagnostic(code(slate::ir::verify))]
    Verify(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from(span.start..span.end)
    }
}

/// Result type alias using the Slate Error type.
pub type Result<T> = std::result::Result<T, Error>;
