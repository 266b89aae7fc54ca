//! Compilation pipeline stages.

use anyhow::Result;
use miette::NamedSource;
use slate_core::Span;
use slate_ir::Module;
use slate_lexer::{Token, tokenize};
use slate_parser::{Program, parse};

/// Runs lexical analysis on source code.
///
/// # Errors
/// Returns an error if lexical analysis fails.
pub fn lex(source: &str) -> Result<Vec<(Token, Span)>> {
    tokenize(source).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new("main.slate", source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("Lexical analysis failed")
    })
}

/// Runs parsing on tokens to produce an AST.
///
/// # Errors
/// Returns an error if parsing fails.
pub fn parse_tokens(tokens: &[(Token, Span)], source: &str) -> Result<Program> {
    parse(tokens).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new("main.slate", source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("Parsing failed")
    })
}

/// Lowers the AST to SIR (Slate Intermediate Representation).
///
/// The module this returns has already passed verification.
///
/// # Errors
/// Returns an error if lowering or verification fails.
pub fn lower(program: &Program, source: &str) -> Result<Module> {
    slate_codegen::lower(program).map_err(|e| {
        let report = miette::Report::new(e)
            .with_source_code(NamedSource::new("main.slate", source.to_string()));
        eprintln!("{report:?}");
        anyhow::anyhow!("SIR lowering failed")
    })
}

/// Runs the complete compilation pipeline for checking (no artifact output).
///
/// # Errors
/// Returns an error if any stage fails.
pub fn check_pipeline(source: &str) -> Result<()> {
    let tokens = lex(source)?;
    let ast = parse_tokens(&tokens, source)?;
    let _module = lower(&ast, source)?;
    Ok(())
}

/// Runs the complete compilation pipeline and returns the SIR module.
///
/// # Errors
/// Returns an error if any stage fails.
pub fn build_pipeline(source: &str) -> Result<Module> {
    let tokens = lex(source)?;
    let ast = parse_tokens(&tokens, source)?;
    lower(&ast, source)
}
