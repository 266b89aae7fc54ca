//! Lowering from Slate ASTs to SIR modules.
//!
//! One program becomes one module. Lowering installs the runtime
//! support (an external `printf` and a `println` wrapper), synthesizes
//! the entry function named after the module, walks the top-level
//! statements through a scope stack, and hands the result to the SIR
//! verifier before anyone else sees it.

mod lowering;
mod scope;

pub use lowering::Lowering;

use slate_core::Result;
use slate_ir::Module;
use slate_parser::Program;

/// Lowers a parsed program to a verified SIR module.
///
/// # Errors
///
/// Returns an error when lowering fails (unresolved call, unsupported
/// operator, undeclared assignment target, valueless operand) or when
/// the assembled module does not verify. No module is produced on
/// error.
///
/// # Examples
///
/// ```
/// use slate_lexer::tokenize;
/// use slate_parser::parse;
///
/// let tokens = tokenize("module demo\nprintln(42)").unwrap();
/// let program = parse(&tokens).unwrap();
/// let module = slate_codegen::lower(&program).unwrap();
/// assert!(module.find_function("demo").is_some());
/// ```
pub fn lower(program: &Program) -> Result<Module> {
    let mut lowering = Lowering::new(&program.module);
    lowering.lower_program(program)?;
    Ok(lowering.into_module())
}
