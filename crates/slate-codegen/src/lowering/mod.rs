//! AST to SIR lowering implementation.

mod core;
mod expressions;
mod program;
mod runtime;
mod statements;

pub use core::Lowering;
