//! Slate Intermediate Representation (SIR)
//!
//! SIR is the typed, block-based form Slate programs are lowered into.
//! It borrows the load/store shape of classic SSA back ends while
//! staying small enough to verify and execute in-process.
//!
//! # Design
//!
//! - **Typed**: every value has one of five types; the set is closed
//! - **Arena-based**: instructions live in a per-function arena and are
//!   named by id, so a value used twice is computed once
//! - **Explicit termination**: a block is only complete once it carries
//!   a terminator, and the verifier holds modules to that
//! - **Executable**: an execution engine runs verified modules directly,
//!   servicing `printf` natively
//!
//! # Example
//!
//! ```rust
//! use slate_ir::{Function, Inst, Linkage, Module, Signature, Term, Type, Value};
//!
//! let mut module = Module::new("demo");
//! let mut func = Function::new("demo_add".to_string(), Signature::uniform(2), Linkage::External);
//! let entry = func.append_block("entry");
//! let sum = func.push_inst(entry, Inst::Binary {
//!     op: slate_ir::BinOp::Add,
//!     lhs: Value::Param(0),
//!     rhs: Value::Param(1),
//! });
//! func.set_term(entry, Term::Ret { value: Some(sum) });
//! module.add_function(func);
//!
//! assert!(slate_ir::verify(&module).is_ok());
//! ```

mod display;
mod inst;
mod interp;
mod module;
mod types;
mod verify;

pub use inst::{BinOp, Inst, Term, Value};
pub use interp::{ExecutionEngine, RtValue};
pub use module::{Block, BlockId, BytesId, FuncId, Function, Global, GlobalId, InstId, Module};
pub use types::{Linkage, Signature, Type};
pub use verify::verify;
