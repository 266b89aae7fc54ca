//! SIR values, instructions and block terminators.

use crate::module::{BlockId, BytesId, FuncId, GlobalId, InstId};
use crate::types::Type;

/// A SIR value.
///
/// Constants are carried immediately; everything else is an id into
/// the enclosing module or function. Two uses of the same `Inst` id
/// refer to the same computed value, not a recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Integer constant.
    ConstInt(i64),
    /// Float constant.
    ConstFloat(f64),
    /// Interned byte-string constant.
    Bytes(BytesId),
    /// Address of a module global.
    Global(GlobalId),
    /// The n-th parameter of the enclosing function.
    Param(u32),
    /// The result of an instruction in the enclosing function.
    Inst(InstId),
}

/// A SIR instruction.
///
/// Instructions live in a per-function arena; blocks reference them by
/// id in execution order.
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    /// Reserves a stack slot and yields its address.
    Alloca { name: String, ty: Type },
    /// Reads a value of type `ty` through `addr`.
    Load { ty: Type, addr: Value },
    /// Writes `value` through `addr`. Yields nothing.
    Store { value: Value, addr: Value },
    /// Applies `op` to two operands of the same type.
    Binary { op: BinOp, lhs: Value, rhs: Value },
    /// Calls `callee` with `args` in order.
    Call { callee: FuncId, args: Vec<Value> },
}

/// Binary operations. Division is signed and truncating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Returns the mnemonic used in the textual form.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }
}

/// A block terminator. Every block of a function body must end in
/// exactly one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Term {
    /// Returns from the function, with a value unless the function
    /// returns void.
    Ret { value: Option<Value> },
    /// Unconditional jump.
    Br { dest: BlockId },
}
