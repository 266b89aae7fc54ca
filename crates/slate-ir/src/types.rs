//! The SIR type system: a small closed set of value types plus
//! function signatures.

use std::fmt;

/// Types a SIR value can have.
///
/// The set is closed; lowering never invents types outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// 64-bit signed integer, the working type for all arithmetic.
    I64,
    /// 64-bit float. Literals lower to it, nothing consumes it yet.
    F64,
    /// Pointer to an immutable byte string.
    Bytes,
    /// Pointer to a stack slot, produced by `alloca`.
    Ptr,
    /// Absence of a value. Only legal as a return type.
    Void,
}

impl Type {
    /// Returns true for `Void`.
    #[must_use]
    pub fn is_void(self) -> bool {
        self == Self::Void
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I64 => "i64",
            Self::F64 => "f64",
            Self::Bytes => "bytes",
            Self::Ptr => "ptr",
            Self::Void => "void",
        };
        write!(f, "{name}")
    }
}

/// A function signature: parameter types, return type, and whether the
/// function accepts extra arguments past the declared ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Type>,
    pub ret: Type,
    pub variadic: bool,
}

impl Signature {
    /// Creates a fixed-arity signature.
    #[must_use]
    pub fn new(params: Vec<Type>, ret: Type) -> Self {
        Self {
            params,
            ret,
            variadic: false,
        }
    }

    /// Creates a variadic signature; `params` are the fixed leading
    /// parameters.
    #[must_use]
    pub fn variadic(params: Vec<Type>, ret: Type) -> Self {
        Self {
            params,
            ret,
            variadic: true,
        }
    }

    /// Creates the signature every source-level function gets: `n`
    /// integer parameters returning an integer.
    #[must_use]
    pub fn uniform(n: usize) -> Self {
        Self::new(vec![Type::I64; n], Type::I64)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        if self.variadic {
            if !self.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "...")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// Function linkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Visible outside the module. Declarations are always external.
    External,
    /// Private to the module.
    Internal,
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => write!(f, "external"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
