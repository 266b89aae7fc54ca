//! SIR module structure - top-level representation of a compiled
//! Slate program.

use std::fs;
use std::path::Path;

use slate_core::Result;

use crate::inst::{Inst, Term, Value};
use crate::types::{Linkage, Signature, Type};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the id as a usize index.
            #[must_use]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Index of a function in a module.
    FuncId
);
define_id!(
    /// Index of a global in a module.
    GlobalId
);
define_id!(
    /// Index of an interned byte string in a module.
    BytesId
);
define_id!(
    /// Index of a block in a function.
    BlockId
);
define_id!(
    /// Index of an instruction in a function's arena.
    InstId
);

/// A module-level constant holding a byte string.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub name: String,
    pub linkage: Linkage,
    pub init: Vec<u8>,
}

/// A basic block: an ordered run of instructions closed by a
/// terminator. A block without a terminator is incomplete and fails
/// verification.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub label: String,
    pub insts: Vec<InstId>,
    pub term: Option<Term>,
}

/// A function. One without blocks is a declaration: its body lives
/// outside the module, like the C `printf` the runtime leans on.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub sig: Signature,
    pub linkage: Linkage,
    /// One name per parameter, used for diagnostics and display.
    pub param_names: Vec<String>,
    pub blocks: Vec<Block>,
    /// Arena of all instructions; blocks reference into it by id.
    pub insts: Vec<Inst>,
}

impl Function {
    /// Creates an empty function definition.
    #[must_use]
    pub fn new(name: String, sig: Signature, linkage: Linkage) -> Self {
        let param_names = (0..sig.params.len()).map(|i| format!("arg{i}")).collect();
        Self {
            name,
            sig,
            linkage,
            param_names,
            blocks: Vec::new(),
            insts: Vec::new(),
        }
    }

    /// Returns true if this function has no body.
    #[must_use]
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Appends a new empty block and returns its id.
    pub fn append_block(&mut self, label: impl Into<String>) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block {
            label: label.into(),
            insts: Vec::new(),
            term: None,
        });
        id
    }

    /// Appends an instruction to the arena and to the given block,
    /// returning the value naming its result.
    pub fn push_inst(&mut self, block: BlockId, inst: Inst) -> Value {
        let id = InstId(self.insts.len() as u32);
        self.insts.push(inst);
        self.blocks[block.index()].insts.push(id);
        Value::Inst(id)
    }

    /// Sets the terminator of the given block, replacing any previous
    /// one.
    pub fn set_term(&mut self, block: BlockId, term: Term) {
        self.blocks[block.index()].term = Some(term);
    }

    /// Renames the parameter at `index`.
    pub fn set_param_name(&mut self, index: usize, name: impl Into<String>) {
        self.param_names[index] = name.into();
    }

    /// Returns the block with the given id.
    #[must_use]
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// Returns the instruction with the given id.
    #[must_use]
    pub fn inst(&self, id: InstId) -> &Inst {
        &self.insts[id.index()]
    }
}

/// Top-level SIR module representing a complete Slate program.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Module name; also the name of the entry function.
    pub name: String,
    pub functions: Vec<Function>,
    pub globals: Vec<Global>,
    /// Interned anonymous byte strings, mostly string literals.
    pub byte_pool: Vec<Vec<u8>>,
}

impl Module {
    /// Creates a new empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            globals: Vec::new(),
            byte_pool: Vec::new(),
        }
    }

    /// Adds a function definition and returns its id.
    pub fn add_function(&mut self, function: Function) -> FuncId {
        let id = FuncId(self.functions.len() as u32);
        self.functions.push(function);
        id
    }

    /// Adds a bodiless external declaration and returns its id.
    pub fn declare_function(&mut self, name: impl Into<String>, sig: Signature) -> FuncId {
        self.add_function(Function::new(name.into(), sig, Linkage::External))
    }

    /// Finds a function by name. The first match wins.
    #[must_use]
    pub fn find_function(&self, name: &str) -> Option<FuncId> {
        self.functions
            .iter()
            .position(|f| f.name == name)
            .map(|i| FuncId(i as u32))
    }

    /// Returns the function with the given id.
    #[must_use]
    pub fn function(&self, id: FuncId) -> &Function {
        &self.functions[id.index()]
    }

    /// Returns the function with the given id, mutably.
    pub fn function_mut(&mut self, id: FuncId) -> &mut Function {
        &mut self.functions[id.index()]
    }

    /// Adds a named global constant and returns its id.
    pub fn add_global(
        &mut self,
        name: impl Into<String>,
        linkage: Linkage,
        init: Vec<u8>,
    ) -> GlobalId {
        let id = GlobalId(self.globals.len() as u32);
        self.globals.push(Global {
            name: name.into(),
            linkage,
            init,
        });
        id
    }

    /// Interns an anonymous byte string, reusing an existing entry when
    /// the contents match.
    pub fn const_bytes(&mut self, data: Vec<u8>) -> BytesId {
        if let Some(i) = self.byte_pool.iter().position(|b| *b == data) {
            return BytesId(i as u32);
        }
        let id = BytesId(self.byte_pool.len() as u32);
        self.byte_pool.push(data);
        id
    }

    /// Writes the module's textual form to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`slate_core::Error::Io`] if the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    /// Returns the type of a value as seen from inside `func`.
    #[must_use]
    pub fn value_type(&self, func: &Function, value: Value) -> Type {
        match value {
            Value::ConstInt(_) => Type::I64,
            Value::ConstFloat(_) => Type::F64,
            Value::Bytes(_) | Value::Global(_) => Type::Bytes,
            Value::Param(i) => func
                .sig
                .params
                .get(i as usize)
                .copied()
                .unwrap_or(Type::Void),
            Value::Inst(id) => match func.inst(id) {
                Inst::Alloca { .. } => Type::Ptr,
                Inst::Load { ty, .. } => *ty,
                Inst::Store { .. } => Type::Void,
                Inst::Binary { lhs, .. } => self.value_type(func, *lhs),
                Inst::Call { callee, .. } => self.function(*callee).sig.ret,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::BinOp;

    #[test]
    fn test_module_creation() {
        let module = Module::new("demo");
        assert_eq!(module.name, "demo");
        assert!(module.functions.is_empty());
        assert!(module.globals.is_empty());
    }

    #[test]
    fn test_find_function_first_match_wins() {
        let mut module = Module::new("demo");
        let first = module.add_function(Function::new(
            "f".to_string(),
            Signature::uniform(0),
            Linkage::External,
        ));
        module.add_function(Function::new(
            "f".to_string(),
            Signature::uniform(1),
            Linkage::External,
        ));

        assert_eq!(module.find_function("f"), Some(first));
        assert_eq!(module.find_function("missing"), None);
    }

    #[test]
    fn test_declaration_has_no_body() {
        let mut module = Module::new("demo");
        let id = module.declare_function(
            "printf",
            Signature::variadic(vec![Type::Bytes], Type::I64),
        );
        assert!(module.function(id).is_declaration());
    }

    #[test]
    fn test_push_inst_returns_arena_value() {
        let mut func = Function::new("f".to_string(), Signature::uniform(0), Linkage::External);
        let entry = func.append_block("entry");

        let a = func.push_inst(
            entry,
            Inst::Alloca {
                name: "x".to_string(),
                ty: Type::I64,
            },
        );
        let b = func.push_inst(
            entry,
            Inst::Binary {
                op: BinOp::Add,
                lhs: Value::ConstInt(1),
                rhs: Value::ConstInt(2),
            },
        );

        assert_eq!(a, Value::Inst(InstId(0)));
        assert_eq!(b, Value::Inst(InstId(1)));
        assert_eq!(func.block(entry).insts.len(), 2);
    }

    #[test]
    fn test_const_bytes_interns() {
        let mut module = Module::new("demo");
        let a = module.const_bytes(b"hello".to_vec());
        let b = module.const_bytes(b"hello".to_vec());
        let c = module.const_bytes(b"world".to_vec());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(module.byte_pool.len(), 2);
    }

    #[test]
    fn test_value_type() {
        let module = Module::new("demo");
        let mut func = Function::new("f".to_string(), Signature::uniform(1), Linkage::External);
        let entry = func.append_block("entry");

        let slot = func.push_inst(
            entry,
            Inst::Alloca {
                name: "x".to_string(),
                ty: Type::I64,
            },
        );
        let loaded = func.push_inst(
            entry,
            Inst::Load {
                ty: Type::I64,
                addr: slot,
            },
        );
        let sum = func.push_inst(
            entry,
            Inst::Binary {
                op: BinOp::Add,
                lhs: loaded,
                rhs: Value::ConstInt(1),
            },
        );

        assert_eq!(module.value_type(&func, slot), Type::Ptr);
        assert_eq!(module.value_type(&func, loaded), Type::I64);
        assert_eq!(module.value_type(&func, sum), Type::I64);
        assert_eq!(module.value_type(&func, Value::Param(0)), Type::I64);
        assert_eq!(module.value_type(&func, Value::ConstFloat(1.0)), Type::F64);
    }

    #[test]
    fn test_write_to_file() {
        let module = Module::new("demo");
        let path = std::env::temp_dir().join("slate_ir_write_to_file_test.sir");

        module.write_to_file(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(text.starts_with("module demo"));
    }

    #[test]
    fn test_call_value_type_is_callee_return() {
        let mut module = Module::new("demo");
        let callee = module.declare_function("printf", Signature::variadic(vec![Type::Bytes], Type::I64));

        let mut func = Function::new("f".to_string(), Signature::uniform(0), Linkage::External);
        let entry = func.append_block("entry");
        let fmt = module.const_bytes(b"%lld\n".to_vec());
        let call = func.push_inst(
            entry,
            Inst::Call {
                callee,
                args: vec![Value::Bytes(fmt), Value::ConstInt(7)],
            },
        );

        assert_eq!(module.value_type(&func, call), Type::I64);
        assert_eq!(module.value_type(&func, Value::Bytes(fmt)), Type::Bytes);
    }
}
