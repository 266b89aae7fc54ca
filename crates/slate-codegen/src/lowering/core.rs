//! Core lowering structure.

use slate_ir as ir;

use crate::lowering::runtime;
use crate::scope::ScopeStack;

/// Converts Slate ASTs into SIR, one module per program.
///
/// Creation installs the runtime support (the external `printf`
/// declaration, its format global, and the `println` wrapper) and the
/// empty entry function; [`Lowering::lower_program`] fills in the
/// rest.
pub struct Lowering {
    pub(crate) module: ir::Module,
    pub(crate) scopes: ScopeStack,
    /// Function currently being lowered into.
    pub(crate) current: ir::FuncId,
    /// First block of the entry function.
    pub(crate) entry_block: ir::BlockId,
}

impl Lowering {
    /// Creates a lowering for a module with the given name.
    #[must_use]
    pub fn new(module_name: &str) -> Self {
        let mut module = ir::Module::new(module_name);
        runtime::install(&mut module);

        // The entry function carries the module's name and never
        // returns a value.
        let mut entry = ir::Function::new(
            module_name.to_string(),
            ir::Signature::new(vec![], ir::Type::Void),
            ir::Linkage::External,
        );
        let entry_block = entry.append_block("entry");
        let current = module.add_function(entry);

        Self {
            module,
            scopes: ScopeStack::new(),
            current,
            entry_block,
        }
    }

    /// Consumes the lowering and returns the finished module.
    #[must_use]
    pub fn into_module(self) -> ir::Module {
        self.module
    }

    /// Appends an instruction to the current function in the block the
    /// scope stack points at.
    pub(crate) fn emit(&mut self, inst: ir::Inst) -> ir::Value {
        let block = self.scopes.current_block();
        self.module.function_mut(self.current).push_inst(block, inst)
    }

    /// Terminates the block the scope stack points at.
    pub(crate) fn terminate(&mut self, term: ir::Term) {
        let block = self.scopes.current_block();
        self.module.function_mut(self.current).set_term(block, term);
    }

    /// Returns the module-qualified name a call to `name` resolves
    /// against.
    pub(crate) fn mangled(&self, name: &str) -> String {
        format!("{}_{}", self.module.name, name)
    }
}
