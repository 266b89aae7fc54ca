//! Program and function lowering.

use slate_core::Result;
use slate_ir as ir;
use slate_parser::{FunctionDecl, Program};

use crate::lowering::core::Lowering;

impl Lowering {
    /// Lowers a complete program into the module and verifies the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns a lowering error for unresolved calls, unsupported
    /// operators, undeclared assignment targets and valueless operands,
    /// or a verification error when the assembled module is malformed
    /// (a body without a return, for instance). On error no module
    /// should be taken from this lowering.
    pub fn lower_program(&mut self, program: &Program) -> Result<()> {
        self.scopes.push(self.entry_block);

        for statement in &program.block.statements {
            self.lower_statement(statement)?;
        }

        // The entry function returns void unconditionally; a pending
        // top-level return value is dropped on the floor.
        self.terminate(ir::Term::Ret { value: None });
        self.scopes.pop();
        debug_assert!(self.scopes.is_empty(), "scope pushes and pops must balance");

        ir::verify(&self.module)
    }

    /// Lowers one function declaration.
    ///
    /// The function is registered in the module before its body is
    /// lowered, so a body may call itself. Calls to it from elsewhere
    /// resolve only once this declaration has been processed;
    /// resolution is single-pass and declaration order matters.
    pub(crate) fn lower_function(&mut self, decl: &FunctionDecl) -> Result<ir::FuncId> {
        let linkage = if decl.external {
            ir::Linkage::External
        } else {
            ir::Linkage::Internal
        };

        // Parameters and return are 64-bit integers regardless of what
        // the annotations said.
        let mut func = ir::Function::new(
            self.mangled(&decl.name),
            ir::Signature::uniform(decl.params.len()),
            linkage,
        );
        for (i, param) in decl.params.iter().enumerate() {
            func.set_param_name(i, param.name.clone());
        }
        let body = func.append_block("entry");

        let id = self.module.add_function(func);
        let previous = self.current;
        self.current = id;
        self.scopes.push(body);

        // Each parameter gets a backing slot so that reads and writes
        // go through memory like any other variable.
        for (i, param) in decl.params.iter().enumerate() {
            let slot = self.emit(ir::Inst::Alloca {
                name: param.name.clone(),
                ty: ir::Type::I64,
            });
            self.emit(ir::Inst::Store {
                value: ir::Value::Param(i as u32),
                addr: slot,
            });
            self.scopes.bind(param.name.clone(), slot);
        }

        for statement in &decl.body.statements {
            self.lower_statement(statement)?;
        }

        // Whatever the body left in the return slot becomes the
        // terminator. A body that never set it returns void from an
        // integer function, which verification rejects.
        let value = self.scopes.return_value();
        self.terminate(ir::Term::Ret { value });

        self.scopes.pop();
        self.current = previous;
        Ok(id)
    }
}
