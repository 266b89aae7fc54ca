//! Statement lowering.

use slate_core::Result;
use slate_ir as ir;
use slate_parser::Statement;

use crate::lowering::core::Lowering;

impl Lowering {
    /// Lowers a statement, returning whatever value it produced.
    /// Statement results are discarded by the enclosing block; they
    /// matter only to the tests that inspect them.
    pub(crate) fn lower_statement(&mut self, statement: &Statement) -> Result<Option<ir::Value>> {
        match statement {
            Statement::Expression { expression, .. } => self.lower_expression(expression),

            // Return records the pending value; the terminator itself
            // is emitted by the function assembler, so a later return
            // in the same body simply overwrites the slot.
            Statement::Return { value, .. } => {
                let lowered = self.lower_expression(value)?;
                self.scopes.set_return_value(lowered);
                Ok(lowered)
            }

            // A comment re-writes the pending return value unchanged.
            Statement::Comment { .. } => {
                let pending = self.scopes.return_value();
                self.scopes.set_return_value(pending);
                Ok(None)
            }

            Statement::VariableDeclaration {
                name,
                initializer,
                span,
                ..
            } => {
                let slot = self.emit(ir::Inst::Alloca {
                    name: name.clone(),
                    ty: ir::Type::I64,
                });
                self.scopes.bind(name.clone(), slot);

                if let Some(init) = initializer {
                    self.lower_assign(name, init, *span)?;
                }
                Ok(Some(slot))
            }

            Statement::Function(decl) => {
                self.lower_function(decl)?;
                Ok(None)
            }
        }
    }
}
