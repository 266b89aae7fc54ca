//! Expression lowering.

use slate_core::{Error, Result, Span};
use slate_ir as ir;
use slate_parser::{BinaryOperator, Expression};

use crate::lowering::core::Lowering;

impl Lowering {
    /// Lowers an expression.
    ///
    /// `Ok(None)` means the expression produced no value, which is
    /// legal in statement position and an error everywhere a value is
    /// consumed.
    pub(crate) fn lower_expression(&mut self, expr: &Expression) -> Result<Option<ir::Value>> {
        match expr {
            Expression::Integer { value, .. } => Ok(Some(ir::Value::ConstInt(*value))),

            Expression::Float { value, .. } => Ok(Some(ir::Value::ConstFloat(*value))),

            Expression::String { value, .. } => {
                let id = self.module.const_bytes(value.clone().into_bytes());
                Ok(Some(ir::Value::Bytes(id)))
            }

            // A name that is already bound loads through its slot. An
            // unbound name declares itself instead and yields nothing;
            // only a later use produces a value.
            Expression::Variable { name, .. } => match self.scopes.lookup(name) {
                Some(slot) => {
                    let loaded = self.emit(ir::Inst::Load {
                        ty: ir::Type::I64,
                        addr: slot,
                    });
                    Ok(Some(loaded))
                }
                None => {
                    let slot = self.emit(ir::Inst::Alloca {
                        name: name.clone(),
                        ty: ir::Type::I64,
                    });
                    self.scopes.bind(name.clone(), slot);
                    Ok(None)
                }
            },

            Expression::Call {
                callee,
                arguments,
                span,
            } => self.lower_call(callee, arguments, *span).map(Some),

            Expression::Binary {
                left,
                operator,
                right,
                span,
            } => self.lower_binary(left, *operator, right, *span).map(Some),

            Expression::Assign { target, value, span } => {
                self.lower_assign(target, value, *span).map(Some)
            }
        }
    }

    /// Lowers a call. The callee resolves against the module-qualified
    /// name before any argument is lowered, so a bad callee leaves no
    /// partial argument code behind.
    fn lower_call(
        &mut self,
        callee: &str,
        arguments: &[Expression],
        span: Span,
    ) -> Result<ir::Value> {
        let mangled = self.mangled(callee);
        let Some(func) = self.module.find_function(&mangled) else {
            return Err(Error::UnresolvedCall(mangled, span));
        };

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let value = self
                .lower_expression(argument)?
                .ok_or_else(|| Error::MissingValue(argument.span()))?;
            args.push(value);
        }

        Ok(self.emit(ir::Inst::Call { callee: func, args }))
    }

    /// Lowers a binary operation. The operator is checked before the
    /// operands so an unsupported one rejects without emitting either
    /// side.
    fn lower_binary(
        &mut self,
        left: &Expression,
        operator: BinaryOperator,
        right: &Expression,
        span: Span,
    ) -> Result<ir::Value> {
        let op = match operator {
            BinaryOperator::Add => ir::BinOp::Add,
            BinaryOperator::Subtract => ir::BinOp::Sub,
            BinaryOperator::Multiply => ir::BinOp::Mul,
            BinaryOperator::Divide => ir::BinOp::Div,
            other => return Err(Error::UnsupportedOperator(other.to_string(), span)),
        };

        let lhs = self
            .lower_expression(left)?
            .ok_or_else(|| Error::MissingValue(left.span()))?;
        let rhs = self
            .lower_expression(right)?
            .ok_or_else(|| Error::MissingValue(right.span()))?;

        Ok(self.emit(ir::Inst::Binary { op, lhs, rhs }))
    }

    /// Lowers an assignment: value first, then the target lookup.
    /// Assigning to a name that was never declared is an error; reads
    /// declare implicitly, writes do not.
    pub(crate) fn lower_assign(
        &mut self,
        target: &str,
        value: &Expression,
        span: Span,
    ) -> Result<ir::Value> {
        let stored = self
            .lower_expression(value)?
            .ok_or_else(|| Error::MissingValue(value.span()))?;

        let Some(slot) = self.scopes.lookup(target) else {
            return Err(Error::UndeclaredVariable(target.to_string(), span));
        };

        self.emit(ir::Inst::Store {
            value: stored,
            addr: slot,
        });
        Ok(stored)
    }
}
