//! Structural and type checks for SIR modules.
//!
//! Verification runs after lowering and before anything consumes a
//! module. It never panics on malformed input; every problem becomes a
//! finding, and all findings are reported together.

use std::collections::HashSet;

use slate_core::{Error, Result};

use crate::inst::{Inst, Term, Value};
use crate::module::{FuncId, Function, Module};
use crate::types::{Linkage, Type};

/// Checks a module and reports every violation at once.
///
/// # Errors
///
/// Returns [`Error::Verify`] with one line per finding when the module
/// is malformed.
pub fn verify(module: &Module) -> Result<()> {
    let mut verifier = Verifier {
        module,
        findings: Vec::new(),
    };
    verifier.check_module();

    if verifier.findings.is_empty() {
        Ok(())
    } else {
        Err(Error::Verify(verifier.findings.join("\n")))
    }
}

struct Verifier<'a> {
    module: &'a Module,
    findings: Vec<String>,
}

impl Verifier<'_> {
    fn check_module(&mut self) {
        let mut seen = HashSet::new();
        for func in &self.module.functions {
            if !seen.insert(func.name.as_str()) {
                self.findings
                    .push(format!("duplicate function name '{}'", func.name));
            }
        }

        for func in &self.module.functions {
            self.check_function(func);
        }
    }

    fn note(&mut self, func: &Function, msg: String) {
        self.findings.push(format!("function '{}': {msg}", func.name));
    }

    fn check_function(&mut self, func: &Function) {
        if func.is_declaration() {
            if func.linkage == Linkage::Internal {
                self.note(func, "internal function has no body".to_string());
            }
            return;
        }

        // Values become visible in arena order as blocks execute top to
        // bottom; bodies are straight-line, so no dominance analysis.
        let mut defined = vec![false; func.insts.len()];

        for block in &func.blocks {
            for id in &block.insts {
                let Some(inst) = func.insts.get(id.index()) else {
                    self.note(
                        func,
                        format!("block '{}' references unknown instruction %{}", block.label, id.0),
                    );
                    continue;
                };
                self.check_inst(func, inst, &defined);
                defined[id.index()] = true;
            }

            match block.term {
                None => self.note(func, format!("block '{}' has no terminator", block.label)),
                Some(Term::Br { dest }) => {
                    if dest.index() >= func.blocks.len() {
                        self.note(func, format!("block '{}' branches to an unknown block", block.label));
                    }
                }
                Some(Term::Ret { value }) => self.check_ret(func, value, &defined),
            }
        }
    }

    fn check_ret(&mut self, func: &Function, value: Option<Value>, defined: &[bool]) {
        match value {
            None => {
                if !func.sig.ret.is_void() {
                    self.note(
                        func,
                        format!("missing return value in function returning {}", func.sig.ret),
                    );
                }
            }
            Some(v) => {
                let Some(ty) = self.check_operand(func, v, defined) else {
                    return;
                };
                if func.sig.ret.is_void() {
                    self.note(func, "void function returns a value".to_string());
                } else if ty != func.sig.ret {
                    self.note(
                        func,
                        format!("return type mismatch: expected {}, found {ty}", func.sig.ret),
                    );
                }
            }
        }
    }

    fn check_inst(&mut self, func: &Function, inst: &Inst, defined: &[bool]) {
        match inst {
            Inst::Alloca { name, ty } => {
                if ty.is_void() {
                    self.note(func, format!("alloca '{name}' of void"));
                }
            }
            Inst::Load { ty, addr } => {
                if ty.is_void() {
                    self.note(func, "load of void".to_string());
                }
                if let Some(addr_ty) = self.check_operand(func, *addr, defined) {
                    if addr_ty != Type::Ptr {
                        self.note(func, format!("load address is not a pointer (found {addr_ty})"));
                    }
                }
                if let Some(pointee) = pointee_type(func, *addr) {
                    if *ty != pointee {
                        self.note(func, format!("load of {ty} from {pointee} storage"));
                    }
                }
            }
            Inst::Store { value, addr } => {
                if let Some(ty) = self.check_operand(func, *value, defined) {
                    if ty.is_void() {
                        self.note(func, "store of a void value".to_string());
                    } else if let Some(pointee) = pointee_type(func, *addr) {
                        if ty != pointee {
                            self.note(func, format!("store of {ty} into {pointee} storage"));
                        }
                    }
                }
                if let Some(addr_ty) = self.check_operand(func, *addr, defined) {
                    if addr_ty != Type::Ptr {
                        self.note(func, format!("store address is not a pointer (found {addr_ty})"));
                    }
                }
            }
            Inst::Binary { op, lhs, rhs } => {
                let lhs_ty = self.check_operand(func, *lhs, defined);
                let rhs_ty = self.check_operand(func, *rhs, defined);
                if let (Some(lt), Some(rt)) = (lhs_ty, rhs_ty) {
                    if lt != rt {
                        self.note(
                            func,
                            format!("{} operand types differ: {lt} vs {rt}", op.mnemonic()),
                        );
                    } else if lt != Type::I64 && lt != Type::F64 {
                        self.note(func, format!("{} on non-arithmetic type {lt}", op.mnemonic()));
                    }
                }
            }
            Inst::Call { callee, args } => self.check_call(func, *callee, args, defined),
        }
    }

    fn check_call(&mut self, func: &Function, callee: FuncId, args: &[Value], defined: &[bool]) {
        let Some(target) = self.module.functions.get(callee.index()) else {
            self.note(func, "call to an unknown function".to_string());
            return;
        };

        let fixed = target.sig.params.len();
        let arity_ok = if target.sig.variadic {
            args.len() >= fixed
        } else {
            args.len() == fixed
        };
        if !arity_ok {
            self.note(
                func,
                format!(
                    "call to '{}' expects {}{} arguments, found {}",
                    target.name,
                    if target.sig.variadic { "at least " } else { "" },
                    fixed,
                    args.len()
                ),
            );
        }

        for (i, arg) in args.iter().enumerate() {
            let Some(ty) = self.check_operand(func, *arg, defined) else {
                continue;
            };
            if ty.is_void() {
                self.note(func, format!("void argument in call to '{}'", target.name));
            } else if let Some(expected) = target.sig.params.get(i) {
                if ty != *expected {
                    self.note(
                        func,
                        format!(
                            "argument {} of call to '{}' has type {ty}, expected {expected}",
                            i + 1,
                            target.name
                        ),
                    );
                }
            }
        }
    }

    /// Validates one operand and returns its type, or `None` after
    /// noting a finding.
    fn check_operand(&mut self, func: &Function, value: Value, defined: &[bool]) -> Option<Type> {
        match value {
            Value::ConstInt(_) | Value::ConstFloat(_) => {}
            Value::Bytes(id) => {
                if id.index() >= self.module.byte_pool.len() {
                    self.note(func, format!("unknown byte constant bytes.{}", id.0));
                    return None;
                }
            }
            Value::Global(id) => {
                if id.index() >= self.module.globals.len() {
                    self.note(func, format!("unknown global @{}", id.0));
                    return None;
                }
            }
            Value::Param(i) => {
                if i as usize >= func.sig.params.len() {
                    self.note(func, format!("parameter index {i} out of range"));
                    return None;
                }
            }
            Value::Inst(id) => {
                if id.index() >= func.insts.len() {
                    self.note(func, format!("use of unknown value %{}", id.0));
                    return None;
                }
                if !defined[id.index()] {
                    self.note(func, format!("use of %{} before its definition", id.0));
                    return None;
                }
            }
        }
        self.type_of(func, value)
    }

    /// Range-checked twin of [`crate::Module::value_type`]; safe on
    /// malformed modules.
    fn type_of(&self, func: &Function, value: Value) -> Option<Type> {
        match value {
            Value::ConstInt(_) => Some(Type::I64),
            Value::ConstFloat(_) => Some(Type::F64),
            Value::Bytes(_) | Value::Global(_) => Some(Type::Bytes),
            Value::Param(i) => func.sig.params.get(i as usize).copied(),
            Value::Inst(id) => match func.insts.get(id.index())? {
                Inst::Alloca { .. } => Some(Type::Ptr),
                Inst::Load { ty, .. } => Some(*ty),
                Inst::Store { .. } => Some(Type::Void),
                Inst::Binary { lhs, .. } => self.type_of(func, *lhs),
                Inst::Call { callee, .. } => {
                    self.module.functions.get(callee.index()).map(|f| f.sig.ret)
                }
            },
        }
    }
}

/// The declared type behind an address, when the address is a known
/// alloca. Other addresses carry no pointee type to check against.
fn pointee_type(func: &Function, addr: Value) -> Option<Type> {
    match addr {
        Value::Inst(id) => match func.insts.get(id.index())? {
            Inst::Alloca { ty, .. } => Some(*ty),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inst::BinOp;
    use crate::types::Signature;
    use crate::module::InstId;

    fn module_with(func: Function) -> Module {
        let mut module = Module::new("demo");
        module.add_function(func);
        module
    }

    #[test]
    fn test_verified_module_passes() {
        let mut module = Module::new("demo");
        let printf =
            module.declare_function("printf", Signature::variadic(vec![Type::Bytes], Type::I64));
        let fmt = module.const_bytes(b"%lld\n".to_vec());

        let mut func = Function::new(
            "demo".to_string(),
            Signature::new(vec![], Type::Void),
            Linkage::External,
        );
        let entry = func.append_block("entry");
        func.push_inst(
            entry,
            Inst::Call {
                callee: printf,
                args: vec![Value::Bytes(fmt), Value::ConstInt(42)],
            },
        );
        func.set_term(entry, Term::Ret { value: None });
        module.add_function(func);

        assert!(verify(&module).is_ok());
    }

    #[test]
    fn test_unterminated_block_is_rejected() {
        let mut func = Function::new(
            "demo".to_string(),
            Signature::new(vec![], Type::Void),
            Linkage::External,
        );
        func.append_block("entry");

        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("no terminator"));
    }

    #[test]
    fn test_missing_return_value_is_rejected() {
        let mut func = Function::new("f".to_string(), Signature::uniform(0), Linkage::External);
        let entry = func.append_block("entry");
        func.set_term(entry, Term::Ret { value: None });

        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("missing return value"));
    }

    #[test]
    fn test_return_type_mismatch_is_rejected() {
        let mut func = Function::new("f".to_string(), Signature::uniform(0), Linkage::External);
        let entry = func.append_block("entry");
        func.set_term(
            entry,
            Term::Ret {
                value: Some(Value::ConstFloat(1.0)),
            },
        );

        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("return type mismatch"));
    }

    #[test]
    fn test_use_before_definition_is_rejected() {
        let mut func = Function::new("f".to_string(), Signature::uniform(0), Linkage::External);
        let entry = func.append_block("entry");
        // Reference %1 from %0 by assembling the arena by hand.
        func.insts.push(Inst::Binary {
            op: BinOp::Add,
            lhs: Value::Inst(InstId(1)),
            rhs: Value::ConstInt(1),
        });
        func.insts.push(Inst::Binary {
            op: BinOp::Add,
            lhs: Value::ConstInt(1),
            rhs: Value::ConstInt(1),
        });
        func.blocks[entry.index()].insts = vec![InstId(0), InstId(1)];
        func.set_term(
            entry,
            Term::Ret {
                value: Some(Value::Inst(InstId(0))),
            },
        );

        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("before its definition"));
    }

    #[test]
    fn test_duplicate_function_names_are_rejected() {
        let mut module = Module::new("demo");
        module.declare_function("f", Signature::uniform(0));
        module.declare_function("f", Signature::uniform(1));

        let err = verify(&module).unwrap_err();
        assert!(err.to_string().contains("duplicate function name 'f'"));
    }

    #[test]
    fn test_internal_declaration_is_rejected() {
        let func = Function::new("f".to_string(), Signature::uniform(0), Linkage::Internal);
        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("has no body"));
    }

    #[test]
    fn test_variadic_arity_is_a_lower_bound() {
        let mut module = Module::new("demo");
        let printf =
            module.declare_function("printf", Signature::variadic(vec![Type::Bytes], Type::I64));

        let mut func = Function::new(
            "demo".to_string(),
            Signature::new(vec![], Type::Void),
            Linkage::External,
        );
        let entry = func.append_block("entry");
        func.push_inst(
            entry,
            Inst::Call {
                callee: printf,
                args: vec![],
            },
        );
        func.set_term(entry, Term::Ret { value: None });
        module.add_function(func);

        let err = verify(&module).unwrap_err();
        assert!(err.to_string().contains("at least 1 arguments"));
    }

    #[test]
    fn test_store_needs_pointer_address() {
        let mut func = Function::new(
            "demo".to_string(),
            Signature::new(vec![], Type::Void),
            Linkage::External,
        );
        let entry = func.append_block("entry");
        func.push_inst(
            entry,
            Inst::Store {
                value: Value::ConstInt(1),
                addr: Value::ConstInt(2),
            },
        );
        func.set_term(entry, Term::Ret { value: None });

        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("store address is not a pointer"));
    }

    #[test]
    fn test_store_must_match_alloca_type() {
        let mut func = Function::new(
            "demo".to_string(),
            Signature::new(vec![], Type::Void),
            Linkage::External,
        );
        let entry = func.append_block("entry");
        let slot = func.push_inst(
            entry,
            Inst::Alloca {
                name: "x".to_string(),
                ty: Type::I64,
            },
        );
        func.push_inst(
            entry,
            Inst::Store {
                value: Value::ConstFloat(1.5),
                addr: slot,
            },
        );
        func.set_term(entry, Term::Ret { value: None });

        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("store of f64 into i64 storage"));
    }

    #[test]
    fn test_binary_operand_types_must_match() {
        let mut func = Function::new("f".to_string(), Signature::uniform(0), Linkage::External);
        let entry = func.append_block("entry");
        let v = func.push_inst(
            entry,
            Inst::Binary {
                op: BinOp::Div,
                lhs: Value::ConstInt(1),
                rhs: Value::ConstFloat(2.0),
            },
        );
        func.set_term(entry, Term::Ret { value: Some(v) });

        let err = verify(&module_with(func)).unwrap_err();
        assert!(err.to_string().contains("operand types differ"));
    }
}
