//! Runtime support injected into every module.

use slate_ir as ir;

/// Installs the runtime primitives: the external variadic `printf`
/// declaration, a private format global, and an internal
/// `<module>_println` wrapper taking one integer.
///
/// The wrapper is assembled directly rather than lowered from an AST,
/// so it leaves the scope stack untouched.
pub(crate) fn install(module: &mut ir::Module) {
    let printf = module.declare_function(
        "printf",
        ir::Signature::variadic(vec![ir::Type::Bytes], ir::Type::I64),
    );
    let format = module.add_global(".str", ir::Linkage::Internal, b"%lld\n".to_vec());

    let mut func = ir::Function::new(
        format!("{}_println", module.name),
        ir::Signature::new(vec![ir::Type::I64], ir::Type::Void),
        ir::Linkage::Internal,
    );
    func.set_param_name(0, "value");

    let entry = func.append_block("entry");
    // printf's byte count is dropped; println itself returns nothing.
    func.push_inst(
        entry,
        ir::Inst::Call {
            callee: printf,
            args: vec![ir::Value::Global(format), ir::Value::Param(0)],
        },
    );
    func.set_term(entry, ir::Term::Ret { value: None });

    module.add_function(func);
}
