//! An execution engine that runs SIR modules directly.
//!
//! The engine walks instruction arenas in block order, keeping one
//! frame per call. `printf` is the module's window to the outside
//! world: calls to the external declaration are serviced natively and
//! written to the engine's output sink.
//!
//! The engine assumes its input passed [`crate::verify`]; feeding it
//! unverified SIR may panic on out-of-range ids.

use std::io::Write;
use std::slice;

use slate_core::{Error, Result};

use crate::inst::{BinOp, Inst, Term, Value};
use crate::module::{FuncId, Function, InstId, Module};
use crate::types::Type;

/// Upper bound on nested calls before execution is aborted.
const CALL_DEPTH_LIMIT: usize = 256;

/// A value as seen at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum RtValue {
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    /// Address of a stack slot in the current frame.
    Ptr(usize),
    Unit,
}

/// One call frame: argument values, per-instruction results, and the
/// stack slots allocas have handed out.
struct Frame {
    args: Vec<RtValue>,
    results: Vec<Option<RtValue>>,
    cells: Vec<RtValue>,
}

/// Runs SIR functions against an output sink.
pub struct ExecutionEngine<'a> {
    module: &'a Module,
    out: &'a mut dyn Write,
    depth: usize,
}

impl<'a> ExecutionEngine<'a> {
    /// Creates an engine for `module` writing program output to `out`.
    pub fn new(module: &'a Module, out: &'a mut dyn Write) -> Self {
        Self {
            module,
            out,
            depth: 0,
        }
    }

    /// Runs the entry function, the one named after the module.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] if the entry function is missing or
    /// execution fails.
    pub fn run_entry(&mut self) -> Result<RtValue> {
        let Some(id) = self.module.find_function(&self.module.name) else {
            return Err(Error::Runtime(format!(
                "no entry function '{}'",
                self.module.name
            )));
        };
        self.run_function(id, &[])
    }

    /// Runs a function with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`] on division by zero, integer
    /// overflow, exceeding the call depth limit, or calling an
    /// external function the engine cannot service.
    pub fn run_function(&mut self, id: FuncId, args: &[RtValue]) -> Result<RtValue> {
        if self.depth >= CALL_DEPTH_LIMIT {
            return Err(Error::Runtime("call depth limit exceeded".to_string()));
        }
        self.depth += 1;
        let result = self.exec_function(id, args);
        self.depth -= 1;
        result
    }

    fn exec_function(&mut self, id: FuncId, args: &[RtValue]) -> Result<RtValue> {
        let module = self.module;
        let func = module.function(id);

        if func.is_declaration() {
            if func.name == "printf" {
                return self.native_printf(args);
            }
            return Err(Error::Runtime(format!(
                "external function '{}' has no definition",
                func.name
            )));
        }

        let mut frame = Frame {
            args: args.to_vec(),
            results: vec![None; func.insts.len()],
            cells: Vec::new(),
        };

        let mut block = &func.blocks[0];
        loop {
            for id in &block.insts {
                self.exec_inst(func, &mut frame, *id)?;
            }
            match block.term {
                Some(Term::Ret { value: Some(v) }) => return self.eval(&frame, v),
                Some(Term::Ret { value: None }) => return Ok(RtValue::Unit),
                Some(Term::Br { dest }) => block = func.block(dest),
                None => {
                    return Err(Error::Runtime(format!(
                        "block '{}' has no terminator",
                        block.label
                    )));
                }
            }
        }
    }

    fn exec_inst(&mut self, func: &Function, frame: &mut Frame, id: InstId) -> Result<()> {
        let result = match func.inst(id) {
            Inst::Alloca { ty, .. } => {
                let cell = match ty {
                    Type::F64 => RtValue::Float(0.0),
                    _ => RtValue::Int(0),
                };
                frame.cells.push(cell);
                RtValue::Ptr(frame.cells.len() - 1)
            }
            Inst::Load { addr, .. } => {
                let RtValue::Ptr(slot) = self.eval(frame, *addr)? else {
                    return Err(Error::Runtime("load from a non-pointer value".to_string()));
                };
                frame.cells[slot].clone()
            }
            Inst::Store { value, addr } => {
                let stored = self.eval(frame, *value)?;
                let RtValue::Ptr(slot) = self.eval(frame, *addr)? else {
                    return Err(Error::Runtime("store to a non-pointer value".to_string()));
                };
                frame.cells[slot] = stored;
                RtValue::Unit
            }
            Inst::Binary { op, lhs, rhs } => {
                let lhs = self.eval(frame, *lhs)?;
                let rhs = self.eval(frame, *rhs)?;
                apply_binary(*op, &lhs, &rhs)?
            }
            Inst::Call { callee, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(frame, *arg)?);
                }
                self.run_function(*callee, &values)?
            }
        };

        frame.results[id.index()] = Some(result);
        Ok(())
    }

    fn eval(&self, frame: &Frame, value: Value) -> Result<RtValue> {
        match value {
            Value::ConstInt(v) => Ok(RtValue::Int(v)),
            Value::ConstFloat(v) => Ok(RtValue::Float(v)),
            Value::Bytes(id) => Ok(RtValue::Bytes(self.module.byte_pool[id.index()].clone())),
            Value::Global(id) => Ok(RtValue::Bytes(self.module.globals[id.index()].init.clone())),
            Value::Param(i) => frame.args.get(i as usize).cloned().ok_or_else(|| {
                Error::Runtime(format!("missing argument for parameter {i}"))
            }),
            Value::Inst(id) => frame.results[id.index()]
                .clone()
                .ok_or_else(|| Error::Runtime(format!("use of %{} before it ran", id.0))),
        }
    }

    /// Services calls to the external `printf` declaration. Supports
    /// `%lld`, `%d`, `%f`, `%s` and `%%`; returns the number of bytes
    /// written, as the C function does.
    fn native_printf(&mut self, args: &[RtValue]) -> Result<RtValue> {
        let Some(RtValue::Bytes(format)) = args.first() else {
            return Err(Error::Runtime(
                "printf needs a byte-string format as its first argument".to_string(),
            ));
        };

        let mut output = Vec::new();
        let mut varargs = args[1..].iter();

        let mut i = 0;
        while i < format.len() {
            if format[i] != b'%' {
                output.push(format[i]);
                i += 1;
                continue;
            }

            let rest = &format[i + 1..];
            if rest.starts_with(b"%") {
                output.push(b'%');
                i += 2;
            } else if rest.starts_with(b"lld") {
                output.extend_from_slice(next_int(&mut varargs)?.to_string().as_bytes());
                i += 4;
            } else if rest.starts_with(b"d") {
                output.extend_from_slice(next_int(&mut varargs)?.to_string().as_bytes());
                i += 2;
            } else if rest.starts_with(b"f") {
                let value = next_float(&mut varargs)?;
                output.extend_from_slice(format!("{value:.6}").as_bytes());
                i += 2;
            } else if rest.starts_with(b"s") {
                match next_arg(&mut varargs)? {
                    RtValue::Bytes(bytes) => output.extend_from_slice(bytes),
                    other => {
                        return Err(Error::Runtime(format!(
                            "printf: %s needs a byte string, found {other:?}"
                        )));
                    }
                }
                i += 2;
            } else {
                return Err(Error::Runtime(format!(
                    "printf: unsupported directive at byte {i}"
                )));
            }
        }

        self.out.write_all(&output)?;
        Ok(RtValue::Int(output.len() as i64))
    }
}

fn next_arg<'v>(args: &mut slice::Iter<'v, RtValue>) -> Result<&'v RtValue> {
    args.next()
        .ok_or_else(|| Error::Runtime("printf: missing argument".to_string()))
}

fn next_int(args: &mut slice::Iter<'_, RtValue>) -> Result<i64> {
    match next_arg(args)? {
        RtValue::Int(v) => Ok(*v),
        other => Err(Error::Runtime(format!(
            "printf: expected an integer, found {other:?}"
        ))),
    }
}

fn next_float(args: &mut slice::Iter<'_, RtValue>) -> Result<f64> {
    match next_arg(args)? {
        RtValue::Float(v) => Ok(*v),
        other => Err(Error::Runtime(format!(
            "printf: expected a float, found {other:?}"
        ))),
    }
}

fn apply_binary(op: BinOp, lhs: &RtValue, rhs: &RtValue) -> Result<RtValue> {
    match (lhs, rhs) {
        (RtValue::Int(a), RtValue::Int(b)) => {
            if op == BinOp::Div && *b == 0 {
                return Err(Error::Runtime("division by zero".to_string()));
            }
            let result = match op {
                BinOp::Add => a.checked_add(*b),
                BinOp::Sub => a.checked_sub(*b),
                BinOp::Mul => a.checked_mul(*b),
                BinOp::Div => a.checked_div(*b),
            };
            result.map(RtValue::Int).ok_or_else(|| {
                Error::Runtime(format!("integer overflow in {}", op.mnemonic()))
            })
        }
        (RtValue::Float(a), RtValue::Float(b)) => {
            let result = match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
            };
            Ok(RtValue::Float(result))
        }
        _ => Err(Error::Runtime(format!(
            "{} on mismatched operand types",
            op.mnemonic()
        ))),
    }
}
