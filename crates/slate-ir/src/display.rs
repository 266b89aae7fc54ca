//! Textual form of SIR modules, used for build artifacts and
//! debugging.

use std::fmt;

use crate::inst::{Inst, Term, Value};
use crate::module::{Function, InstId, Module};

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module {}", self.name)?;

        if !self.byte_pool.is_empty() {
            writeln!(f)?;
            for (i, bytes) in self.byte_pool.iter().enumerate() {
                write!(f, "bytes.{i} = ")?;
                write_bytes(f, bytes)?;
                writeln!(f)?;
            }
        }

        if !self.globals.is_empty() {
            writeln!(f)?;
            for global in &self.globals {
                write!(f, "global @{} = {} ", global.name, global.linkage)?;
                write_bytes(f, &global.init)?;
                writeln!(f)?;
            }
        }

        for func in &self.functions {
            writeln!(f)?;
            self.write_function(f, func)?;
        }

        Ok(())
    }
}

impl Module {
    fn write_function(&self, f: &mut fmt::Formatter<'_>, func: &Function) -> fmt::Result {
        if func.is_declaration() {
            return writeln!(f, "declare {} {}{}", func.linkage, func.name, func.sig);
        }

        write!(f, "define {} {}(", func.linkage, func.name)?;
        for (i, ty) in func.sig.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{ty} %{}", func.param_names[i])?;
        }
        writeln!(f, ") -> {} {{", func.sig.ret)?;

        for block in &func.blocks {
            writeln!(f, "{}:", block.label)?;
            for id in &block.insts {
                write!(f, "  ")?;
                self.write_inst(f, func, *id, func.inst(*id))?;
                writeln!(f)?;
            }
            write!(f, "  ")?;
            match block.term {
                Some(Term::Ret { value: Some(v) }) => {
                    write!(f, "ret ")?;
                    self.write_value(f, func, v)?;
                }
                Some(Term::Ret { value: None }) => write!(f, "ret void")?,
                Some(Term::Br { dest }) => {
                    write!(f, "br {}", func.block(dest).label)?;
                }
                None => write!(f, "<no terminator>")?,
            }
            writeln!(f)?;
        }

        writeln!(f, "}}")
    }

    fn write_inst(
        &self,
        f: &mut fmt::Formatter<'_>,
        func: &Function,
        id: InstId,
        inst: &Inst,
    ) -> fmt::Result {
        match inst {
            Inst::Alloca { name, ty } => {
                write!(f, "%{} = alloca {ty} ; {name}", id.0)
            }
            Inst::Load { ty, addr } => {
                write!(f, "%{} = load {ty}, ", id.0)?;
                self.write_value(f, func, *addr)
            }
            Inst::Store { value, addr } => {
                write!(f, "store ")?;
                self.write_value(f, func, *value)?;
                write!(f, ", ")?;
                self.write_value(f, func, *addr)
            }
            Inst::Binary { op, lhs, rhs } => {
                write!(f, "%{} = {} ", id.0, op.mnemonic())?;
                self.write_value(f, func, *lhs)?;
                write!(f, ", ")?;
                self.write_value(f, func, *rhs)
            }
            Inst::Call { callee, args } => {
                let target = self.function(*callee);
                if !target.sig.ret.is_void() {
                    write!(f, "%{} = ", id.0)?;
                }
                write!(f, "call {}(", target.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    self.write_value(f, func, *arg)?;
                }
                write!(f, ")")
            }
        }
    }

    fn write_value(&self, f: &mut fmt::Formatter<'_>, func: &Function, value: Value) -> fmt::Result {
        match value {
            Value::ConstInt(v) => write!(f, "{v}"),
            Value::ConstFloat(v) => write!(f, "{v:?}"),
            Value::Bytes(id) => write!(f, "bytes.{}", id.0),
            Value::Global(id) => write!(f, "@{}", self.globals[id.index()].name),
            Value::Param(i) => {
                let name = func.param_names.get(i as usize).map_or("?", String::as_str);
                write!(f, "%{name}")
            }
            Value::Inst(id) => write!(f, "%{}", id.0),
        }
    }
}

fn write_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    write!(f, "\"")?;
    for &b in bytes {
        match b {
            b'\n' => write!(f, "\\n")?,
            b'\t' => write!(f, "\\t")?,
            b'\r' => write!(f, "\\r")?,
            b'"' => write!(f, "\\\"")?,
            b'\\' => write!(f, "\\\\")?,
            0x20..=0x7e => write!(f, "{}", b as char)?,
            _ => write!(f, "\\x{b:02x}")?,
        }
    }
    write!(f, "\"")
}
