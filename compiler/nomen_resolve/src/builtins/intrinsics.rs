//! The standard intrinsic table.
//!
//! Types are the machine scalars (`Int1` ... `Int64`, `FPIEEE32`,
//! `FPIEEE64`, `RawPointer`, `ObjectPointer`). Values are operations named
//! `<op>_<Type>`, e.g. `add_Int64 : (Int64, Int64) -> Int64` and
//! `cmp_slt_Int32 : (Int32, Int32) -> Int1`.

use nomen_ir::{Name, Span};
use nomen_types::Idx;

use super::{SynthCx, SynthesizeBuiltin};
use crate::{Decl, ValueKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ScalarFamily {
    Integer,
    Float,
    Pointer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OpShape {
    /// `(T, T) -> T`
    Binary,
    /// `(T, T) -> Int1`
    Compare,
}

fn scalar_family(spelling: &str) -> Option<ScalarFamily> {
    match spelling {
        "Int1" | "Int8" | "Int16" | "Int32" | "Int64" => Some(ScalarFamily::Integer),
        "FPIEEE32" | "FPIEEE64" => Some(ScalarFamily::Float),
        "RawPointer" | "ObjectPointer" => Some(ScalarFamily::Pointer),
        _ => None,
    }
}

fn operation(op: &str) -> Option<(ScalarFamily, OpShape)> {
    let shape = match op {
        "add" | "sub" | "mul" | "sdiv" | "udiv" | "srem" | "urem" | "and" | "or" | "xor"
        | "shl" | "lshr" | "ashr" => (ScalarFamily::Integer, OpShape::Binary),
        "cmp_eq" | "cmp_ne" | "cmp_slt" | "cmp_sle" | "cmp_sgt" | "cmp_sge" | "cmp_ult"
        | "cmp_ule" | "cmp_ugt" | "cmp_uge" => (ScalarFamily::Integer, OpShape::Compare),
        "fadd" | "fsub" | "fmul" | "fdiv" | "frem" => (ScalarFamily::Float, OpShape::Binary),
        "fcmp_oeq" | "fcmp_one" | "fcmp_olt" | "fcmp_ole" | "fcmp_ogt" | "fcmp_oge" => {
            (ScalarFamily::Float, OpShape::Compare)
        }
        _ => return None,
    };
    Some(shape)
}

/// Built-in synthesizer for the machine scalar types and their operations.
#[derive(Copy, Clone, Debug, Default)]
pub struct Intrinsics;

impl SynthesizeBuiltin for Intrinsics {
    fn builtin_type(&self, name: Name, cx: &mut SynthCx<'_>) -> Option<Idx> {
        scalar_family(cx.interner.lookup(name))?;
        Some(cx.types.builtin(name))
    }

    fn builtin_value(&self, name: Name, cx: &mut SynthCx<'_>) -> Option<Decl> {
        let spelling = cx.interner.lookup(name);
        let (op, ty_spelling) = spelling.rsplit_once('_')?;
        let (family, shape) = operation(op)?;
        if scalar_family(ty_spelling)? != family {
            return None;
        }

        let operand = cx.types.builtin(cx.interner.intern(ty_spelling));
        let ret = match shape {
            OpShape::Binary => operand,
            OpShape::Compare => cx.types.builtin(cx.interner.intern("Int1")),
        };
        let signature = cx.types.function2(operand, operand, ret);
        Some(Decl::value(name, ValueKind::Func, signature, Span::DUMMY))
    }
}
