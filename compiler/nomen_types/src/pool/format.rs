//! Human-readable type rendering.

use nomen_ir::StringLookup;

use super::{Pool, TypeData};
use crate::Idx;

impl Pool {
    /// Render a type the way it would be written in source.
    ///
    /// Aliases render by their own name, not their target.
    pub fn display<I: StringLookup + ?Sized>(&self, idx: Idx, interner: &I) -> String {
        let mut out = String::new();
        self.write_type(idx, interner, &mut out);
        out
    }

    fn write_type<I: StringLookup + ?Sized>(&self, idx: Idx, interner: &I, out: &mut String) {
        match self.data(idx) {
            TypeData::Error => out.push_str("<error>"),
            TypeData::Builtin(name) => {
                out.push_str("Builtin.");
                out.push_str(interner.lookup(name));
            }
            TypeData::Nominal { name, .. } | TypeData::Alias { name, .. } => {
                out.push_str(interner.lookup(name));
            }
            TypeData::Tuple(elems) => self.write_list(&elems, interner, out),
            TypeData::Function { params, ret } => {
                self.write_list(&params, interner, out);
                out.push_str(" -> ");
                self.write_type(ret, interner, out);
            }
        }
    }

    fn write_list<I: StringLookup + ?Sized>(&self, elems: &[Idx], interner: &I, out: &mut String) {
        out.push('(');
        for (i, &elem) in elems.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(elem, interner, out);
        }
        out.push(')');
    }
}
