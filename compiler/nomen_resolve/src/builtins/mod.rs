//! Compiler built-ins.
//!
//! The builtin module has no source. Its symbols are synthesized from their
//! names the first time a qualified lookup asks for them and memoized in a
//! [`BuiltinCache`]. Types and values share one memo table, so a name can
//! never be both a built-in type and a built-in value.

use nomen_ir::{Name, Span, StringInterner};
use nomen_types::{Idx, Pool};
use rustc_hash::FxHashMap;

use crate::module::LookupCx;
use crate::{Decl, DeclId, LookupKind};

mod intrinsics;

pub use intrinsics::Intrinsics;

/// Context handed to a [`SynthesizeBuiltin`] implementation.
pub struct SynthCx<'a> {
    pub interner: &'a StringInterner,
    pub types: &'a mut Pool,
}

/// Source of compiler-intrinsic symbols, keyed by name.
///
/// Implementations must be pure: the same name always yields an
/// equivalent result.
pub trait SynthesizeBuiltin {
    /// The built-in type spelled `name`, if there is one.
    fn builtin_type(&self, name: Name, cx: &mut SynthCx<'_>) -> Option<Idx>;

    /// The built-in value spelled `name`, if there is one.
    fn builtin_value(&self, name: Name, cx: &mut SynthCx<'_>) -> Option<Decl>;
}

/// Memo table for synthesized built-ins.
#[derive(Debug, Default)]
pub(crate) struct BuiltinCache {
    entries: FxHashMap<Name, DeclId>,
}

impl BuiltinCache {
    pub(crate) fn lookup_type(
        &mut self,
        name: Name,
        kind: LookupKind,
        cx: &mut LookupCx<'_>,
    ) -> Option<DeclId> {
        if !kind.allows_builtins() {
            return None;
        }

        let entry = match self.entries.get(&name) {
            Some(&entry) => entry,
            None => {
                let mut synth = SynthCx {
                    interner: cx.interner,
                    types: &mut *cx.types,
                };
                let ty = cx.builtins.builtin_type(name, &mut synth)?;
                let entry = cx.decls.alloc(Decl::type_decl(name, ty, Span::DUMMY));
                let spelling = cx.interner.lookup(name);
                tracing::debug!(name = spelling, ?entry, "synthesized builtin type");
                self.entries.insert(name, entry);
                entry
            }
        };

        cx.decls[entry].is_type().then_some(entry)
    }

    pub(crate) fn lookup_value(
        &mut self,
        name: Name,
        kind: LookupKind,
        cx: &mut LookupCx<'_>,
        result: &mut Vec<DeclId>,
    ) {
        if !kind.allows_builtins() {
            return;
        }

        let entry = match self.entries.get(&name) {
            Some(&entry) => entry,
            None => {
                let mut synth = SynthCx {
                    interner: cx.interner,
                    types: &mut *cx.types,
                };
                let Some(decl) = cx.builtins.builtin_value(name, &mut synth) else {
                    return;
                };
                let entry = cx.decls.alloc(decl);
                let spelling = cx.interner.lookup(name);
                tracing::debug!(name = spelling, ?entry, "synthesized builtin value");
                self.entries.insert(name, entry);
                entry
            }
        };

        if cx.decls[entry].is_value() {
            result.push(entry);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests;
