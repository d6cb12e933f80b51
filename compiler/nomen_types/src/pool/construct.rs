//! Type construction helpers for the Pool.
//!
//! Every constructor computes the canonical form of the new type before
//! interning it, interning the canonical form first when it differs.

use nomen_ir::Name;
use smallvec::SmallVec;

use super::Pool;
use crate::{Idx, Tag};

impl Pool {
    /// Create a compiler-intrinsic scalar type.
    pub fn builtin(&mut self, name: Name) -> Idx {
        self.intern(Tag::Builtin, &[name.raw()], None)
    }

    /// Create a nominal type `name` declared in the module `owner`.
    ///
    /// The same spelling declared in two modules gives two distinct types.
    pub fn nominal(&mut self, owner: Name, name: Name) -> Idx {
        self.intern(Tag::Nominal, &[owner.raw(), name.raw()], None)
    }

    /// Create an alias `name = target`.
    ///
    /// An alias of the error type is canonically the error type.
    pub fn alias(&mut self, name: Name, target: Idx) -> Idx {
        let canonical = self.canonical_type(target);
        tracing::trace!(?name, ?target, ?canonical, "interning alias");
        self.intern(Tag::Alias, &[name.raw(), target.raw()], Some(canonical))
    }

    /// Create a tuple type `(elems...)`.
    ///
    /// Empty tuples return `Idx::UNIT`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tuple(&mut self, elems: &[Idx]) -> Idx {
        if elems.is_empty() {
            return Idx::UNIT;
        }

        let canonical_elems = self.canonicalize_all(elems);
        let canonical = if canonical_elems.as_slice() == elems {
            None
        } else {
            Some(self.tuple(&canonical_elems))
        };

        // Layout: [elem_count, elem0, elem1, ...]
        let mut extra: SmallVec<[u32; 4]> = SmallVec::with_capacity(elems.len() + 1);
        extra.push(elems.len() as u32);
        extra.extend(elems.iter().map(|e| e.raw()));
        self.intern(Tag::Tuple, &extra, canonical)
    }

    /// Create a function type `(params...) -> ret`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn function(&mut self, params: &[Idx], ret: Idx) -> Idx {
        let canonical_params = self.canonicalize_all(params);
        let canonical_ret = self.canonical_type(ret);
        let canonical = if canonical_params.as_slice() == params && canonical_ret == ret {
            None
        } else {
            Some(self.function(&canonical_params, canonical_ret))
        };

        // Layout: [param_count, param0, param1, ..., return_type]
        let mut extra: SmallVec<[u32; 4]> = SmallVec::with_capacity(params.len() + 2);
        extra.push(params.len() as u32);
        extra.extend(params.iter().map(|p| p.raw()));
        extra.push(ret.raw());
        self.intern(Tag::Function, &extra, canonical)
    }

    /// Create a binary function type `(p1, p2) -> ret`.
    pub fn function2(&mut self, p1: Idx, p2: Idx, ret: Idx) -> Idx {
        self.function(&[p1, p2], ret)
    }

    fn canonicalize_all(&self, types: &[Idx]) -> SmallVec<[Idx; 4]> {
        types.iter().map(|&ty| self.canonical_type(ty)).collect()
    }
}
