//! Hash-consed type storage.
//!
//! # Layout
//!
//! - `items`: one `(tag, data)` pair per type, indexed by `Idx`
//! - `extra`: variable-length payloads (nominal owners, alias targets,
//!   tuple elements, function signatures) referenced from `data`
//! - `canonical`: canonical form of every item, computed when it is interned
//!
//! Structurally identical types intern to the same `Idx`. An alias and its
//! target are distinct items with the same canonical form.

use nomen_ir::Name;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{CanonicalKey, Canonicalize, Idx, Tag};

mod construct;
mod format;

/// A single type item in the pool.
#[derive(Copy, Clone, Debug)]
struct Item {
    tag: Tag,
    data: u32,
}

/// Hash-consing key: the tag plus the payload that `data` encodes.
#[derive(Clone, PartialEq, Eq, Hash)]
struct InternKey {
    tag: Tag,
    payload: SmallVec<[u32; 4]>,
}

/// Decoded view of a pooled type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    Error,
    Builtin(Name),
    Nominal { owner: Name, name: Name },
    Alias { name: Name, target: Idx },
    Tuple(Vec<Idx>),
    Function { params: Vec<Idx>, ret: Idx },
}

/// Type pool.
pub struct Pool {
    items: Vec<Item>,
    extra: Vec<u32>,
    canonical: Vec<Idx>,
    interned: FxHashMap<InternKey, Idx>,
}

impl Pool {
    /// Create a pool with the error and unit types pre-interned.
    pub fn new() -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(64),
            extra: Vec::with_capacity(256),
            canonical: Vec::with_capacity(64),
            interned: FxHashMap::default(),
        };
        let error = pool.intern(Tag::Error, &[], None);
        let unit = pool.intern(Tag::Tuple, &[0], None);
        debug_assert_eq!(error, Idx::ERROR);
        debug_assert_eq!(unit, Idx::UNIT);
        pool
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: the pre-interned types are present from construction.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Intern a type, returning the existing index for an identical payload.
    ///
    /// `canonical` is the canonical form of the new item, or `None` when the
    /// item is its own canonical form.
    #[allow(clippy::cast_possible_truncation)]
    fn intern(&mut self, tag: Tag, payload: &[u32], canonical: Option<Idx>) -> Idx {
        let key = InternKey {
            tag,
            payload: SmallVec::from_slice(payload),
        };
        if let Some(&idx) = self.interned.get(&key) {
            return idx;
        }

        let idx = Idx::from_raw(self.items.len() as u32);
        let data = if tag.uses_extra() {
            let start = self.extra.len() as u32;
            self.extra.extend_from_slice(payload);
            start
        } else {
            payload.first().copied().unwrap_or(0)
        };

        self.items.push(Item { tag, data });
        self.canonical.push(canonical.unwrap_or(idx));
        self.interned.insert(key, idx);
        idx
    }

    #[inline]
    fn item(&self, idx: Idx) -> Option<Item> {
        self.items.get(idx.raw() as usize).copied()
    }

    /// Tag of a type. Out-of-pool indices (including `Idx::NONE`) read as errors.
    pub fn tag(&self, idx: Idx) -> Tag {
        self.item(idx).map_or(Tag::Error, |item| item.tag)
    }

    /// Decode a type.
    pub fn data(&self, idx: Idx) -> TypeData {
        let Some(item) = self.item(idx) else {
            return TypeData::Error;
        };
        let start = item.data as usize;
        match item.tag {
            Tag::Error => TypeData::Error,
            Tag::Builtin => TypeData::Builtin(Name::from_raw(item.data)),
            Tag::Nominal => TypeData::Nominal {
                owner: Name::from_raw(self.extra[start]),
                name: Name::from_raw(self.extra[start + 1]),
            },
            Tag::Alias => TypeData::Alias {
                name: Name::from_raw(self.extra[start]),
                target: Idx::from_raw(self.extra[start + 1]),
            },
            Tag::Tuple => {
                let count = self.extra[start] as usize;
                TypeData::Tuple(self.indices(start + 1, count))
            }
            Tag::Function => {
                let count = self.extra[start] as usize;
                TypeData::Function {
                    params: self.indices(start + 1, count),
                    ret: Idx::from_raw(self.extra[start + 1 + count]),
                }
            }
        }
    }

    fn indices(&self, start: usize, count: usize) -> Vec<Idx> {
        self.extra[start..start + count]
            .iter()
            .map(|&raw| Idx::from_raw(raw))
            .collect()
    }

    /// Canonical form of a type: aliases stripped at every depth.
    #[inline]
    pub fn canonical_type(&self, idx: Idx) -> Idx {
        self.canonical.get(idx.raw() as usize).copied().unwrap_or(idx)
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl Canonicalize for Pool {
    fn canonical(&self, ty: Idx) -> CanonicalKey {
        CanonicalKey::new(self.canonical_type(ty))
    }

    fn is_error(&self, ty: Idx) -> bool {
        self.tag(self.canonical_type(ty)) == Tag::Error
    }
}
