//! Index from a type to the extensions of it declared in one translation unit.
//!
//! Extensions are grouped by the canonical form of the extended type, so
//! `extension Meters` and `extension Int` land in the same group when
//! `Meters` is an alias of `Int`.

use nomen_types::{CanonicalKey, Canonicalize, Idx};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{DeclArena, DeclId};

#[derive(Debug, Default)]
pub(crate) struct ExtensionIndex {
    /// Canonical extended type → extensions in source order.
    groups: FxHashMap<CanonicalKey, SmallVec<[DeclId; 1]>>,
}

impl ExtensionIndex {
    #[tracing::instrument(level = "trace", skip_all, fields(items = items.len()))]
    pub(crate) fn build<C: Canonicalize + ?Sized>(
        items: &[DeclId],
        decls: &DeclArena,
        canon: &C,
    ) -> Self {
        let mut index = ExtensionIndex::default();
        let mut skipped = 0usize;
        for &id in items {
            let Some(ext) = decls[id].as_extension() else {
                continue;
            };
            // The extended type failed to resolve; nothing can find it.
            if canon.is_error(ext.extended) {
                skipped += 1;
                continue;
            }
            index
                .groups
                .entry(canon.canonical(ext.extended))
                .or_default()
                .push(id);
        }
        tracing::debug!(
            extended_types = index.groups.len(),
            skipped,
            "built extension index"
        );
        index
    }

    /// Extensions of `ty` (by canonical form), in source order.
    pub(crate) fn extensions_for<C: Canonicalize + ?Sized>(&self, ty: Idx, canon: &C) -> &[DeclId] {
        match self.groups.get(&canon.canonical(ty)) {
            Some(group) => group.as_slice(),
            None => &[],
        }
    }
}
