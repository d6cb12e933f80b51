//! Index of a translation unit's own top-level declarations.
//!
//! Built by one pass over the unit's items the first time the unit is
//! asked for a name, then answers every lookup with a single hash lookup.

use nomen_ir::{AccessPath, Name};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{DeclArena, DeclId, DeclKind, LookupKind};

/// Name → declaration tables for one translation unit.
#[derive(Debug, Default)]
pub(crate) struct TopLevelIndex {
    /// One type per name. A later declaration replaces an earlier one.
    types: FxHashMap<Name, DeclId>,
    /// Overload sets in source order.
    values: FxHashMap<Name, SmallVec<[DeclId; 1]>>,
}

impl TopLevelIndex {
    #[tracing::instrument(level = "trace", skip_all, fields(items = items.len()))]
    pub(crate) fn build(items: &[DeclId], decls: &DeclArena) -> Self {
        let mut index = TopLevelIndex::default();
        for &id in items {
            let decl = &decls[id];
            if decl.name.is_empty() {
                continue;
            }
            match decl.kind {
                DeclKind::Type { .. } => {
                    index.types.insert(decl.name, id);
                }
                DeclKind::Value { .. } => {
                    index.values.entry(decl.name).or_default().push(id);
                }
                DeclKind::Extension(_) | DeclKind::Other => {}
            }
        }
        tracing::debug!(
            types = index.types.len(),
            values = index.values.len(),
            "built top-level index"
        );
        index
    }

    /// The type named `name`, if `path` lets it through.
    ///
    /// `LookupKind` does not affect translation-unit lookups.
    pub(crate) fn lookup_type(
        &self,
        path: &AccessPath,
        name: Name,
        _kind: LookupKind,
    ) -> Option<DeclId> {
        if !path.admits(name) {
            return None;
        }
        self.types.get(&name).copied()
    }

    /// Append the overload set for `name` to `result`, if `path` lets it through.
    pub(crate) fn lookup_value(
        &self,
        path: &AccessPath,
        name: Name,
        _kind: LookupKind,
        result: &mut Vec<DeclId>,
    ) {
        if !path.admits(name) {
            return;
        }
        if let Some(overloads) = self.values.get(&name) {
            result.extend_from_slice(overloads);
        }
    }
}
