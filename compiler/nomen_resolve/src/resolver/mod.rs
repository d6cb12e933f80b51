//! Import-aware lookups.
//!
//! A global lookup asks the module itself first. A local hit shadows every
//! import; the builtin module has no imports and answers alone. Otherwise
//! imports are consulted in declaration order and the first one that
//! answers wins. Results from different imports are never merged.

use nomen_ir::{AccessPath, Name};
use nomen_types::Idx;

use crate::{DeclId, LookupKind, ModuleId, Session};

impl Session {
    /// Resolve the type `name` as seen from `module`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn lookup_global_type(
        &mut self,
        module: ModuleId,
        name: Name,
        kind: LookupKind,
    ) -> Option<DeclId> {
        let (local, mut cx) = self.lookup_cx(module);
        if let Some(found) = local.lookup_type(&mut cx, &AccessPath::empty(), name, kind) {
            return Some(found);
        }
        if local.is_builtin() {
            return None;
        }

        for position in 0..self.module(module).imports().len() {
            let import = self.module(module).imports()[position].clone();
            let (imported, mut cx) = self.lookup_cx(import.module);
            if let Some(found) = imported.lookup_type(&mut cx, &import.path, name, kind) {
                tracing::trace!(module = ?import.module, position, "type found through import");
                return Some(found);
            }
        }
        None
    }

    /// Resolve the overload set for `name` as seen from `module`.
    pub fn lookup_global_value(
        &mut self,
        module: ModuleId,
        name: Name,
        kind: LookupKind,
    ) -> Vec<DeclId> {
        let mut result = Vec::new();
        self.lookup_global_value_into(module, name, kind, &mut result);
        result
    }

    /// Like [`lookup_global_value`](Self::lookup_global_value), filling a
    /// caller-provided buffer.
    ///
    /// `result` must be empty on entry.
    #[tracing::instrument(level = "trace", skip(self, result))]
    pub fn lookup_global_value_into(
        &mut self,
        module: ModuleId,
        name: Name,
        kind: LookupKind,
        result: &mut Vec<DeclId>,
    ) {
        debug_assert!(result.is_empty(), "global lookup requires an empty result buffer");

        let (local, mut cx) = self.lookup_cx(module);
        local.lookup_value(&mut cx, &AccessPath::empty(), name, kind, result);
        if !result.is_empty() || local.is_builtin() {
            return;
        }

        for position in 0..self.module(module).imports().len() {
            let import = self.module(module).imports()[position].clone();
            let (imported, mut cx) = self.lookup_cx(import.module);
            imported.lookup_value(&mut cx, &import.path, name, kind, result);
            if !result.is_empty() {
                tracing::trace!(
                    module = ?import.module,
                    position,
                    overloads = result.len(),
                    "values found through import"
                );
                return;
            }
        }
    }

    /// Members named `name` that extensions of `base` add, as seen from `module`.
    pub fn lookup_global_extension_methods(
        &mut self,
        module: ModuleId,
        base: Idx,
        name: Name,
    ) -> Vec<DeclId> {
        let mut result = Vec::new();
        self.lookup_global_extension_methods_into(module, base, name, &mut result);
        result
    }

    /// Like [`lookup_global_extension_methods`](Self::lookup_global_extension_methods),
    /// filling a caller-provided buffer.
    ///
    /// Every matching member of every local extension is kept. Import access
    /// paths do not restrict extension members.
    #[tracing::instrument(level = "trace", skip(self, result))]
    pub fn lookup_global_extension_methods_into(
        &mut self,
        module: ModuleId,
        base: Idx,
        name: Name,
        result: &mut Vec<DeclId>,
    ) {
        debug_assert!(result.is_empty(), "global lookup requires an empty result buffer");

        self.collect_extension_members(module, base, name, result);
        if !result.is_empty() || self.module(module).is_builtin() {
            return;
        }

        for position in 0..self.module(module).imports().len() {
            let imported = self.module(module).imports()[position].module;
            self.collect_extension_members(imported, base, name, result);
            if !result.is_empty() {
                tracing::trace!(?imported, position, "extension members found through import");
                return;
            }
        }
    }

    fn collect_extension_members(
        &mut self,
        module: ModuleId,
        base: Idx,
        name: Name,
        result: &mut Vec<DeclId>,
    ) {
        let (module, decls, types) = self.extension_cx(module);
        for &ext in module.lookup_extensions(decls, types, base) {
            let Some(ext) = decls[ext].as_extension() else {
                continue;
            };
            result.extend(ext.members.iter().copied().filter(|&member| {
                let member = &decls[member];
                member.is_value() && member.name == name
            }));
        }
    }
}

#[cfg(test)]
mod tests;
