//! The compilation session: owner of every module and declaration.

use std::fmt;

use nomen_ir::{AccessPath, Name, SharedInterner};
use nomen_types::{Idx, Pool};

use crate::module::LookupCx;
use crate::{
    BuiltinModule, Decl, DeclArena, DeclId, Intrinsics, LookupKind, Module, ModuleId,
    ModuleStage, SynthesizeBuiltin, TranslationUnit,
};

/// Everything name lookup reads: interned names, types, declarations,
/// modules, and the source of compiler built-ins.
///
/// Lookups take `&mut self` because they build module caches on first use.
pub struct Session {
    interner: SharedInterner,
    types: Pool,
    decls: DeclArena,
    modules: Vec<Module>,
    builtins: Box<dyn SynthesizeBuiltin>,
}

impl Session {
    /// A session whose builtin module synthesizes the standard [`Intrinsics`].
    pub fn new(interner: SharedInterner) -> Self {
        Self::with_builtins(interner, Intrinsics)
    }

    pub fn with_builtins(
        interner: SharedInterner,
        builtins: impl SynthesizeBuiltin + 'static,
    ) -> Self {
        Session {
            interner,
            types: Pool::new(),
            decls: DeclArena::new(),
            modules: Vec::new(),
            builtins: Box::new(builtins),
        }
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn types(&self) -> &Pool {
        &self.types
    }

    #[inline]
    pub fn types_mut(&mut self) -> &mut Pool {
        &mut self.types
    }

    #[inline]
    pub fn decls(&self) -> &DeclArena {
        &self.decls
    }

    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        self.decls.alloc(decl)
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id]
    }

    // Modules

    pub fn add_builtin_module(&mut self, name: Name) -> ModuleId {
        self.push_module(Module::Builtin(BuiltinModule::new(name)))
    }

    pub fn add_translation_unit(&mut self, unit: TranslationUnit) -> ModuleId {
        self.push_module(Module::TranslationUnit(unit))
    }

    fn push_module(&mut self, module: Module) -> ModuleId {
        let id = u32::try_from(self.modules.len())
            .unwrap_or_else(|_| panic!("module table exceeded u32::MAX entries"));
        tracing::debug!(
            name = self.interner.lookup(module.name()),
            builtin = module.is_builtin(),
            id,
            "registered module"
        );
        self.modules.push(module);
        ModuleId::from_raw(id)
    }

    /// # Panics
    /// Panics if `id` was not issued by this session.
    #[inline]
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    /// # Panics
    /// Panics if `id` was not issued by this session.
    #[inline]
    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.index()]
    }

    pub fn translation_unit_mut(&mut self, id: ModuleId) -> Option<&mut TranslationUnit> {
        self.module_mut(id).as_translation_unit_mut()
    }

    /// The first module registered under `name`.
    pub fn module_by_name(&self, name: Name) -> Option<ModuleId> {
        self.modules()
            .find(|(_, module)| module.name() == name)
            .map(|(id, _)| id)
    }

    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        (0u32..).zip(&self.modules).map(|(raw, module)| (ModuleId::from_raw(raw), module))
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Advance a translation unit's stage. The builtin module's stage is fixed.
    pub fn set_stage(&mut self, module: ModuleId, stage: ModuleStage) {
        if let Some(unit) = self.translation_unit_mut(module) {
            unit.set_stage(stage);
        }
    }

    /// Discard the lookup caches of `module`; the next lookup rebuilds them.
    ///
    /// Call after the module's declaration list changes. Built-ins synthesized
    /// by the builtin module stay valid, so this is a no-op there.
    pub fn invalidate_cache(&mut self, module: ModuleId) {
        let Session {
            interner, modules, ..
        } = self;
        let module = &mut modules[module.index()];
        if module.is_builtin() {
            return;
        }
        module.clear_lookup_cache();
        tracing::debug!(
            module = interner.lookup(module.name()),
            "invalidated lookup caches"
        );
    }

    // Local lookups

    /// Look up a type declared in `module` itself, filtered by `path`.
    pub fn lookup_type(
        &mut self,
        module: ModuleId,
        path: &AccessPath,
        name: Name,
        kind: LookupKind,
    ) -> Option<DeclId> {
        let (module, mut cx) = self.lookup_cx(module);
        module.lookup_type(&mut cx, path, name, kind)
    }

    /// The overload set for `name` declared in `module` itself, filtered by `path`.
    pub fn lookup_value(
        &mut self,
        module: ModuleId,
        path: &AccessPath,
        name: Name,
        kind: LookupKind,
    ) -> Vec<DeclId> {
        let mut result = Vec::new();
        self.lookup_value_into(module, path, name, kind, &mut result);
        result
    }

    /// Like [`lookup_value`](Self::lookup_value), appending to `result`.
    pub fn lookup_value_into(
        &mut self,
        module: ModuleId,
        path: &AccessPath,
        name: Name,
        kind: LookupKind,
        result: &mut Vec<DeclId>,
    ) {
        let (module, mut cx) = self.lookup_cx(module);
        module.lookup_value(&mut cx, path, name, kind, result);
    }

    /// Extensions of `ty` declared in `module` itself, in source order.
    pub fn lookup_extensions(&mut self, module: ModuleId, ty: Idx) -> Vec<DeclId> {
        let Session {
            types,
            decls,
            modules,
            ..
        } = self;
        modules[module.index()]
            .lookup_extensions(&*decls, &*types, ty)
            .to_vec()
    }

    /// Split the session into one module and the context its lookups need.
    pub(crate) fn lookup_cx(&mut self, module: ModuleId) -> (&mut Module, LookupCx<'_>) {
        let Session {
            interner,
            types,
            decls,
            modules,
            builtins,
        } = self;
        let cx = LookupCx {
            interner: &**interner,
            types,
            decls,
            builtins: &**builtins,
        };
        (&mut modules[module.index()], cx)
    }

    /// Split the session into one module and what extension lookups read.
    pub(crate) fn extension_cx(&mut self, module: ModuleId) -> (&mut Module, &DeclArena, &Pool) {
        let Session {
            types,
            decls,
            modules,
            ..
        } = self;
        (&mut modules[module.index()], &*decls, &*types)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("types", &self.types.len())
            .field("decls", &self.decls.len())
            .field("modules", &self.modules)
            .finish_non_exhaustive()
    }
}
