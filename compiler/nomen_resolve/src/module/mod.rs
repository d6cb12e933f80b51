//! The module abstraction and its local lookups.
//!
//! A module is either the builtin module or a parsed translation unit. Each
//! owns the caches its variant needs in `Option` slots that are filled on
//! first lookup. Local lookups answer from the module itself and never
//! follow imports; [`Session`](crate::Session) layers import traversal on top.

use nomen_ir::{AccessPath, Name, StringInterner};
use nomen_types::{Canonicalize, Idx, Pool};

use crate::builtins::BuiltinCache;
use crate::extensions::ExtensionIndex;
use crate::top_level::TopLevelIndex;
use crate::{DeclArena, DeclId, LookupKind, SynthesizeBuiltin};

/// Index of a module in its session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(u32);

impl ModuleId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ModuleId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// How far the front end has processed a translation unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleStage {
    /// Declarations are still being produced.
    Parsing,
    /// The declaration list is complete.
    Parsed,
    /// Names are being bound; lookups are expected.
    NameBinding,
    TypeChecked,
}

/// One `import` of a translation unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub path: AccessPath,
    pub module: ModuleId,
}

impl Import {
    /// `import M`
    pub fn whole(module: ModuleId) -> Self {
        Import {
            path: AccessPath::empty(),
            module,
        }
    }

    /// `import M.<path>`
    pub fn scoped(module: ModuleId, path: AccessPath) -> Self {
        Import { path, module }
    }
}

/// Borrowed session state a local lookup may need.
pub(crate) struct LookupCx<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) types: &'a mut Pool,
    pub(crate) decls: &'a mut DeclArena,
    pub(crate) builtins: &'a dyn SynthesizeBuiltin,
}

/// The compiler's builtin module: no source, no imports, only synthesis.
#[derive(Debug)]
pub struct BuiltinModule {
    name: Name,
    cache: Option<BuiltinCache>,
}

impl BuiltinModule {
    pub fn new(name: Name) -> Self {
        BuiltinModule { name, cache: None }
    }

    /// Number of built-ins synthesized so far.
    pub fn synthesized_count(&self) -> usize {
        self.cache.as_ref().map_or(0, BuiltinCache::len)
    }
}

/// A module backed by a parsed list of top-level declarations.
#[derive(Debug)]
pub struct TranslationUnit {
    name: Name,
    items: Vec<DeclId>,
    imports: Vec<Import>,
    stage: ModuleStage,
    lookup_cache: Option<TopLevelIndex>,
    extension_cache: Option<ExtensionIndex>,
}

impl TranslationUnit {
    /// A parsed unit with no declarations and no imports.
    pub fn new(name: Name) -> Self {
        TranslationUnit {
            name,
            items: Vec::new(),
            imports: Vec::new(),
            stage: ModuleStage::Parsed,
            lookup_cache: None,
            extension_cache: None,
        }
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = DeclId>) -> Self {
        self.items.extend(items);
        self
    }

    #[must_use]
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = Import>) -> Self {
        self.imports.extend(imports);
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: ModuleStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn items(&self) -> &[DeclId] {
        &self.items
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    pub fn stage(&self) -> ModuleStage {
        self.stage
    }

    pub fn set_stage(&mut self, stage: ModuleStage) {
        self.stage = stage;
    }

    /// Append a top-level declaration.
    ///
    /// Caches already built are not updated; call
    /// [`Session::invalidate_cache`](crate::Session::invalidate_cache)
    /// before the next lookup.
    pub fn push_item(&mut self, item: DeclId) {
        self.items.push(item);
    }

    pub fn add_import(&mut self, import: Import) {
        self.imports.push(import);
    }

    pub fn has_lookup_cache(&self) -> bool {
        self.lookup_cache.is_some()
    }

    pub fn has_extension_cache(&self) -> bool {
        self.extension_cache.is_some()
    }

    /// Discard both caches; the next lookup rebuilds from the item list.
    pub fn clear_lookup_cache(&mut self) {
        self.lookup_cache = None;
        self.extension_cache = None;
    }

    fn top_level(&mut self, decls: &DeclArena) -> &TopLevelIndex {
        let items = &self.items;
        self.lookup_cache
            .get_or_insert_with(|| TopLevelIndex::build(items, decls))
    }

    fn extensions<C: Canonicalize + ?Sized>(
        &mut self,
        decls: &DeclArena,
        canon: &C,
    ) -> &ExtensionIndex {
        let items = &self.items;
        self.extension_cache
            .get_or_insert_with(|| ExtensionIndex::build(items, decls, canon))
    }
}

#[derive(Debug)]
pub enum Module {
    Builtin(BuiltinModule),
    TranslationUnit(TranslationUnit),
}

impl Module {
    pub fn name(&self) -> Name {
        match self {
            Module::Builtin(builtin) => builtin.name,
            Module::TranslationUnit(unit) => unit.name,
        }
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        matches!(self, Module::Builtin(_))
    }

    /// Imports in declaration order. Always empty for the builtin module.
    pub fn imports(&self) -> &[Import] {
        match self {
            Module::Builtin(_) => &[],
            Module::TranslationUnit(unit) => &unit.imports,
        }
    }

    /// The builtin module is complete from the start.
    pub fn stage(&self) -> ModuleStage {
        match self {
            Module::Builtin(_) => ModuleStage::TypeChecked,
            Module::TranslationUnit(unit) => unit.stage,
        }
    }

    pub fn as_translation_unit(&self) -> Option<&TranslationUnit> {
        match self {
            Module::TranslationUnit(unit) => Some(unit),
            Module::Builtin(_) => None,
        }
    }

    pub fn as_translation_unit_mut(&mut self) -> Option<&mut TranslationUnit> {
        match self {
            Module::TranslationUnit(unit) => Some(unit),
            Module::Builtin(_) => None,
        }
    }

    /// Look up a type at module scope, filtered by `path`. Does not follow imports.
    pub(crate) fn lookup_type(
        &mut self,
        cx: &mut LookupCx<'_>,
        path: &AccessPath,
        name: Name,
        kind: LookupKind,
    ) -> Option<DeclId> {
        match self {
            Module::Builtin(builtin) => {
                debug_assert!(path.is_empty(), "builtin module's access path always empty");
                builtin
                    .cache
                    .get_or_insert_with(BuiltinCache::default)
                    .lookup_type(name, kind, cx)
            }
            Module::TranslationUnit(unit) => {
                unit.top_level(cx.decls).lookup_type(path, name, kind)
            }
        }
    }

    /// Append the overload set for `name` at module scope, filtered by `path`.
    /// Does not follow imports.
    pub(crate) fn lookup_value(
        &mut self,
        cx: &mut LookupCx<'_>,
        path: &AccessPath,
        name: Name,
        kind: LookupKind,
        result: &mut Vec<DeclId>,
    ) {
        match self {
            Module::Builtin(builtin) => {
                debug_assert!(path.is_empty(), "builtin module's access path always empty");
                builtin
                    .cache
                    .get_or_insert_with(BuiltinCache::default)
                    .lookup_value(name, kind, cx, result);
            }
            Module::TranslationUnit(unit) => {
                unit.top_level(cx.decls)
                    .lookup_value(path, name, kind, result);
            }
        }
    }

    /// Extensions of `ty` declared in this module, in source order.
    ///
    /// The builtin module has free functions only, never extensions, and
    /// answers without building a cache.
    pub(crate) fn lookup_extensions<C: Canonicalize + ?Sized>(
        &mut self,
        decls: &DeclArena,
        canon: &C,
        ty: Idx,
    ) -> &[DeclId] {
        match self {
            Module::Builtin(_) => &[],
            Module::TranslationUnit(unit) => {
                debug_assert!(
                    unit.stage >= ModuleStage::Parsed,
                    "extensions should only be looked up once the module is parsed"
                );
                unit.extensions(decls, canon).extensions_for(ty, canon)
            }
        }
    }

    /// Drop every lazily built cache of a translation unit.
    ///
    /// Synthesized built-ins stay valid for the whole session, so the
    /// builtin module keeps its cache.
    pub(crate) fn clear_lookup_cache(&mut self) {
        if let Module::TranslationUnit(unit) = self {
            unit.clear_lookup_cache();
        }
    }
}
