//! Module manifests.
//!
//! A manifest describes a set of modules in TOML: their imports and their
//! top-level declarations. Loading one interns every name, builds the types
//! in the session's pool, and registers the modules, standing in for the
//! parser and the binding pass.
//!
//! ```toml
//! [[module]]
//! name = "Geometry"
//!
//! [[module.decl]]
//! kind = "type"
//! name = "Meters"
//! type = "Builtin.Int64"
//!
//! [[module]]
//! name = "Main"
//! imports = [{ module = "Geometry", path = ["Meters"] }]
//! ```
//!
//! Type references name a builtin scalar (`Builtin.Int64`), the unit type
//! (`()`), a function (`(A, B) -> R`), or a type visible from the referring
//! module: one it declares, or one an import brings in. Anything else
//! resolves to the error type.

use std::path::Path;

use nomen_ir::{AccessPath, AccessPathElement, Name, SharedInterner, Span};
use nomen_resolve::{
    Decl, DeclId, Import, LookupKind, ModuleId, Session, TranslationUnit, ValueKind,
};
use nomen_types::Idx;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use toml::Spanned;

/// Name of the module every manifest gets for free.
pub const BUILTIN_MODULE: &str = "Builtin";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed manifest: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("module '{0}' is declared more than once")]
    DuplicateModule(String),
    #[error("module '{module}' imports unknown module '{import}'")]
    UnknownImport { module: String, import: String },
    #[error(
        "module '{module}' imports '{import}' through `{path}`; nested scopes are not supported"
    )]
    NestedPath {
        module: String,
        import: String,
        path: String,
    },
    #[error("module '{module}' imports 'Builtin.{symbol}'; the builtin module cannot be scoped")]
    ScopedBuiltin { module: String, symbol: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSpec {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
    #[serde(default, rename = "decl")]
    pub decls: Vec<DeclSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportSpec {
    pub module: String,
    #[serde(default)]
    pub path: Vec<Spanned<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclSpecKind {
    /// An alias when `type` is given, otherwise a new nominal type.
    Type,
    Struct,
    Func,
    Var,
    Let,
    Extension,
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclSpec {
    pub kind: DeclSpecKind,
    #[serde(default)]
    pub name: Option<Spanned<String>>,
    /// Alias target for types, declared type for values.
    #[serde(default, rename = "type")]
    pub ty: Option<String>,
    /// Extended type, for extensions.
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub members: Vec<DeclSpec>,
}

/// A loaded manifest: the session holding its modules, plus which module
/// declared each declaration.
pub struct Program {
    pub session: Session,
    pub builtin: ModuleId,
    owners: FxHashMap<DeclId, ModuleId>,
}

impl Program {
    /// The module that declared `decl`. Synthesized built-ins belong to the
    /// builtin module.
    pub fn owner(&self, decl: DeclId) -> ModuleId {
        self.owners.get(&decl).copied().unwrap_or(self.builtin)
    }

    pub fn module_named(&self, name: &str) -> Option<ModuleId> {
        let name = self.session.interner().get(name)?;
        self.session.module_by_name(name)
    }
}

/// Read and load the manifest at `path`.
pub fn load_file(path: &Path) -> Result<Program, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_str(&text)
}

pub fn load_str(text: &str) -> Result<Program, ManifestError> {
    let manifest: Manifest = toml::from_str(text)?;
    load(&manifest)
}

#[tracing::instrument(level = "debug", skip_all, fields(modules = manifest.modules.len()))]
pub fn load(manifest: &Manifest) -> Result<Program, ManifestError> {
    let mut loader = Loader::new();

    // Ids are handed out in order, so they are known before any module is
    // built and imports may refer forward.
    let mut planned = FxHashMap::default();
    planned.insert(BUILTIN_MODULE, loader.builtin);
    for (offset, spec) in (1u32..).zip(&manifest.modules) {
        if planned
            .insert(spec.name.as_str(), ModuleId::from_raw(offset))
            .is_some()
        {
            return Err(ManifestError::DuplicateModule(spec.name.clone()));
        }
    }

    // Nominal types need no resolution, so every module's are visible
    // before any alias or signature is lowered.
    for spec in &manifest.modules {
        loader.declare_nominal_types(planned[spec.name.as_str()], spec);
    }

    for spec in &manifest.modules {
        let expected = planned[spec.name.as_str()];
        let imports = spec
            .imports
            .iter()
            .map(|import| loader.lower_import(spec, import, &planned))
            .collect::<Result<Vec<_>, _>>()?;

        let name = loader.session.intern(&spec.name);
        let scope = Scope {
            module: expected,
            owner: name,
            imports: &imports,
        };
        let items: Vec<DeclId> = spec
            .decls
            .iter()
            .map(|decl| loader.lower_decl(scope, decl, true))
            .collect();

        let id = loader.session.add_translation_unit(
            TranslationUnit::new(name)
                .with_items(items)
                .with_imports(imports),
        );
        debug_assert_eq!(id, expected);
    }

    Ok(Program {
        session: loader.session,
        builtin: loader.builtin,
        owners: loader.owners,
    })
}

struct Loader {
    session: Session,
    builtin: ModuleId,
    /// Top-level types declared by each module, by name.
    types: FxHashMap<ModuleId, FxHashMap<Name, Idx>>,
    owners: FxHashMap<DeclId, ModuleId>,
}

/// The module a declaration is lowered in.
#[derive(Clone, Copy)]
struct Scope<'a> {
    module: ModuleId,
    /// Name of `module`, which owns its nominal types.
    owner: Name,
    imports: &'a [Import],
}

impl Loader {
    fn new() -> Self {
        let mut session = Session::new(SharedInterner::new());
        let builtin_name = session.intern(BUILTIN_MODULE);
        let builtin = session.add_builtin_module(builtin_name);
        Loader {
            session,
            builtin,
            types: FxHashMap::default(),
            owners: FxHashMap::default(),
        }
    }

    fn lower_import(
        &self,
        module: &ModuleSpec,
        import: &ImportSpec,
        planned: &FxHashMap<&str, ModuleId>,
    ) -> Result<Import, ManifestError> {
        let Some(&target) = planned.get(import.module.as_str()) else {
            return Err(ManifestError::UnknownImport {
                module: module.name.clone(),
                import: import.module.clone(),
            });
        };

        match import.path.as_slice() {
            [] => Ok(Import::whole(target)),
            [symbol] if target == self.builtin => Err(ManifestError::ScopedBuiltin {
                module: module.name.clone(),
                symbol: symbol.get_ref().clone(),
            }),
            [symbol] => {
                let element = AccessPathElement {
                    name: self.session.intern(symbol.get_ref()),
                    span: span_of(symbol),
                };
                Ok(Import::scoped(target, AccessPath::from_elements([element])))
            }
            nested => Err(ManifestError::NestedPath {
                module: module.name.clone(),
                import: import.module.clone(),
                path: nested
                    .iter()
                    .map(|part| part.get_ref().as_str())
                    .collect::<Vec<_>>()
                    .join("."),
            }),
        }
    }

    fn declare_nominal_types(&mut self, module: ModuleId, spec: &ModuleSpec) {
        let owner = self.session.intern(&spec.name);
        for decl in &spec.decls {
            let nominal = match decl.kind {
                DeclSpecKind::Struct => true,
                DeclSpecKind::Type => decl.ty.is_none(),
                _ => false,
            };
            let Some(name) = decl.name.as_ref().filter(|_| nominal) else {
                continue;
            };
            let name = self.session.intern(name.get_ref());
            let ty = self.session.types_mut().nominal(owner, name);
            self.declare_type(module, name, ty);
        }
    }

    /// A later declaration of the same name replaces an earlier one, as in
    /// the module's own type index.
    fn declare_type(&mut self, module: ModuleId, name: Name, ty: Idx) {
        self.types.entry(module).or_default().insert(name, ty);
    }

    fn lower_decl(&mut self, scope: Scope<'_>, spec: &DeclSpec, top_level: bool) -> DeclId {
        let (name, span) = match &spec.name {
            Some(name) => (self.session.intern(name.get_ref()), span_of(name)),
            None => (Name::EMPTY, Span::DUMMY),
        };

        let decl = match spec.kind {
            DeclSpecKind::Type | DeclSpecKind::Struct => {
                let declared = match (spec.kind, spec.ty.as_deref()) {
                    (DeclSpecKind::Type, Some(target)) => {
                        let target = self.resolve_type(scope, target);
                        self.session.types_mut().alias(name, target)
                    }
                    _ => self.session.types_mut().nominal(scope.owner, name),
                };
                if top_level {
                    self.declare_type(scope.module, name, declared);
                }
                Decl::type_decl(name, declared, span)
            }
            DeclSpecKind::Func | DeclSpecKind::Var | DeclSpecKind::Let => {
                let kind = match spec.kind {
                    DeclSpecKind::Func => ValueKind::Func,
                    DeclSpecKind::Var => ValueKind::Var,
                    _ => ValueKind::Let,
                };
                let ty = spec
                    .ty
                    .as_deref()
                    .map_or(Idx::UNIT, |ty| self.resolve_type(scope, ty));
                Decl::value(name, kind, ty, span)
            }
            DeclSpecKind::Extension => {
                let extended = spec
                    .extends
                    .as_deref()
                    .map_or(Idx::ERROR, |ty| self.resolve_type(scope, ty));
                let members = spec
                    .members
                    .iter()
                    .map(|member| self.lower_decl(scope, member, false))
                    .collect();
                Decl::extension(extended, members, span)
            }
            DeclSpecKind::Other => Decl::other(name, span),
        };

        let id = self.session.alloc_decl(decl);
        self.owners.insert(id, scope.module);
        id
    }

    fn resolve_type(&mut self, scope: Scope<'_>, text: &str) -> Idx {
        let text = text.trim();
        if let Some((params, ret)) = text.split_once("->") {
            let params = params.trim();
            let params = params
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .unwrap_or(params);
            let params: Vec<Idx> = params
                .split(',')
                .map(str::trim)
                .filter(|param| !param.is_empty())
                .map(|param| self.resolve_type(scope, param))
                .collect();
            let ret = self.resolve_type(scope, ret);
            return self.session.types_mut().function(&params, ret);
        }
        if text == "()" {
            return Idx::UNIT;
        }
        let builtin = text
            .strip_prefix(BUILTIN_MODULE)
            .and_then(|rest| rest.strip_prefix('.'));
        let found = match builtin {
            Some(spelling) => self.builtin_type(spelling),
            None => self.visible_type(scope, text),
        };
        found.unwrap_or_else(|| {
            tracing::debug!(ty = text, "unresolved type reference");
            Idx::ERROR
        })
    }

    /// A scalar the builtin module synthesizes on a qualified lookup.
    fn builtin_type(&mut self, spelling: &str) -> Option<Idx> {
        let name = self.session.intern(spelling);
        let decl = self.session.lookup_type(
            self.builtin,
            &AccessPath::empty(),
            name,
            LookupKind::Qualified,
        )?;
        self.session.decl(decl).ty()
    }

    /// A type declared by the module itself, else by the first import that
    /// admits it. Unqualified names never reach the builtin module.
    fn visible_type(&self, scope: Scope<'_>, spelling: &str) -> Option<Idx> {
        let name = self.session.intern(spelling);
        let declared_in = |module: ModuleId| {
            self.types
                .get(&module)
                .and_then(|types| types.get(&name))
                .copied()
        };
        declared_in(scope.module).or_else(|| {
            scope
                .imports
                .iter()
                .filter(|import| import.module != self.builtin && import.path.admits(name))
                .find_map(|import| declared_in(import.module))
        })
    }
}

fn span_of<T>(spanned: &Spanned<T>) -> Span {
    Span::try_from_range(spanned.span()).unwrap_or(Span::DUMMY)
}
