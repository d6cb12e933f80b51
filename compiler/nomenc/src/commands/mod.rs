//! Command handlers for the `nomenc` CLI.
//!
//! Each handler runs one kind of lookup against a loaded [`Program`] and
//! returns the lines to print, one per declaration found.

use nomen_ir::Name;
use nomen_resolve::{DeclId, DeclKind, LookupKind, Module, ModuleId, ValueKind};
use nomen_types::{Idx, TypeData};

use crate::manifest::{Program, BUILTIN_MODULE};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown module '{0}'")]
    UnknownModule(String),
    #[error("'{ty}' does not name a type visible from '{module}'")]
    UnknownType { module: String, ty: String },
}

/// `nomenc type <manifest> <module> <name>`
pub fn lookup_type(
    program: &mut Program,
    module: &str,
    name: &str,
    kind: LookupKind,
) -> Result<Vec<String>, CommandError> {
    let id = module_id(program, module)?;
    let name = program.session.intern(name);
    let found = program.session.lookup_global_type(id, name, kind);
    Ok(found.into_iter().map(|decl| describe(program, decl)).collect())
}

/// `nomenc value <manifest> <module> <name>`
pub fn lookup_value(
    program: &mut Program,
    module: &str,
    name: &str,
    kind: LookupKind,
) -> Result<Vec<String>, CommandError> {
    let id = module_id(program, module)?;
    let name = program.session.intern(name);
    let found = program.session.lookup_global_value(id, name, kind);
    Ok(found.into_iter().map(|decl| describe(program, decl)).collect())
}

/// `nomenc extensions <manifest> <module> <type>`: the module's own
/// extensions of a type.
pub fn lookup_extensions(
    program: &mut Program,
    module: &str,
    ty: &str,
) -> Result<Vec<String>, CommandError> {
    let id = module_id(program, module)?;
    let ty = resolve_type(program, id, module, ty)?;
    let found = program.session.lookup_extensions(id, ty);
    Ok(found.into_iter().map(|decl| describe(program, decl)).collect())
}

/// `nomenc methods <manifest> <module> <type> <name>`
pub fn lookup_methods(
    program: &mut Program,
    module: &str,
    ty: &str,
    name: &str,
) -> Result<Vec<String>, CommandError> {
    let id = module_id(program, module)?;
    let ty = resolve_type(program, id, module, ty)?;
    let name = program.session.intern(name);
    let found = program.session.lookup_global_extension_methods(id, ty, name);
    Ok(found.into_iter().map(|decl| describe(program, decl)).collect())
}

/// `nomenc dump <manifest>`: every module with its imports and declarations.
pub fn dump(program: &Program) -> Vec<String> {
    let session = &program.session;
    let mut lines = Vec::new();
    for (_, module) in session.modules() {
        let name = session.interner().lookup(module.name());
        match module {
            Module::Builtin(builtin) => {
                lines.push(format!(
                    "module {name} (builtin, {} synthesized)",
                    builtin.synthesized_count()
                ));
            }
            Module::TranslationUnit(unit) => {
                lines.push(format!("module {name} ({:?})", unit.stage()));
                for import in unit.imports() {
                    let imported = session.interner().lookup(session.module(import.module).name());
                    match import.path.selected() {
                        Some(element) => lines.push(format!(
                            "  import {imported}.{}",
                            session.interner().lookup(element.name)
                        )),
                        None => lines.push(format!("  import {imported}")),
                    }
                }
                for &item in unit.items() {
                    lines.push(format!("  {}", describe(program, item)));
                }
            }
        }
    }
    lines
}

fn module_id(program: &Program, module: &str) -> Result<ModuleId, CommandError> {
    program
        .module_named(module)
        .ok_or_else(|| CommandError::UnknownModule(module.to_owned()))
}

/// Resolve a type argument: `Builtin.X` through the builtin module, anything
/// else as a type visible from `id`.
fn resolve_type(
    program: &mut Program,
    id: ModuleId,
    module: &str,
    text: &str,
) -> Result<Idx, CommandError> {
    let builtin = text
        .strip_prefix(BUILTIN_MODULE)
        .and_then(|rest| rest.strip_prefix('.'));
    let (scope, spelling, kind) = match builtin {
        Some(builtin) => (program.builtin, builtin, LookupKind::Qualified),
        None => (id, text, LookupKind::Unqualified),
    };
    let name = program.session.intern(spelling);
    program
        .session
        .lookup_global_type(scope, name, kind)
        .and_then(|decl| program.session.decl(decl).ty())
        .ok_or_else(|| CommandError::UnknownType {
            module: module.to_owned(),
            ty: text.to_owned(),
        })
}

/// One line describing a declaration: `Owner.name : what`.
pub fn describe(program: &Program, id: DeclId) -> String {
    let session = &program.session;
    let interner = session.interner();
    let types = session.types();
    let decl = session.decl(id);
    let owner = interner.lookup(session.module(program.owner(id)).name());
    let spelling = |name: Name| interner.lookup(name);

    match &decl.kind {
        DeclKind::Type { declared } => match types.data(*declared) {
            TypeData::Alias { target, .. } => format!(
                "{owner}.{} : type = {}",
                spelling(decl.name),
                types.display(target, interner)
            ),
            _ => format!("{owner}.{} : type", spelling(decl.name)),
        },
        DeclKind::Value { kind, ty } => {
            let kind = match kind {
                ValueKind::Func => "func",
                ValueKind::Var => "var",
                ValueKind::Let => "let",
            };
            format!(
                "{owner}.{} : {kind} {}",
                spelling(decl.name),
                types.display(*ty, interner)
            )
        }
        DeclKind::Extension(ext) => {
            let members: Vec<&str> = ext
                .members
                .iter()
                .map(|&member| spelling(session.decl(member).name))
                .collect();
            format!(
                "{owner}.extension {} {{ {} }}",
                types.display(ext.extended, interner),
                members.join(", ")
            )
        }
        DeclKind::Other => format!("{owner}.{} : other", spelling(decl.name)),
    }
}

#[cfg(test)]
mod tests;
