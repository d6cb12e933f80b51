//! Declaration model.
//!
//! Only the attributes name lookup reads are modeled: the name, the
//! category, the type a type declaration introduces, and the extended type
//! and members of an extension. Declarations are created by the parser (or
//! by builtin synthesis), stored once in the session's [`DeclArena`], and
//! never mutated by lookup.

use std::ops::Index;

use nomen_ir::{Name, Span};
use nomen_types::Idx;

/// Index of a declaration in the session's [`DeclArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(u32);

impl DeclId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DeclId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The four declaration categories lookup distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclCategory {
    Type,
    Value,
    Extension,
    Other,
}

/// What kind of value a value declaration binds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Func,
    Var,
    Let,
}

/// An extension block: members injected into an existing type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionDecl {
    /// The type as written. `Idx::ERROR` when it failed to resolve.
    pub extended: Idx,
    /// Member declarations in source order.
    pub members: Vec<DeclId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    /// A type declaration (alias or nominal) introducing `declared`.
    Type { declared: Idx },
    /// A function or variable. Several may share a name (overload set).
    Value { kind: ValueKind, ty: Idx },
    Extension(ExtensionDecl),
    /// Imports, top-level statements, and anything else lookup ignores.
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub name: Name,
    pub span: Span,
    pub kind: DeclKind,
}

impl Decl {
    pub fn type_decl(name: Name, declared: Idx, span: Span) -> Self {
        Decl {
            name,
            span,
            kind: DeclKind::Type { declared },
        }
    }

    pub fn value(name: Name, kind: ValueKind, ty: Idx, span: Span) -> Self {
        Decl {
            name,
            span,
            kind: DeclKind::Value { kind, ty },
        }
    }

    /// An extension block. Extensions are anonymous.
    pub fn extension(extended: Idx, members: Vec<DeclId>, span: Span) -> Self {
        Decl {
            name: Name::EMPTY,
            span,
            kind: DeclKind::Extension(ExtensionDecl { extended, members }),
        }
    }

    pub fn other(name: Name, span: Span) -> Self {
        Decl {
            name,
            span,
            kind: DeclKind::Other,
        }
    }

    pub fn category(&self) -> DeclCategory {
        match self.kind {
            DeclKind::Type { .. } => DeclCategory::Type,
            DeclKind::Value { .. } => DeclCategory::Value,
            DeclKind::Extension(_) => DeclCategory::Extension,
            DeclKind::Other => DeclCategory::Other,
        }
    }

    #[inline]
    pub fn is_type(&self) -> bool {
        matches!(self.kind, DeclKind::Type { .. })
    }

    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self.kind, DeclKind::Value { .. })
    }

    pub fn as_extension(&self) -> Option<&ExtensionDecl> {
        match &self.kind {
            DeclKind::Extension(ext) => Some(ext),
            _ => None,
        }
    }

    /// The type a type declaration introduces or a value declaration has.
    pub fn ty(&self) -> Option<Idx> {
        match self.kind {
            DeclKind::Type { declared } => Some(declared),
            DeclKind::Value { ty, .. } => Some(ty),
            DeclKind::Extension(_) | DeclKind::Other => None,
        }
    }
}

/// Append-only storage for every declaration in a compilation session.
///
/// Parsed and synthesized declarations share the arena; all of them are
/// released together when the session is dropped.
#[derive(Clone, Debug, Default)]
pub struct DeclArena {
    decls: Vec<Decl>,
}

impl DeclArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a declaration and return its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` declarations.
    pub fn alloc(&mut self, decl: Decl) -> DeclId {
        let id = u32::try_from(self.decls.len())
            .unwrap_or_else(|_| panic!("declaration arena exceeded u32::MAX entries"));
        self.decls.push(decl);
        DeclId(id)
    }

    #[inline]
    pub fn get(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl Index<DeclId> for DeclArena {
    type Output = Decl;

    #[inline]
    fn index(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }
}
