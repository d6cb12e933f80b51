//! Module-scoped name resolution.
//!
//! Given an identifier and a [`LookupKind`], find the declaration(s) it
//! refers to, honoring module boundaries, import access paths, compiler
//! built-ins, and extensions that add members to existing types.
//!
//! # Architecture
//!
//! ```text
//! Session (owns modules, declarations, types)
//!     ├── lookup_global_*   import-aware, first import wins
//!     └── lookup_*          local to one module
//!           └── Module
//!                 ├── Builtin          → BuiltinCache (synthesize + memoize)
//!                 └── TranslationUnit  → TopLevelIndex, ExtensionIndex
//! ```
//!
//! Every cache is built on first use and lives in its module until
//! [`Session::invalidate_cache`] discards it. Lookups take `&mut Session`;
//! concurrent first use of a module's cache is not supported.
//!
//! "Not found" is an empty result, never an error. Caller bugs (nested
//! access paths, access paths into the builtin module, non-empty result
//! buffers) are debug assertions.

mod builtins;
mod decl;
mod extensions;
mod lookup_kind;
mod module;
mod resolver;
mod session;
mod top_level;

pub use builtins::{Intrinsics, SynthCx, SynthesizeBuiltin};
pub use decl::{Decl, DeclArena, DeclCategory, DeclId, DeclKind, ExtensionDecl, ValueKind};
pub use lookup_kind::LookupKind;
pub use module::{BuiltinModule, Import, Module, ModuleId, ModuleStage, TranslationUnit};
pub use session::Session;
