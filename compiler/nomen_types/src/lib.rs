//! Type representation used by the resolver.
//!
//! Types live in a [`Pool`] and are referenced by 32-bit [`Idx`] handles.
//! The pool hash-conses structurally identical types to a single index and
//! records the canonical form of every type at interning time, so asking for
//! a canonical key is an O(1) table read.
//!
//! Name resolution only needs canonical keys (to group extensions) and the
//! ability to tell an error type apart; both are exposed through the
//! [`Canonicalize`] trait so the resolver does not depend on the pool layout.

mod canonical;
mod idx;
mod pool;
mod tag;

pub use canonical::{CanonicalKey, Canonicalize};
pub use idx::Idx;
pub use pool::{Pool, TypeData};
pub use tag::Tag;
