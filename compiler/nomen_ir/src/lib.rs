//! Nomen IR - identifiers and source locations shared by every resolver crate.
//!
//! - Names for interned identifiers
//! - Spans for source locations
//! - Access paths that narrow what an import exposes
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), compared by index
//! - **Small Handles**: names and spans are `Copy`; an access path keeps its
//!   single component inline

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod access_path;
mod interner;
mod name;
mod span;

pub use access_path::{AccessPath, AccessPathElement};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use span::{Span, SpanError};
