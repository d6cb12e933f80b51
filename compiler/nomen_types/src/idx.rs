//! Type index handle.
//!
//! All types are stored in a [`Pool`](crate::Pool) and referenced by their
//! 32-bit index. Type identity is index identity; equivalence up to aliases
//! is answered by [`Canonicalize`](crate::Canonicalize).

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Pre-interned Types ===
    // Every pool interns these first, in this order.

    /// The error type (placeholder for a type that failed to resolve).
    pub const ERROR: Self = Self(0);
    /// The empty tuple `()`.
    pub const UNIT: Self = Self(1);

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ERROR => write!(f, "Idx::ERROR"),
            Self::UNIT => write!(f, "Idx::UNIT"),
            Self::NONE => write!(f, "Idx::NONE"),
            Self(raw) => write!(f, "Idx({raw})"),
        }
    }
}

impl Default for Idx {
    fn default() -> Self {
        Self::NONE
    }
}
