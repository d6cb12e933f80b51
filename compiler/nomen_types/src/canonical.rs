//! Canonicalization seam.

use crate::Idx;

/// Stable map key for a type: the index of its canonical form.
///
/// Two types that differ only syntactically (through aliases, at any depth)
/// have equal keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CanonicalKey(Idx);

impl CanonicalKey {
    #[inline]
    pub const fn new(canonical: Idx) -> Self {
        CanonicalKey(canonical)
    }

    /// The canonical type this key stands for.
    #[inline]
    pub const fn idx(self) -> Idx {
        self.0
    }
}

/// Pure mapping from a type to its canonical key.
pub trait Canonicalize {
    /// Canonical key of `ty`.
    fn canonical(&self, ty: Idx) -> CanonicalKey;

    /// Whether `ty` is the placeholder left behind by a failed type lookup.
    fn is_error(&self, ty: Idx) -> bool {
        ty.is_error()
    }
}
