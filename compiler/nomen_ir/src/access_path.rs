//! Import access paths.
//!
//! An import such as `import Geometry.Meters` narrows what the imported
//! module exposes to the single symbol `Meters`. A bare `import Geometry`
//! carries an empty path and exposes every top-level symbol.
//!
//! Only paths of length zero or one are supported. Longer paths (nested
//! scopes) are a caller bug and trip a debug assertion on construction.

use smallvec::SmallVec;

use crate::{Name, Span};

/// One component of an access path: the selected name and where it was written.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessPathElement {
    pub name: Name,
    pub span: Span,
}

/// Restriction an import places on the imported module's export surface.
///
/// Invariant: at most one element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessPath(SmallVec<[AccessPathElement; 1]>);

impl AccessPath {
    /// The unrestricted path (`import M`).
    #[inline]
    pub fn empty() -> Self {
        AccessPath(SmallVec::new())
    }

    /// A path selecting a single symbol (`import M.name`).
    #[inline]
    pub fn single(name: Name, span: Span) -> Self {
        let mut elements = SmallVec::new();
        elements.push(AccessPathElement { name, span });
        AccessPath(elements)
    }

    /// Build a path from parsed components.
    ///
    /// Debug builds assert the path has at most one element.
    pub fn from_elements(elements: impl IntoIterator<Item = AccessPathElement>) -> Self {
        let elements: SmallVec<[AccessPathElement; 1]> = elements.into_iter().collect();
        debug_assert!(
            elements.len() <= 1,
            "access paths longer than one component are not supported"
        );
        AccessPath(elements)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The selected symbol, if the path restricts the import.
    #[inline]
    pub fn selected(&self) -> Option<AccessPathElement> {
        self.0.first().copied()
    }

    /// Whether a lookup of `name` may pass through this path.
    ///
    /// An empty path admits every name; a single-element path admits only
    /// the name it selects.
    #[inline]
    pub fn admits(&self, name: Name) -> bool {
        debug_assert!(self.0.len() <= 1, "access path longer than one component");
        match self.selected() {
            Some(element) => element.name == name,
            None => true,
        }
    }
}
