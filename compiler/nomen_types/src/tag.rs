//! Type kind tag for tag-driven dispatch.
//!
//! Each type in the pool has a `Tag` that identifies its kind. The tag
//! determines how to interpret the associated `data` field of the item.

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Error placeholder. data: unused.
    Error = 0,
    /// Compiler-intrinsic scalar (`Int64`, `RawPointer`, ...). data: `Name` raw.
    Builtin = 1,
    /// Declared nominal type (struct, enum, class). data: extra index of `[owner, name]`.
    Nominal = 2,
    /// Type alias. data: extra index of `[name, target]`.
    Alias = 3,
    /// Tuple. data: extra index of `[count, elems...]`.
    Tuple = 4,
    /// Function. data: extra index of `[param_count, params..., ret]`.
    Function = 5,
}

impl Tag {
    /// Whether the `data` field points into the pool's extra array.
    #[inline]
    pub const fn uses_extra(self) -> bool {
        matches!(self, Tag::Nominal | Tag::Alias | Tag::Tuple | Tag::Function)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tag::Error => "error",
            Tag::Builtin => "builtin",
            Tag::Nominal => "nominal",
            Tag::Alias => "alias",
            Tag::Tuple => "tuple",
            Tag::Function => "function",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
