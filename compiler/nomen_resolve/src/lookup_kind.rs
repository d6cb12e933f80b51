//! Lookup mode.

/// How a name is being looked up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Through an explicit scope reference (`Builtin.Int64`, `Geometry.speed`).
    /// The only mode that can see compiler built-ins.
    Qualified,
    /// A bare identifier. Never resolves to a built-in.
    Unqualified,
}

impl LookupKind {
    /// Whether this lookup may synthesize compiler built-ins.
    #[inline]
    pub const fn allows_builtins(self) -> bool {
        matches!(self, LookupKind::Qualified)
    }
}
