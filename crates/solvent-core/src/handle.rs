//! Type-safe expression handles.
//!
//! Handles are 32-bit indices into an [`ExprArena`](crate::ExprArena). They
//! are only meaningful for the arena that produced them.

use std::fmt;

/// A handle to an expression in the arena.
///
/// Two handles from the same arena are equal if and only if they point to
/// structurally identical expressions, thanks to hash-consing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprHandle(u32);

impl ExprHandle {
    /// Creates a new handle from an index.
    ///
    /// This is primarily for internal use by the arena.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the raw index as a `usize` for slice access.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0)
    }
}

impl fmt::Display for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_equality() {
        assert_eq!(ExprHandle::new(7), ExprHandle::new(7));
        assert_ne!(ExprHandle::new(7), ExprHandle::new(8));
        assert_eq!(ExprHandle::new(7).slot(), 7);
    }

    #[test]
    fn test_handle_size() {
        assert_eq!(std::mem::size_of::<ExprHandle>(), 4);
    }
}
