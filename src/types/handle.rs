//! Object handles
//!
//! Every object stored in a drawing is addressed by a 64-bit handle. The
//! object index maps handles to byte offsets; chain links between objects
//! are expressed as handles too.

use std::fmt;

/// Identifier of a stored object.
///
/// Handle 0 is never assigned to an object and is used as the "no link"
/// value inside records (an absent owner, the end of a chain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The null handle (0)
    pub const NULL: Handle = Handle(0);

    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// The handle that immediately follows this one.
    ///
    /// Objects written without explicit chain links are stored under
    /// consecutive handles, so this is the implicit "next" of a chain.
    #[inline]
    pub const fn next(&self) -> Handle {
        Handle(self.0.wrapping_add(1))
    }
}

impl From<u64> for Handle {
    fn from(value: u64) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#X}", self.0)
    }
}

impl fmt::UpperHex for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
