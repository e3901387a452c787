//! Handle references.
//!
//! A stored handle is `|CODE (4 bits)|COUNTER (4 bits)|VALUE (COUNTER bytes, big-endian)|`.
//! The code says whether the value is an absolute handle or an offset from
//! the handle of the object that contains the reference.

use crate::types::Handle;

/// Reference code of a stored handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DwgReferenceType {
    Undefined = 0,
    SoftOwnership = 2,
    HardOwnership = 3,
    SoftPointer = 4,
    HardPointer = 5,
    /// Base handle + 1
    PlusOne = 6,
    /// Base handle - 1
    MinusOne = 8,
    /// Base handle + value
    PlusOffset = 0xA,
    /// Base handle - value
    MinusOffset = 0xC,
}

impl DwgReferenceType {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DwgReferenceType::Undefined),
            2 => Some(DwgReferenceType::SoftOwnership),
            3 => Some(DwgReferenceType::HardOwnership),
            4 => Some(DwgReferenceType::SoftPointer),
            5 => Some(DwgReferenceType::HardPointer),
            6 => Some(DwgReferenceType::PlusOne),
            8 => Some(DwgReferenceType::MinusOne),
            0xA => Some(DwgReferenceType::PlusOffset),
            0xC => Some(DwgReferenceType::MinusOffset),
            _ => None,
        }
    }

    pub fn is_absolute(&self) -> bool {
        (*self as u8) <= 5
    }
}

/// A handle as read from an object, not yet resolved.
///
/// Decoded records keep their references in this form. Whoever follows a
/// reference resolves it against the handle of the object it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleReference {
    /// Reference code (upper 4 bits of the leading byte)
    pub code: u8,
    /// Number of value bytes (lower 4 bits of the leading byte)
    pub counter: u8,
    /// Value assembled from the `counter` bytes
    pub value: u64,
}

impl HandleReference {
    pub fn new(code: u8, counter: u8, value: u64) -> Self {
        Self {
            code,
            counter,
            value,
        }
    }

    /// Absolute reference to `handle`.
    pub fn absolute(handle: Handle) -> Self {
        let value = handle.value();
        let counter = (8 - value.leading_zeros() / 8) as u8;
        Self::new(DwgReferenceType::SoftPointer as u8, counter, value)
    }

    /// Resolve against the handle of the object holding the reference.
    pub fn resolve(&self, base: Handle) -> Handle {
        let base = base.value();
        let value = match self.code {
            0x6 => base.wrapping_add(1),
            0x8 => base.wrapping_sub(1),
            0xA => base.wrapping_add(self.value),
            0xC => base.wrapping_sub(self.value),
            _ => self.value,
        };
        Handle::new(value)
    }

    pub fn reference_type(&self) -> Option<DwgReferenceType> {
        DwgReferenceType::from_code(self.code)
    }

    /// An absolute reference with value 0 points nowhere.
    pub fn is_null(&self) -> bool {
        self.value == 0 && self.reference_type().map_or(true, |t| t.is_absolute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_type_from_code() {
        assert_eq!(
            DwgReferenceType::from_code(5),
            Some(DwgReferenceType::HardPointer)
        );
        assert_eq!(DwgReferenceType::from_code(1), None);
        assert_eq!(DwgReferenceType::from_code(7), None);
        assert!(DwgReferenceType::SoftOwnership.is_absolute());
        assert!(!DwgReferenceType::PlusOne.is_absolute());
    }

    #[test]
    fn test_resolve_absolute() {
        for code in [0u8, 2, 3, 4, 5] {
            let href = HandleReference::new(code, 1, 0x1A);
            assert_eq!(href.resolve(Handle::new(0x50)), Handle::new(0x1A));
        }
    }

    #[test]
    fn test_resolve_relative() {
        let base = Handle::new(0x10);
        assert_eq!(HandleReference::new(6, 0, 0).resolve(base), Handle::new(0x11));
        assert_eq!(HandleReference::new(8, 0, 0).resolve(base), Handle::new(0x0F));
        assert_eq!(HandleReference::new(0xA, 1, 5).resolve(base), Handle::new(0x15));
        assert_eq!(HandleReference::new(0xC, 1, 3).resolve(base), Handle::new(0x0D));
    }

    #[test]
    fn test_null_reference() {
        assert!(HandleReference::default().is_null());
        assert!(HandleReference::new(4, 0, 0).is_null());
        assert!(!HandleReference::new(6, 0, 0).is_null());
    }

    #[test]
    fn test_absolute_counter() {
        let href = HandleReference::absolute(Handle::new(0x1234));
        assert_eq!(href.counter, 2);
        assert_eq!(href.resolve(Handle::NULL), Handle::new(0x1234));
        assert_eq!(HandleReference::absolute(Handle::NULL).counter, 0);
    }
}
