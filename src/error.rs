//! Error types for the DWG object decoder

use std::io;
use thiserror::Error;

use crate::io::dwg::object_type::DwgObjectType;

/// Main error type for decoding operations
#[derive(Debug, Error)]
pub enum DwgError {
    /// IO error reported by the byte source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Handle has no entry in the object index
    #[error("Handle not found in object index: {0:#X}")]
    HandleNotFound(u64),

    /// A primitive read would run past the end of the object buffer
    #[error("Read overrun: {requested} bits requested, {available} bits available")]
    Overrun { requested: u64, available: u64 },

    /// Declared object size is inconsistent with the framed chunk
    #[error("Object framing mismatch: {0}")]
    FramingMismatch(String),

    /// Object type has no decoder
    #[error("Object type not implemented: {0:?}")]
    NotImplemented(DwgObjectType),

    /// Custom class has no decoder
    #[error("Custom class not implemented: {0}")]
    ClassNotImplemented(String),

    /// A decoded record was accessed as the wrong variant
    #[error("Object variant mismatch: expected {expected}, found {found:?}")]
    VariantMismatch {
        expected: &'static str,
        found: DwgObjectType,
    },

    /// Invalid handle reference code
    #[error("Invalid handle reference code: {0:#X}")]
    InvalidHandleCode(u8),

    /// Malformed data (reserved bit codes, bad sentinels, ...)
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for decoding operations
pub type Result<T> = std::result::Result<T, DwgError>;

impl DwgError {
    /// Whether this error reports an unimplemented object kind.
    pub fn is_not_implemented(&self) -> bool {
        matches!(
            self,
            DwgError::NotImplemented(_) | DwgError::ClassNotImplemented(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DwgError::HandleNotFound(0x2A);
        assert_eq!(err.to_string(), "Handle not found in object index: 0x2A");
    }

    #[test]
    fn test_overrun_display() {
        let err = DwgError::Overrun {
            requested: 64,
            available: 3,
        };
        assert!(err.to_string().contains("64 bits requested"));
        assert!(err.to_string().contains("3 bits available"));
    }

    #[test]
    fn test_not_implemented_is_distinct() {
        let err = DwgError::NotImplemented(DwgObjectType::Group);
        assert!(err.is_not_implemented());
        assert!(!DwgError::HandleNotFound(1).is_not_implemented());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let err: DwgError = io_err.into();
        assert!(matches!(err, DwgError::Io(_)));
    }
}
