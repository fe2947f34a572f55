// src/error.rs
//! Error types for buffer operations with conversion support

use std::fmt;

/// Errors that can occur during buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Requested capacity cannot be represented as a single allocation
    SizeTooBig,
    /// Extraction requested more elements than the buffer holds
    Underflow {
        /// Number of elements the caller asked for
        requested: usize,
        /// Number of elements that were actually available
        available: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeTooBig => write!(f, "Buffer capacity too big"),
            Self::Underflow {
                requested,
                available,
            } => write!(
                f,
                "Requested {} elements but only {} are buffered",
                requested, available
            ),
        }
    }
}

impl std::error::Error for BufferError {}

// ============================================================================
// ERROR CONVERSION - Makes the buffer library compatible with host error types
// ============================================================================

/// Convert BufferError to std::io::Error
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;
        match err {
            BufferError::Underflow { .. } => std::io::Error::new(ErrorKind::UnexpectedEof, err),
            BufferError::SizeTooBig => std::io::Error::new(ErrorKind::InvalidInput, err),
        }
    }
}

/// Convert BufferError to anyhow::Error (for application handler compatibility)
#[cfg(feature = "anyhow")]
impl From<BufferError> for anyhow::Error {
    fn from(err: BufferError) -> Self {
        anyhow::anyhow!("{}", err)
    }
}

// ============================================================================
// RESULT TYPE ALIASES
// ============================================================================

/// Result type alias for buffer operations
///
/// Note: When using with other Result types (like anyhow::Result),
/// either qualify the type (`shiftbuf::Result<T>`) or use the conversion traits.
pub type Result<T> = std::result::Result<T, BufferError>;

// ============================================================================
// EXTENSION TRAIT FOR EASY CONVERSION
// ============================================================================

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_io() {
        let buf_err = BufferError::Underflow {
            requested: 8,
            available: 3,
        };
        let io_err: std::io::Error = buf_err.into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::UnexpectedEof);

        let io_err: std::io::Error = BufferError::SizeTooBig.into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_display() {
        let err = BufferError::Underflow {
            requested: 8,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Requested 8 elements but only 3 are buffered"
        );
    }

    #[test]
    fn test_result_ext() {
        let result: Result<u32> = Ok(42);
        let io_result = result.into_io();
        assert_eq!(io_result.unwrap(), 42);
    }

    #[cfg(feature = "anyhow")]
    #[test]
    fn test_anyhow_conversion() {
        let buf_err = BufferError::SizeTooBig;
        let anyhow_err: anyhow::Error = buf_err.into();
        assert!(anyhow_err.to_string().contains("too big"));
    }
}
