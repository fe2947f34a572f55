// src/lib.rs
//! # FIFO Staging Buffer Library
//!
//! A contiguous, element-typed staging buffer for producer/consumer
//! pipelines: network framing, stream parsers and codec pipelines that pop
//! processed data from the front while appending new data at the back.
//!
//! Features:
//! - One contiguous allocation; extracted data is always a straight run
//! - Lazy head compaction amortises the pop-front/push-back pattern to O(1)
//! - Full element-type semantics: clone, move and drop effects are exact
//!   for non-trivial element types, on every path including panics
//! - Appends by clone ([`ShiftBuffer::write`]) or by ownership transfer
//!   ([`ShiftBuffer::shove`])
//! - Secure erasure of staged sensitive data via the `zeroize` crate
//!   ([`ShiftBuffer::burn`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod shift;

// Re-export main types
pub use error::{BufferError, Result, ResultExt};
pub use shift::ShiftBuffer;

/// Commonly used imports.
pub mod prelude {
    pub use crate::error::{BufferError, Result, ResultExt};
    pub use crate::shift::ShiftBuffer;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_basic_byte_pipeline() {
        let mut buf = ShiftBuffer::new();
        buf.write(&[1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(buf.len(), 10);

        let mut out = [0u8; 10];
        buf.read(&mut out).unwrap();
        assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_steady_state_cycling() {
        let mut buf = ShiftBuffer::with_capacity(64);
        let mut next = 0u8;
        let mut expected = 0u8;

        for _ in 0..1000 {
            let chunk: Vec<u8> = (0..10).map(|_| {
                let value = next;
                next = next.wrapping_add(1);
                value
            }).collect();
            buf.write(&chunk);

            let mut out = [0u8; 10];
            buf.read(&mut out).unwrap();
            for value in out {
                assert_eq!(value, expected);
                expected = expected.wrapping_add(1);
            }
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn test_underflow_error_surfaces() {
        let mut buf = ShiftBuffer::<u8>::new();
        let mut out = [0u8; 1];
        assert!(matches!(
            buf.read(&mut out),
            Err(BufferError::Underflow { requested: 1, available: 0 })
        ));
    }
}
