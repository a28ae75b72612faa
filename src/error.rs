//! Error types for bloomslot operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`], whose error
//! type is [`BloomError`]. Errors are reported at the point of failure and are
//! never retried internally.
//!
//! # Error Propagation
//!
//! ```
//! use bloomslot::{BloomError, PackedBitFilter, Result};
//!
//! fn build(size: usize) -> Result<PackedBitFilter> {
//!     let filter = PackedBitFilter::new(size, 4)?;
//!     filter.insert("first")?;
//!     Ok(filter)
//! }
//!
//! assert!(build(1 << 10).is_ok());
//! assert!(matches!(build(1000), Err(BloomError::NotPowerOfTwo { .. })));
//! ```

#![allow(clippy::module_name_repetitions)]

use std::io;

/// Result type alias for bloomslot operations.
pub type Result<T> = std::result::Result<T, BloomError>;

/// Errors that can occur while building, mutating, or persisting a filter.
///
/// Construction and load share the same validation, so a corrupted header
/// surfaces as the same variant an invalid constructor argument would.
#[derive(Debug, thiserror::Error)]
pub enum BloomError {
    /// Filter size is below the 64-slot minimum.
    #[error("invalid filter size: {size} slots (minimum is {})", crate::core::params::MIN_SIZE)]
    InvalidSize {
        /// The rejected size.
        size: u64,
    },

    /// Filter size is not a power of two, so indices cannot be folded by mask.
    #[error("invalid filter size: {size} is not a power of two")]
    NotPowerOfTwo {
        /// The rejected size.
        size: u64,
    },

    /// Hash count is zero or negative.
    #[error("invalid hash count: {count} (must be at least 1)")]
    InvalidHashCount {
        /// The rejected count, widened so negative persisted values survive.
        count: i64,
    },

    /// Backing storage (slots or digest buffer) could not be allocated.
    #[error("failed to allocate {bytes} bytes")]
    AllocationFailure {
        /// Number of bytes requested.
        bytes: usize,
    },

    /// Slot index is outside `[0, size)`.
    #[error("slot index {index} out of range for filter of size {size}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Filter size at the time of the call.
        size: usize,
    },

    /// Two filters cannot be combined because their shape differs.
    #[error("filter parameters do not match: {reason}")]
    ParameterMismatch {
        /// Which parameter differed.
        reason: String,
    },

    /// Persisted bytes are not a filter of the expected kind.
    #[error("invalid persisted filter: {reason}")]
    InvalidFormat {
        /// Description of the rejected header or payload.
        reason: String,
    },

    /// Underlying read or write failed, including short reads.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl BloomError {
    /// Create a `ParameterMismatch` error.
    #[must_use]
    pub fn parameter_mismatch(reason: impl Into<String>) -> Self {
        Self::ParameterMismatch {
            reason: reason.into(),
        }
    }

    /// Create an `InvalidFormat` error.
    #[must_use]
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Create an `IndexOutOfRange` error.
    #[must_use]
    pub fn index_out_of_range(index: usize, size: usize) -> Self {
        Self::IndexOutOfRange { index, size }
    }

    /// Create an `AllocationFailure` error.
    #[must_use]
    pub fn allocation_failure(bytes: usize) -> Self {
        Self::AllocationFailure { bytes }
    }

    /// True for errors caused by caller-supplied construction parameters.
    #[must_use]
    pub fn is_invalid_parameters(&self) -> bool {
        matches!(
            self,
            Self::InvalidSize { .. } | Self::NotPowerOfTwo { .. } | Self::InvalidHashCount { .. }
        )
    }

    /// True for I/O failures, including truncated input.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_size() {
        let err = BloomError::InvalidSize { size: 32 };
        let display = err.to_string();
        assert!(display.contains("32"));
        assert!(display.contains("minimum is 64"));
    }

    #[test]
    fn test_display_not_power_of_two() {
        let err = BloomError::NotPowerOfTwo { size: 100_000 };
        assert!(err.to_string().contains("100000"));
        assert!(err.to_string().contains("power of two"));
    }

    #[test]
    fn test_display_index_out_of_range() {
        let err = BloomError::index_out_of_range(1024, 1024);
        let display = err.to_string();
        assert!(display.contains("1024"));
        assert!(display.contains("out of range"));
    }

    #[test]
    fn test_display_parameter_mismatch() {
        let err = BloomError::parameter_mismatch("size 64 vs 128");
        assert!(err.to_string().contains("size 64 vs 128"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let err: BloomError = io_err.into();
        assert!(err.is_io());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_classification() {
        assert!(BloomError::InvalidSize { size: 1 }.is_invalid_parameters());
        assert!(BloomError::NotPowerOfTwo { size: 65 }.is_invalid_parameters());
        assert!(BloomError::InvalidHashCount { count: -1 }.is_invalid_parameters());
        assert!(!BloomError::allocation_failure(8).is_invalid_parameters());
        assert!(!BloomError::invalid_format("bad magic").is_io());
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<()> {
            Err(BloomError::parameter_mismatch("hash count"))
        }

        fn outer() -> Result<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(BloomError::ParameterMismatch { .. })));
    }
}
