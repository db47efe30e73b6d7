//! Error types for the Bloom filter subsystem

use thiserror::Error;

/// Errors that can occur in filter algebra and wire (de)serialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Binary operation on filters with different table sizes.
    ///
    /// Recoverable: callers treat it as "the filters differ".
    #[error("Bloom filter size mismatch: {expected} != {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Buffer too small: need {needed} bytes, {available} available")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Truncated input: need {needed} bytes, {available} remaining")]
    TruncatedInput { needed: usize, available: usize },

    /// A decoded filter header announced an implausible `M` or `k`.
    #[error("Filter dimension {size} exceeds maximum decodable size")]
    TableTooLarge { size: u64 },
}

impl FilterError {
    /// Shorthand used by every binary filter operation.
    pub(crate) fn mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Whether this error is the recoverable size-mismatch signal.
    pub fn is_size_mismatch(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. })
    }
}
