//! Top-level error type for the reductor library
//!

/// Errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Attempted to encode a zero-length sequence.
    #[error("attempt to encode an empty sequence")]
    EmptyInput,

    /// The sorted encoder was handed a sequence that decreases somewhere.
    /// Deltas are stored unsigned in sorted mode, so such input can only be
    /// encoded with the unsorted encoder.
    #[error("value {value} at index {index} is smaller than its predecessor {previous}")]
    NotSorted {
        /// Position of the offending value in the input.
        index: usize,
        /// The value immediately preceding the offending value.
        previous: u64,
        /// The offending value.
        value: u64,
    },

    /// The element count is stored in four bytes, so longer sequences
    /// cannot be represented.
    #[error("sequence of {0} elements exceeds the maximum of {max}", max = u32::MAX)]
    TooManyElements(usize),

    /// The bit width is outside of the range allowed for the element type
    /// and mode.
    #[error("invalid bit width {bit_width}, must be within {min}..={max}")]
    InvalidBitWidth {
        /// The bit width that was supplied.
        bit_width: u8,
        /// The smallest bit width allowed.
        min: u8,
        /// The largest bit width allowed.
        max: u8,
    },

    /// The packed buffer is not the size implied by the element count and
    /// bit width.
    #[error("packed data is {actual} bytes, expected {expected}")]
    PackedLengthMismatch {
        /// Length implied by the metadata.
        expected: usize,
        /// Length of the buffer that was supplied.
        actual: usize,
    },

    /// A sequence with fewer than two elements carries no deltas, but a
    /// non-zero bit width or non-empty buffer was supplied.
    #[error("a sequence of {0} elements must not carry a bit width or packed data")]
    UnexpectedPayload(u32),

    /// The mode tag byte did not name a known mode.
    #[error("unrecognized mode tag: {0}")]
    UnrecognizedMode(u8),
}
