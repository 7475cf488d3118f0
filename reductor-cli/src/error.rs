//! Top-level error type for the reductor command line tool

use std::num::ParseIntError;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The codec rejected the input or a persisted sequence.
    #[error("codec error: {0}")]
    Codec(#[from] reductor::Error),

    /// The inspection report could not be serialized.
    #[error("could not serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// A token in the text input is not an unsigned integer.
    #[error("could not parse {token:?} on line {line}: {source}")]
    ParseInt {
        /// The offending token.
        token: String,
        /// One-based line number of the token.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// A value in the text input is too large for the element width.
    #[error("value {value} on line {line} does not fit in {width} bits")]
    ValueOutOfRange {
        /// The offending value.
        value: u64,
        /// One-based line number of the value.
        line: usize,
        /// The configured element width in bits.
        width: u8,
    },

    /// A persisted sequence is shorter than its fixed size header.
    #[error("persisted sequence is truncated: need at least {expected} bytes, got {actual}")]
    Truncated {
        /// Size of the header for the element width.
        expected: usize,
        /// Number of bytes available.
        actual: usize,
    },

    /// An element width other than 32 or 64 bits was requested.
    #[error("unsupported element width: {0}, must be 32 or 64")]
    UnsupportedWidth(u8),
}
