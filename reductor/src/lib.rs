#![deny(missing_docs)]

//! # Reductor: delta-compressed postings lists
//!
//! `reductor` compresses integer sequences such as the postings lists of an
//! inverted index. Each element after the first is stored as the delta from
//! its predecessor, and every delta is packed into a fixed-width bit field
//! just wide enough for the largest one.
//!
//! ## Usage Example
//!
//! ```
//! use reductor::{CompressedSequence, Mode};
//!
//! let postings: Vec<u32> = vec![100, 102, 104, 108, 110];
//!
//! // Sorted input: unsigned deltas [2, 2, 4, 2] in 3-bit fields.
//! let sequence = CompressedSequence::encode_sorted(&postings).unwrap();
//! assert_eq!(sequence.bit_width(), 3);
//! assert_eq!(sequence.mode(), Mode::Sorted);
//! assert_eq!(sequence.packed_data(), &[0x4A, 0x20]);
//! assert_eq!(sequence.decode(), postings);
//!
//! // Arbitrary order: a sign bit is added to every field.
//! let shuffled: Vec<u64> = vec![102, 100, 110, 108, 104];
//! let sequence = CompressedSequence::encode(&shuffled).unwrap();
//! assert_eq!(sequence.bit_width(), 5);
//! assert_eq!(sequence.iter().collect::<Vec<_>>(), shuffled);
//! ```
//!
//! ## Architecture
//!
//! * **Bits**: field width selection and MSB-first bit packing
//! * **Codec**: the [`CompressedSequence`] value, its encoders and decoder
//! * **Element**: the unsigned integer types a sequence can hold
//!
//! Every operation is synchronous and works on caller-owned values only, so
//! distinct sequences can be encoded and decoded from any number of threads.

pub mod bits;
pub mod codec;
pub mod element;
pub mod error;

#[cfg(any(test, feature = "testing"))]
pub mod testing;


pub use codec::CompressedSequence;
pub use codec::Iter;
pub use codec::Mode;
pub use element::Element;
pub use error::Error;
