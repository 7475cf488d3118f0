//! # Delta-compressed sequences
//!
//! A [`CompressedSequence`] stores a list of unsigned integers as its first
//! entry followed by the deltas between consecutive entries, each delta
//! packed into a fixed-width bit field just wide enough for the largest one.
//!
//! ## Modes
//!
//! * [`Mode::Sorted`]: the input is non-decreasing, so every delta is
//!   non-negative and stored as a plain unsigned field.
//! * [`Mode::Unsorted`]: the input is in arbitrary order. Every field starts
//!   with a sign bit (`1` for negative) followed by the delta's magnitude.
//!
//! ## Layout
//!
//! The packed buffer holds `count - 1` fields concatenated MSB-first with no
//! alignment between them. The final byte is zero-padded in its low-order
//! bits. The metadata (first entry, count, bit width and mode) is kept in
//! the value itself and is not part of the buffer.

mod decoder;
mod encoder;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bits::{packed_len, BitWidthSelector};
use crate::element::Element;
use crate::error::Error;

pub use decoder::Iter;

/// Size in bytes of the element count in the footprint.
pub const COUNT_SIZE: usize = 4;

/// Size in bytes of the bit width in the footprint.
pub const BIT_WIDTH_SIZE: usize = 1;

/// Size in bytes of the mode tag in the footprint.
pub const MODE_SIZE: usize = 1;

/// How the deltas of a sequence are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Non-decreasing input, unsigned deltas.
    #[default]
    Sorted,
    /// Arbitrary input, sign bit plus magnitude per delta.
    Unsorted,
}

impl Mode {
    /// Wire tag for [`Mode::Sorted`].
    pub const SORTED_TAG: u8 = 0;

    /// Wire tag for [`Mode::Unsorted`].
    pub const UNSORTED_TAG: u8 = 1;

    /// Returns whether this is [`Mode::Sorted`].
    pub fn is_sorted(&self) -> bool {
        matches!(self, Mode::Sorted)
    }

    /// Returns the single byte tag identifying this mode.
    pub fn as_u8(&self) -> u8 {
        match self {
            Mode::Sorted => Self::SORTED_TAG,
            Mode::Unsorted => Self::UNSORTED_TAG,
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            Self::SORTED_TAG => Ok(Mode::Sorted),
            Self::UNSORTED_TAG => Ok(Mode::Unsorted),
            _ => Err(Error::UnrecognizedMode(tag)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sorted => write!(f, "sorted"),
            Mode::Unsorted => write!(f, "unsorted"),
        }
    }
}

/// A postings list in delta-compressed form.
///
/// # Invariants
///
/// - `count <= 1` implies a zero bit width and an empty buffer
/// - `count >= 2` implies a bit width within the bounds of the mode and
///   element type
/// - the buffer is exactly `ceil((count - 1) * bit_width / 8)` bytes long
///
/// Values are only ever built by the encoders or by
/// [`CompressedSequence::from_parts`], both of which uphold the invariants,
/// and are immutable afterwards. Decoding a value therefore always succeeds.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CompressedSequence<T: Element> {
    first_entry: T,
    count: u32,
    bit_width: u8,
    mode: Mode,
    packed_data: Vec<u8>,
}

impl<T: Element> Default for CompressedSequence<T> {
    /// An empty sequence, which decodes to no elements.
    fn default() -> Self {
        Self {
            first_entry: T::default(),
            count: 0,
            bit_width: 0,
            mode: Mode::default(),
            packed_data: Vec::new(),
        }
    }
}

impl<T: Element> CompressedSequence<T> {
    /// Rebuilds a sequence from its persisted fields, checking every
    /// structural invariant so that the result is guaranteed to decode.
    ///
    /// ## Errors
    /// - `UnexpectedPayload` if `count <= 1` but a bit width or packed
    ///   bytes were supplied
    /// - `InvalidBitWidth` if the width is outside the range allowed for the
    ///   mode and element type
    /// - `PackedLengthMismatch` if the buffer length disagrees with the
    ///   count and bit width
    pub fn from_parts(
        first_entry: T,
        count: u32,
        bit_width: u8,
        mode: Mode,
        packed_data: Vec<u8>,
    ) -> Result<Self, Error> {
        if count <= 1 {
            if bit_width != 0 || !packed_data.is_empty() {
                return Err(Error::UnexpectedPayload(count));
            }
        } else {
            let min = BitWidthSelector::min_width(mode);
            let max = BitWidthSelector::max_width::<T>(mode);
            if !(min..=max).contains(&bit_width) {
                return Err(Error::InvalidBitWidth { bit_width, min, max });
            }

            let expected = packed_len(count as usize - 1, bit_width);
            if packed_data.len() != expected {
                return Err(Error::PackedLengthMismatch {
                    expected,
                    actual: packed_data.len(),
                });
            }
        }

        Ok(Self {
            first_entry,
            count,
            bit_width,
            mode,
            packed_data,
        })
    }

    /// The first element of the original sequence.
    pub fn first_entry(&self) -> T {
        self.first_entry
    }

    /// Number of elements in the original sequence.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of elements in the original sequence, as a `usize`.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Returns whether the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Width in bits of every packed delta field, sign bit included.
    pub fn bit_width(&self) -> u8 {
        self.bit_width
    }

    /// How the deltas are encoded.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The packed delta fields.
    pub fn packed_data(&self) -> &[u8] {
        &self.packed_data
    }

    /// Footprint of the sequence in bytes: the first entry, the count, the
    /// bit width, the mode tag and the packed buffer.
    ///
    /// This is a size estimate for reporting, not a serialization routine.
    pub fn size_in_bytes(&self) -> usize {
        T::BYTES + COUNT_SIZE + BIT_WIDTH_SIZE + MODE_SIZE + self.packed_data.len()
    }
}

impl<T: Element> fmt::Display for CompressedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompressedSequence(first_entry={}, count={}, bit_width={}, mode={}, packed={}B)",
            self.first_entry,
            self.count,
            self.bit_width,
            self.mode,
            self.packed_data.len()
        )
    }
}

impl<T: Element> fmt::Debug for CompressedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressedSequence")
            .field("first_entry", &self.first_entry)
            .field("count", &self.count)
            .field("bit_width", &self.bit_width)
            .field("mode", &self.mode)
            .field("packed_data", &format_args!("{:02x?}", self.packed_data))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use test_case::test_case;

    #[test_case(Mode::Sorted => 0; "sorted")]
    #[test_case(Mode::Unsorted => 1; "unsorted")]
    fn test_mode_tags(mode: Mode) -> u8 {
        let tag = mode.as_u8();
        assert_eq!(Mode::try_from(tag).unwrap(), mode);
        tag
    }

    #[test_case(Mode::Sorted => true; "sorted")]
    #[test_case(Mode::Unsorted => false; "unsorted")]
    fn test_mode_is_sorted(mode: Mode) -> bool {
        mode.is_sorted()
    }

    #[test]
    fn test_unknown_mode_tag() {
        assert_matches!(Mode::try_from(2), Err(Error::UnrecognizedMode(2)));
    }

    #[test]
    fn test_default_is_empty() {
        let sequence = CompressedSequence::<u32>::default();

        assert!(sequence.is_empty());
        assert_eq!(sequence.count(), 0);
        assert_eq!(sequence.bit_width(), 0);
        assert!(sequence.packed_data().is_empty());
        assert_eq!(sequence.decode(), Vec::<u32>::new());
    }

    #[test]
    fn test_from_parts_accepts_worked_example() {
        let sequence =
            CompressedSequence::<u32>::from_parts(100, 5, 3, Mode::Sorted, vec![0x4A, 0x20])
                .unwrap();

        assert_eq!(sequence.decode(), vec![100, 102, 104, 108, 110]);
    }

    #[test]
    fn test_from_parts_accepts_singleton() {
        let sequence =
            CompressedSequence::<u64>::from_parts(42, 1, 0, Mode::Unsorted, Vec::new()).unwrap();

        assert_eq!(sequence.decode(), vec![42]);
    }

    #[test_case(1, 3, vec![] => Err(Error::UnexpectedPayload(1)); "singleton with width")]
    #[test_case(1, 0, vec![0] => Err(Error::UnexpectedPayload(1)); "singleton with bytes")]
    #[test_case(0, 0, vec![0] => Err(Error::UnexpectedPayload(0)); "empty with bytes")]
    #[test_case(5, 0, vec![] => Err(Error::InvalidBitWidth { bit_width: 0, min: 1, max: 32 }); "zero width")]
    #[test_case(5, 33, vec![0; 17] => Err(Error::InvalidBitWidth { bit_width: 33, min: 1, max: 32 }); "too wide")]
    #[test_case(5, 3, vec![0x4A] => Err(Error::PackedLengthMismatch { expected: 2, actual: 1 }); "truncated")]
    #[test_case(5, 3, vec![0x4A, 0x20, 0] => Err(Error::PackedLengthMismatch { expected: 2, actual: 3 }); "trailing byte")]
    fn test_from_parts_rejects(count: u32, bit_width: u8, packed: Vec<u8>) -> Result<(), Error> {
        CompressedSequence::<u32>::from_parts(7, count, bit_width, Mode::Sorted, packed).map(|_| ())
    }

    #[test]
    fn test_from_parts_unsorted_width_bounds() {
        let result = CompressedSequence::<u32>::from_parts(0, 2, 1, Mode::Unsorted, vec![0]);
        assert_matches!(
            result,
            Err(Error::InvalidBitWidth { bit_width: 1, min: 2, max: 33 })
        );

        let result = CompressedSequence::<u64>::from_parts(0, 2, 65, Mode::Unsorted, vec![0; 9]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_size_in_bytes_components() {
        let narrow = CompressedSequence::<u32>::encode_sorted(&[100, 102, 104, 108, 110]).unwrap();
        let wide = CompressedSequence::<u64>::encode_sorted(&[100, 102, 104, 108, 110]).unwrap();

        // first entry + count + bit width + mode + packed bytes
        assert_eq!(narrow.size_in_bytes(), 4 + 4 + 1 + 1 + 2);
        assert_eq!(wide.size_in_bytes(), 8 + 4 + 1 + 1 + 2);
    }

    #[test]
    fn test_size_in_bytes_is_pure() {
        let sequence = CompressedSequence::<u32>::encode(&[102, 100, 110, 108, 104]).unwrap();
        let before = sequence.clone();

        let sizes: Vec<_> = (0..3).map(|_| sequence.size_in_bytes()).collect();

        assert_eq!(sizes, vec![sizes[0]; 3]);
        assert_eq!(sequence, before);
    }

    #[test]
    fn test_display() {
        let sequence = CompressedSequence::<u32>::encode_sorted(&[100, 102, 104, 108, 110]).unwrap();
        assert_eq!(
            sequence.to_string(),
            "CompressedSequence(first_entry=100, count=5, bit_width=3, mode=sorted, packed=2B)"
        );
    }
}
