//! Encoding of raw sequences into [`CompressedSequence`] values.

use crate::bits::{BitWidthSelector, BitWriter, SIGN_BIT_WIDTH};
use crate::element::Element;
use crate::error::Error;

use super::{CompressedSequence, Mode};

/// A delta between two consecutive elements, split into sign and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct SignedDelta {
    /// Whether the later element is smaller than the earlier one.
    pub negative: bool,
    /// Absolute difference between the two elements.
    pub magnitude: u64,
}

impl SignedDelta {
    /// Computes `next - prev` exactly. Both operands are widened to `u64`, so
    /// the magnitude is exact for every pair of elements, even when the
    /// difference does not fit in a signed 64-bit integer.
    pub fn between<T: Element>(prev: T, next: T) -> Self {
        let (prev, next) = (prev.to_u64(), next.to_u64());
        if next >= prev {
            Self { negative: false, magnitude: next - prev }
        } else {
            Self { negative: true, magnitude: prev - next }
        }
    }
}

/// Encoding methods.
impl<T: Element> CompressedSequence<T> {
    /// Encodes a non-decreasing sequence using unsigned deltas.
    ///
    /// ## Parameters
    /// * `values` - The sequence to encode, sorted in non-decreasing order
    ///
    /// ## Errors
    /// - `EmptyInput` if `values` is empty
    /// - `NotSorted` at the first element smaller than its predecessor; use
    ///   [`CompressedSequence::encode`] for such input
    /// - `TooManyElements` if the element count does not fit in a `u32`
    #[tracing::instrument(skip_all, fields(count = values.len()))]
    pub fn encode_sorted(values: &[T]) -> Result<Self, Error> {
        let (&first_entry, _) = values.split_first().ok_or(Error::EmptyInput)?;
        let count = checked_count(values.len())?;

        // Derive the deltas, rejecting the first decreasing pair. The first
        // entry is stored verbatim, so there is one delta fewer than values.
        let mut deltas = Vec::with_capacity(values.len() - 1);
        for (index, pair) in values.windows(2).enumerate() {
            let (previous, value) = (pair[0].to_u64(), pair[1].to_u64());
            let delta = value.checked_sub(previous).ok_or(Error::NotSorted {
                index: index + 1,
                previous,
                value,
            })?;
            deltas.push(delta);
        }

        let Some(&max_delta) = deltas.iter().max() else {
            return Ok(Self::singleton(first_entry, Mode::Sorted));
        };
        let bit_width = BitWidthSelector::select(Mode::Sorted, max_delta);

        let mut writer = BitWriter::with_capacity(deltas.len() * bit_width as usize);
        for delta in deltas {
            writer.write_field(delta, bit_width);
        }

        Ok(Self::packed(first_entry, count, bit_width, Mode::Sorted, writer))
    }

    /// Encodes a sequence in any order using sign-and-magnitude deltas.
    ///
    /// Every field is one sign bit (`1` when the delta is negative) followed
    /// by `bit_width - 1` bits of magnitude. For example, with a magnitude
    /// width of 4 bits, `2` is stored as `00010` and `-2` as `10010`.
    ///
    /// ## Parameters
    /// * `values` - The sequence to encode
    ///
    /// ## Errors
    /// - `EmptyInput` if `values` is empty
    /// - `TooManyElements` if the element count does not fit in a `u32`
    #[tracing::instrument(skip_all, fields(count = values.len()))]
    pub fn encode(values: &[T]) -> Result<Self, Error> {
        let (&first_entry, _) = values.split_first().ok_or(Error::EmptyInput)?;
        let count = checked_count(values.len())?;

        let deltas: Vec<SignedDelta> = values
            .windows(2)
            .map(|pair| SignedDelta::between(pair[0], pair[1]))
            .collect();

        let Some(max_magnitude) = deltas.iter().map(|delta| delta.magnitude).max() else {
            return Ok(Self::singleton(first_entry, Mode::Unsorted));
        };
        let bit_width = BitWidthSelector::select(Mode::Unsorted, max_magnitude);
        let magnitude_width = bit_width - SIGN_BIT_WIDTH;

        let mut writer = BitWriter::with_capacity(deltas.len() * bit_width as usize);
        for delta in deltas {
            writer.write_field(delta.negative as u64, SIGN_BIT_WIDTH);
            writer.write_field(delta.magnitude, magnitude_width);
        }

        Ok(Self::packed(first_entry, count, bit_width, Mode::Unsorted, writer))
    }

    /// A sequence of a single element: no deltas, no bit width, no bytes.
    fn singleton(first_entry: T, mode: Mode) -> Self {
        tracing::trace!(%first_entry, %mode, "encoded single element sequence");
        Self {
            first_entry,
            count: 1,
            bit_width: 0,
            mode,
            packed_data: Vec::new(),
        }
    }

    /// Wraps the fields written by an encoder into a sequence.
    fn packed(first_entry: T, count: u32, bit_width: u8, mode: Mode, writer: BitWriter) -> Self {
        let packed_data = writer.finish();
        tracing::debug!(
            count,
            bit_width,
            %mode,
            packed_len = packed_data.len(),
            "encoded sequence"
        );

        Self {
            first_entry,
            count,
            bit_width,
            mode,
            packed_data,
        }
    }
}

/// Converts an input length to the stored element count.
fn checked_count(len: usize) -> Result<u32, Error> {
    u32::try_from(len).map_err(|_| Error::TooManyElements(len))
}
