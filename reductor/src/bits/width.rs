//! Bit width selection for delta fields.

use crate::codec::Mode;
use crate::element::Element;

/// Width of the sign bit prefixed to every field in unsorted mode.
pub const SIGN_BIT_WIDTH: u8 = 1;

/// Computes the minimum field width able to hold every delta of a sequence.
pub struct BitWidthSelector;

impl BitWidthSelector {
    /// Returns the number of bits needed to represent `max_magnitude` as an
    /// unsigned integer.
    ///
    /// A magnitude of zero still needs a one bit field: a run of equal
    /// values has deltas of zero, and every field must be at least one bit
    /// wide for the packed layout to stay well-formed.
    pub fn bits_needed(max_magnitude: u64) -> u8 {
        let bits = u64::BITS - max_magnitude.leading_zeros();
        (bits as u8).max(1)
    }

    /// Returns the field width for a sequence encoded in `mode` whose largest
    /// delta magnitude is `max_magnitude`. Unsorted fields carry an extra
    /// leading sign bit.
    pub fn select(mode: Mode, max_magnitude: u64) -> u8 {
        match mode {
            Mode::Sorted => Self::bits_needed(max_magnitude),
            Mode::Unsorted => SIGN_BIT_WIDTH + Self::bits_needed(max_magnitude),
        }
    }

    /// Smallest field width a sequence with at least one delta can have in
    /// `mode`.
    pub fn min_width(mode: Mode) -> u8 {
        Self::select(mode, 0)
    }

    /// Largest field width a sequence of `T` can have in `mode`.
    pub fn max_width<T: Element>(mode: Mode) -> u8 {
        match mode {
            Mode::Sorted => T::BITS,
            Mode::Unsorted => SIGN_BIT_WIDTH + T::BITS,
        }
    }
}
