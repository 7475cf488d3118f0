//! MSB-first bit unpacking from a byte buffer.

use super::{low_bits_mask, BITS_PER_BYTE, MAX_FIELD_WIDTH};

/// Replays a packed byte buffer as a sequence of fixed-width fields.
///
/// The reader only moves forward. It has no notion of how many fields the
/// buffer holds: the caller must stop after the known field count, otherwise
/// the zero padding of the final byte reads back as spurious fields.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bytes: &'a [u8],

    /// Index of the next bit to read, counted from the first byte's MSB.
    position: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Number of bits left to read, padding included.
    pub fn remaining_bits(&self) -> usize {
        (self.bytes.len() * BITS_PER_BYTE).saturating_sub(self.position)
    }

    /// Reads the next `width` bits as an unsigned integer.
    ///
    /// ## Returns
    /// * `Some(value)` - The field value, most significant bit first
    /// * `None` - Fewer than `width` bits remain, or `width` exceeds 64; the
    ///   cursor is left unchanged
    pub fn read_field(&mut self, width: u8) -> Option<u64> {
        if width > MAX_FIELD_WIDTH || (width as usize) > self.remaining_bits() {
            return None;
        }

        let mut value = 0u64;
        let mut remaining = width as usize;

        while remaining > 0 {
            let byte = self.bytes[self.position / BITS_PER_BYTE];
            let available = BITS_PER_BYTE - self.position % BITS_PER_BYTE;
            let take = available.min(remaining);

            // Bits of interest sit directly below the bits already consumed
            // from this byte.
            let chunk = (byte >> (available - take)) as u64 & low_bits_mask(take as u8);
            value = (value << take) | chunk;

            self.position += take;
            remaining -= take;
        }

        Some(value)
    }
}
