//! Bit-level primitives used by the codec.
//!
//! * [`BitWidthSelector`] picks the field width for a set of deltas
//! * [`BitWriter`] packs fixed-width fields MSB-first into bytes
//! * [`BitReader`] replays those fields in the same order

mod reader;
mod width;
mod writer;

pub use reader::BitReader;
pub use width::BitWidthSelector;
pub use width::SIGN_BIT_WIDTH;
pub use writer::BitWriter;

/// Number of bits in a byte.
pub(crate) const BITS_PER_BYTE: usize = 8;

/// Largest field width the writer and reader can move in a single call.
pub const MAX_FIELD_WIDTH: u8 = 64;

/// Returns a mask selecting the low `width` bits of a `u64`.
fn low_bits_mask(width: u8) -> u64 {
    match width {
        0 => 0,
        w if w >= MAX_FIELD_WIDTH => u64::MAX,
        w => (1u64 << w) - 1,
    }
}

/// Number of bytes needed to hold `field_count` fields of `bit_width` bits,
/// including the zero padding of the final byte.
pub fn packed_len(field_count: usize, bit_width: u8) -> usize {
    field_count
        .saturating_mul(bit_width as usize)
        .div_ceil(BITS_PER_BYTE)
}
