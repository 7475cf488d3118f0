//! MSB-first bit packing into a byte buffer.
//!
//! Fields are laid down most significant bit first and may straddle byte
//! boundaries. Bytes are pushed zeroed and only ever OR'd into, so a final
//! byte that is only partially filled keeps its low-order bits at zero. For
//! the bitstream `010010100010` the writer produces `[0b0100_1010,
//! 0b0010_0000]`, never `[0b0100_1010, 0b0000_0010]`.

use super::{low_bits_mask, BITS_PER_BYTE, MAX_FIELD_WIDTH};

/// Appends fixed-width fields to a growing byte buffer, MSB-first.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// Packed bytes written so far, the last one possibly partial.
    bytes: Vec<u8>,

    /// Total number of bits written so far.
    bit_len: usize,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `total_bits` bits, so that
    /// writing that many bits never reallocates.
    pub fn with_capacity(total_bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(total_bits.div_ceil(BITS_PER_BYTE)),
            bit_len: 0,
        }
    }

    /// Appends the low `width` bits of `value`, most significant bit first.
    ///
    /// Bits of `value` above `width` are ignored. A `width` of zero writes
    /// nothing.
    ///
    /// ## Parameters
    /// * `value` - The field value
    /// * `width` - The number of bits to write, at most 64
    pub fn write_field(&mut self, value: u64, width: u8) {
        debug_assert!(width <= MAX_FIELD_WIDTH, "field width {width} exceeds 64");

        let value = value & low_bits_mask(width);
        let mut remaining = width.min(MAX_FIELD_WIDTH) as usize;

        while remaining > 0 {
            let bit_offset = self.bit_len % BITS_PER_BYTE;
            if bit_offset == 0 {
                self.bytes.push(0);
            }

            // Fill as much of the current byte as the field allows.
            let free = BITS_PER_BYTE - bit_offset;
            let take = free.min(remaining);
            let shift = remaining - take;
            let chunk = ((value >> shift) & low_bits_mask(take as u8)) as u8;

            // SAFETY: a byte was pushed above whenever the cursor sat on a
            // byte boundary, so the buffer is never empty here.
            let last = self.bytes.len() - 1;
            self.bytes[last] |= chunk << (free - take);

            self.bit_len += take;
            remaining -= take;
        }
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Consumes the writer and returns the packed bytes.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn pack(fields: &[(u64, u8)]) -> Vec<u8> {
        let mut writer = BitWriter::new();
        for &(value, width) in fields {
            writer.write_field(value, width);
        }
        writer.finish()
    }

    #[test]
    fn test_worked_example_bytes() {
        // 010 010 100 010
        let bytes = pack(&[(2, 3), (2, 3), (4, 3), (2, 3)]);
        assert_eq!(bytes, vec![0x4A, 0x20]);
    }

    #[test_case(&[(1, 1)] => vec![0b1000_0000]; "single bit padded low")]
    #[test_case(&[(0xAB, 8)] => vec![0xAB]; "aligned byte")]
    #[test_case(&[(0xABC, 12)] => vec![0xAB, 0xC0]; "twelve bits")]
    #[test_case(&[(0b1, 1), (0xFF, 8)] => vec![0xFF, 0x80]; "byte straddling boundary")]
    #[test_case(&[(0, 5), (0b111, 3)] => vec![0b0000_0111]; "zero field then ones")]
    #[test_case(&[(u64::MAX, 64)] => vec![0xFF; 8]; "full width field")]
    #[test_case(&[(1, 1), (u64::MAX, 64)] => vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x80]; "full width field after a bit")]
    #[test_case(&[(0xFF, 4)] => vec![0xF0]; "high bits of value ignored")]
    #[test_case(&[(7, 0)] => Vec::<u8>::new(); "zero width writes nothing")]
    fn test_write_field(fields: &[(u64, u8)]) -> Vec<u8> {
        pack(fields)
    }

    #[test]
    fn test_capacity_is_exact() {
        let fields = 11;
        let width = 7;
        let mut writer = BitWriter::with_capacity(fields * width as usize);
        let capacity = writer.bytes.capacity();

        for i in 0..fields {
            writer.write_field(i as u64, width);
        }

        assert_eq!(writer.bit_len(), fields * width as usize);
        assert_eq!(writer.bytes.capacity(), capacity);
        assert_eq!(writer.finish().len(), (fields * width as usize).div_ceil(8));
    }
}
