//! Element types that can be stored in a compressed sequence.

use std::fmt::{Debug, Display};

mod sealed {
    pub trait Sealed {}

    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned integer type that a postings list can be made of.
///
/// The codec does all delta arithmetic in the `u64` domain and narrows back
/// to the element type on output, so the trait only needs to describe the
/// element's width and how to move between the two domains. It is sealed:
/// the codec is implemented for `u32` and `u64` only.
pub trait Element:
    Copy + Ord + Default + Debug + Display + Send + Sync + 'static + sealed::Sealed
{
    /// Number of bits in the element.
    const BITS: u8;

    /// Number of bytes the element occupies when stored verbatim.
    const BYTES: usize;

    /// Largest representable element.
    const MAX: Self;

    /// Widens the element to a `u64` without loss.
    fn to_u64(self) -> u64;

    /// Narrows a `u64` to the element type, keeping the low-order bits.
    ///
    /// Narrowing is modular so that wrapping arithmetic carried out in the
    /// `u64` domain gives the same result as wrapping arithmetic carried out
    /// in the element's own domain.
    fn from_u64_wrapping(value: u64) -> Self;
}

impl Element for u32 {
    const BITS: u8 = 32;
    const BYTES: usize = 4;
    const MAX: Self = u32::MAX;

    fn to_u64(self) -> u64 {
        self as u64
    }

    fn from_u64_wrapping(value: u64) -> Self {
        value as u32
    }
}

impl Element for u64 {
    const BITS: u8 = 64;
    const BYTES: usize = 8;
    const MAX: Self = u64::MAX;

    fn to_u64(self) -> u64 {
        self
    }

    fn from_u64_wrapping(value: u64) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn widths_match_primitive_sizes() {
        assert_eq!(<u32 as Element>::BYTES, std::mem::size_of::<u32>());
        assert_eq!(<u64 as Element>::BYTES, std::mem::size_of::<u64>());
        assert_eq!(<u32 as Element>::BITS as u32, u32::BITS);
        assert_eq!(<u64 as Element>::BITS as u32, u64::BITS);
    }

    #[test_case(0 => 0; "zero")]
    #[test_case(u32::MAX as u64 => u32::MAX; "largest u32")]
    #[test_case(u32::MAX as u64 + 1 => 0; "wraps past u32")]
    #[test_case(u64::MAX => u32::MAX; "keeps low bits")]
    fn narrowing_to_u32_is_modular(value: u64) -> u32 {
        u32::from_u64_wrapping(value)
    }

    #[test]
    fn wrapping_in_u64_matches_wrapping_in_u32() {
        let prev: u32 = 3;
        let wrapped = u32::from_u64_wrapping(prev.to_u64().wrapping_sub(5));
        assert_eq!(wrapped, prev.wrapping_sub(5));
    }
}
