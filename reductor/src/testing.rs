//! Generators of postings lists for tests.

use rand::Rng;

use crate::element::Element;

/// Generates a non-decreasing sequence of `len` elements whose consecutive
/// gaps are drawn uniformly from `0..=max_gap`. Values saturate at the
/// element's maximum instead of wrapping.
pub fn sorted_postings<T, R>(rng: &mut R, len: usize, max_gap: u64) -> Vec<T>
where
    T: Element,
    R: Rng + ?Sized,
{
    let max = T::MAX.to_u64();
    let mut current = rng.gen_range(0..=max / 2);

    (0..len)
        .map(|_| {
            let value = current;
            current = current.saturating_add(rng.gen_range(0..=max_gap)).min(max);
            T::from_u64_wrapping(value)
        })
        .collect()
}

/// Generates a sequence of `len` elements drawn uniformly from the whole
/// range of the element type, in no particular order.
pub fn unsorted_postings<T, R>(rng: &mut R, len: usize) -> Vec<T>
where
    T: Element,
    R: Rng + ?Sized,
{
    let max = T::MAX.to_u64();
    (0..len)
        .map(|_| T::from_u64_wrapping(rng.gen_range(0..=max)))
        .collect()
}
