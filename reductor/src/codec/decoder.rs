//! Decoding of [`CompressedSequence`] values back into raw sequences.
//!
//! Decoding replays the packed fields with a [`BitReader`] and rebuilds the
//! elements with a running sum seeded by the first entry. Arithmetic wraps
//! in the element's domain, which reproduces the input exactly for any value
//! built by the encoders and keeps decoding total for every value that
//! passes [`CompressedSequence::from_parts`].

use std::iter::FusedIterator;

use crate::bits::{BitReader, SIGN_BIT_WIDTH};
use crate::element::Element;

use super::{CompressedSequence, Mode};

/// Decoding methods.
impl<T: Element> CompressedSequence<T> {
    /// Decodes the whole sequence.
    ///
    /// An empty (default) sequence decodes to an empty vector and a single
    /// element sequence decodes to its first entry without touching the
    /// packed buffer.
    pub fn decode(&self) -> Vec<T> {
        let values: Vec<T> = self.iter().collect();
        debug_assert_eq!(values.len(), self.len(), "decoded element count mismatch");

        tracing::trace!(count = values.len(), mode = %self.mode, "decoded sequence");
        values
    }

    /// Returns an iterator that decodes the sequence lazily, one element at
    /// a time.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            reader: BitReader::new(&self.packed_data),
            mode: self.mode,
            bit_width: self.bit_width,
            first_entry: self.first_entry,
            previous: None,
            remaining: self.len(),
        }
    }
}

impl<'a, T: Element> IntoIterator for &'a CompressedSequence<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazily decoding iterator over the elements of a [`CompressedSequence`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T: Element> {
    reader: BitReader<'a>,
    mode: Mode,
    bit_width: u8,
    first_entry: T,

    /// The last element yielded, `None` until the first entry is yielded.
    previous: Option<T>,

    /// Number of elements still to be yielded.
    remaining: usize,
}

impl<T: Element> Iter<'_, T> {
    /// Reads the next field and applies it to `previous`.
    fn next_from(&mut self, previous: T) -> Option<T> {
        let previous = previous.to_u64();

        let value = match self.mode {
            Mode::Sorted => {
                let delta = self.reader.read_field(self.bit_width)?;
                previous.wrapping_add(delta)
            }
            Mode::Unsorted => {
                let negative = self.reader.read_field(SIGN_BIT_WIDTH)? == 1;
                let magnitude = self
                    .reader
                    .read_field(self.bit_width.saturating_sub(SIGN_BIT_WIDTH))?;
                if negative {
                    previous.wrapping_sub(magnitude)
                } else {
                    previous.wrapping_add(magnitude)
                }
            }
        };

        Some(T::from_u64_wrapping(value))
    }
}

impl<T: Element> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let value = match self.previous {
            None => Some(self.first_entry),
            Some(previous) => self.next_from(previous),
        };

        match value {
            Some(value) => {
                self.remaining -= 1;
                self.previous = Some(value);
                Some(value)
            }
            None => {
                // Only reachable if the buffer is shorter than the metadata
                // claims, which the constructors rule out.
                tracing::warn!(remaining = self.remaining, "packed data ended early");
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Element> ExactSizeIterator for Iter<'_, T> {}

impl<T: Element> FusedIterator for Iter<'_, T> {}
