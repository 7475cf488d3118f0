//! Persisted layout of a compressed sequence.
//!
//! A sequence is stored as a fixed size big-endian header followed by the
//! packed delta fields:
//!
//! ```text
//! +-------------+-------+-----------+------+-------------+
//! | first_entry | count | bit_width | mode | packed_data |
//! | 4 or 8      | 4     | 1         | 1    | rest        |
//! +-------------+-------+-----------+------+-------------+
//! ```
//!
//! The layout does not record the element width, so the reader has to be
//! told which one to expect.

use std::io::Write;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use reductor::codec::{BIT_WIDTH_SIZE, COUNT_SIZE, MODE_SIZE};
use reductor::{CompressedSequence, Element, Mode};

use crate::error::Error;

/// Size of the header preceding the packed data for elements of type `T`.
pub fn header_len<T: Element>() -> usize {
    T::BYTES + COUNT_SIZE + BIT_WIDTH_SIZE + MODE_SIZE
}

/// Writes `sequence` in the persisted layout.
pub fn write_sequence<T, W>(writer: &mut W, sequence: &CompressedSequence<T>) -> Result<(), Error>
where
    T: Element,
    W: Write,
{
    writer.write_uint::<BigEndian>(sequence.first_entry().to_u64(), T::BYTES)?;
    writer.write_u32::<BigEndian>(sequence.count())?;
    writer.write_u8(sequence.bit_width())?;
    writer.write_u8(sequence.mode().as_u8())?;
    writer.write_all(sequence.packed_data())?;
    Ok(())
}

/// Serializes `sequence` into a new buffer.
pub fn to_bytes<T: Element>(sequence: &CompressedSequence<T>) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::with_capacity(header_len::<T>() + sequence.packed_data().len());
    write_sequence(&mut bytes, sequence)?;
    Ok(bytes)
}

/// Reads a sequence of `T` from its persisted layout. Everything after the
/// header is taken as the packed data, and the parts are validated before a
/// value is returned.
pub fn from_bytes<T: Element>(bytes: &[u8]) -> Result<CompressedSequence<T>, Error> {
    let expected = header_len::<T>();
    if bytes.len() < expected {
        return Err(Error::Truncated { expected, actual: bytes.len() });
    }

    let mut cursor = bytes;
    let first_entry = cursor.read_uint::<BigEndian>(T::BYTES)?;
    let count = cursor.read_u32::<BigEndian>()?;
    let bit_width = cursor.read_u8()?;
    let mode = Mode::try_from(cursor.read_u8()?)?;

    let sequence = CompressedSequence::from_parts(
        T::from_u64_wrapping(first_entry),
        count,
        bit_width,
        mode,
        cursor.to_vec(),
    )?;

    tracing::trace!(%sequence, "read persisted sequence");
    Ok(sequence)
}
