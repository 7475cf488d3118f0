//! The `inspect` command: report the metadata and footprint of a persisted
//! sequence without decoding it.

use std::fmt;
use std::io::Write;

use reductor::{CompressedSequence, Element, Mode};
use serde::Serialize;

use crate::config::{ElementWidth, Settings};
use crate::error::Error;
use crate::wire;

use super::SequenceInput;

/// Arguments of the `inspect` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InspectArgs {
    /// The persisted sequence to inspect.
    #[clap(flatten)]
    pub sequence: SequenceInput,

    /// Print the report as JSON.
    #[clap(long)]
    pub json: bool,
}

/// Metadata and footprint of a compressed sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Element width in bits.
    pub element_width: u8,
    /// The first element of the sequence.
    pub first_entry: u64,
    /// Number of elements.
    pub count: u32,
    /// Width of each delta field.
    pub bit_width: u8,
    /// Encoding mode.
    pub mode: Mode,
    /// Length of the packed delta fields.
    pub packed_len: usize,
    /// Footprint of the compressed sequence, metadata included.
    pub size_in_bytes: usize,
    /// Size of the elements stored as plain integers.
    pub uncompressed_bytes: usize,
    /// `uncompressed_bytes / size_in_bytes`.
    pub compression_ratio: f64,
}

impl Report {
    /// Builds the report for `sequence`.
    pub fn new<T: Element>(sequence: &CompressedSequence<T>) -> Self {
        let size_in_bytes = sequence.size_in_bytes();
        let uncompressed_bytes = sequence.len() * T::BYTES;

        Self {
            element_width: T::BITS,
            first_entry: sequence.first_entry().to_u64(),
            count: sequence.count(),
            bit_width: sequence.bit_width(),
            mode: sequence.mode(),
            packed_len: sequence.packed_data().len(),
            size_in_bytes,
            uncompressed_bytes,
            compression_ratio: uncompressed_bytes as f64 / size_in_bytes as f64,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "element width:  {} bits", self.element_width)?;
        writeln!(f, "first entry:    {}", self.first_entry)?;
        writeln!(f, "count:          {}", self.count)?;
        writeln!(f, "bit width:      {}", self.bit_width)?;
        writeln!(f, "mode:           {}", self.mode)?;
        writeln!(f, "packed data:    {} bytes", self.packed_len)?;
        writeln!(f, "footprint:      {} bytes", self.size_in_bytes)?;
        writeln!(f, "uncompressed:   {} bytes", self.uncompressed_bytes)?;
        write!(f, "ratio:          {:.2}", self.compression_ratio)
    }
}

/// Builds the report for the persisted sequence in `bytes`.
pub fn run(bytes: &[u8], width: ElementWidth) -> Result<Report, Error> {
    let report = match width {
        ElementWidth::W32 => Report::new(&wire::from_bytes::<u32>(bytes)?),
        ElementWidth::W64 => Report::new(&wire::from_bytes::<u64>(bytes)?),
    };
    Ok(report)
}

/// Runs the command against the file named in `args`, printing the report
/// to stdout.
pub fn execute(args: &InspectArgs, settings: &Settings) -> Result<Report, Error> {
    let width = args.sequence.width.unwrap_or(settings.codec.element_width);
    let bytes = std::fs::read(&args.sequence.input)?;
    let report = run(&bytes, width)?;

    let mut stdout = std::io::stdout().lock();
    match args.json {
        true => serde_json::to_writer_pretty(&mut stdout, &report)?,
        false => write!(stdout, "{report}")?,
    }
    writeln!(stdout)?;

    Ok(report)
}
