//! The `encode` command: text in, persisted sequence out.

use std::io::Read;
use std::io::Write;
use std::path::PathBuf;

use reductor::{CompressedSequence, Element, Mode};

use crate::config::{ElementWidth, ModeSelection, Settings};
use crate::error::Error;
use crate::wire;

use super::{narrow, parse_values};

/// Arguments of the `encode` command.
#[derive(Debug, Clone, clap::Args)]
pub struct EncodeArgs {
    /// Text file of unsigned integers. Reads standard input when omitted.
    #[clap(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Path the persisted sequence is written to.
    #[clap(short = 'o', long)]
    pub output: PathBuf,

    /// Encoder to use. Overrides `codec.mode`.
    #[clap(short = 'm', long)]
    pub mode: Option<ModeSelection>,

    /// Element width of the sequence. Overrides `codec.element_width`.
    #[clap(short = 'w', long)]
    pub width: Option<ElementWidth>,
}

/// Outcome of an encode, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Number of elements encoded.
    pub count: u32,
    /// Mode the sequence was encoded with.
    pub mode: Mode,
    /// Width of each delta field.
    pub bit_width: u8,
    /// Bytes written.
    pub size_in_bytes: usize,
}

/// Parses integers from `input`, encodes them and writes the persisted
/// sequence to `output`.
pub fn run<R, W>(
    input: &mut R,
    output: &mut W,
    mode: ModeSelection,
    width: ElementWidth,
    delimiter: Option<char>,
) -> Result<EncodeSummary, Error>
where
    R: Read,
    W: Write,
{
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let values = parse_values(&text, delimiter)?;

    match width {
        ElementWidth::W32 => encode_values::<u32, W>(&values, mode, output),
        ElementWidth::W64 => encode_values::<u64, W>(&values, mode, output),
    }
}

/// Resolves the command line overrides against `settings` and runs the
/// command against the files named in `args`.
pub fn execute(args: &EncodeArgs, settings: &Settings) -> Result<EncodeSummary, Error> {
    let mode = args.mode.unwrap_or(settings.codec.mode);
    let width = args.width.unwrap_or(settings.codec.element_width);
    let delimiter = settings.input.delimiter;

    // Encode fully before touching the output so a failure leaves any
    // existing file intact.
    let mut bytes = Vec::new();
    let summary = match &args.input {
        Some(path) => run(&mut std::fs::File::open(path)?, &mut bytes, mode, width, delimiter)?,
        None => run(&mut std::io::stdin().lock(), &mut bytes, mode, width, delimiter)?,
    };
    std::fs::write(&args.output, &bytes)?;

    if mode == ModeSelection::Auto && !summary.mode.is_sorted() {
        tracing::debug!("input is not sorted, used the unsorted encoder");
    }
    tracing::info!(
        output = %args.output.display(),
        count = summary.count,
        mode = %summary.mode,
        bit_width = summary.bit_width,
        size_in_bytes = summary.size_in_bytes,
        "wrote compressed sequence"
    );
    Ok(summary)
}

/// Picks the encoder for `values`. `Auto` uses the sorted encoder whenever
/// the input is non-decreasing.
pub fn resolve_mode<T: Element>(selection: ModeSelection, values: &[T]) -> Mode {
    match selection {
        ModeSelection::Sorted => Mode::Sorted,
        ModeSelection::Unsorted => Mode::Unsorted,
        ModeSelection::Auto if values.windows(2).all(|pair| pair[0] <= pair[1]) => Mode::Sorted,
        ModeSelection::Auto => Mode::Unsorted,
    }
}

fn encode_values<T, W>(
    values: &[(u64, usize)],
    selection: ModeSelection,
    output: &mut W,
) -> Result<EncodeSummary, Error>
where
    T: Element,
    W: Write,
{
    let values = narrow::<T>(values)?;
    let mode = resolve_mode(selection, &values);
    tracing::debug!(count = values.len(), %mode, "encoding parsed values");

    let sequence = match mode {
        Mode::Sorted => CompressedSequence::encode_sorted(&values)?,
        Mode::Unsorted => CompressedSequence::encode(&values)?,
    };
    wire::write_sequence(output, &sequence)?;

    Ok(EncodeSummary {
        count: sequence.count(),
        mode: sequence.mode(),
        bit_width: sequence.bit_width(),
        size_in_bytes: sequence.size_in_bytes(),
    })
}
