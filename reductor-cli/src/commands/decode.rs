//! The `decode` command: persisted sequence in, one integer per line out.

use std::io::Write;

use reductor::Element;

use crate::config::{ElementWidth, Settings};
use crate::error::Error;
use crate::wire;

use super::SequenceInput;

/// Decodes the persisted sequence in `bytes` and writes its elements to
/// `output`, one per line. Returns the number of elements written.
pub fn run<W: Write>(bytes: &[u8], width: ElementWidth, output: &mut W) -> Result<usize, Error> {
    match width {
        ElementWidth::W32 => write_values::<u32, W>(bytes, output),
        ElementWidth::W64 => write_values::<u64, W>(bytes, output),
    }
}

/// Runs the command against the file named in `args`, printing to stdout.
pub fn execute(args: &SequenceInput, settings: &Settings) -> Result<usize, Error> {
    let width = args.width.unwrap_or(settings.codec.element_width);
    let bytes = std::fs::read(&args.input)?;

    let mut stdout = std::io::BufWriter::new(std::io::stdout().lock());
    let written = run(&bytes, width, &mut stdout)?;
    stdout.flush()?;

    tracing::debug!(input = %args.input.display(), written, "decoded sequence");
    Ok(written)
}

fn write_values<T: Element, W: Write>(bytes: &[u8], output: &mut W) -> Result<usize, Error> {
    let sequence = wire::from_bytes::<T>(bytes)?;

    for value in &sequence {
        writeln!(output, "{value}")?;
    }

    Ok(sequence.len())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use reductor::testing::unsorted_postings;
    use reductor::CompressedSequence;

    use super::*;

    fn decode_to_string(bytes: &[u8], width: ElementWidth) -> Result<String, Error> {
        let mut output = Vec::new();
        run(bytes, width, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn prints_one_value_per_line() {
        let sequence = CompressedSequence::encode(&[102u32, 100, 110, 108, 104]).unwrap();
        let bytes = wire::to_bytes(&sequence).unwrap();

        let text = decode_to_string(&bytes, ElementWidth::W32).unwrap();
        assert_eq!(text, "102\n100\n110\n108\n104\n");
    }

    #[test]
    fn empty_sequence_prints_nothing() {
        let bytes = wire::to_bytes(&CompressedSequence::<u64>::default()).unwrap();
        assert_eq!(decode_to_string(&bytes, ElementWidth::W64).unwrap(), "");
    }

    #[test]
    fn random_sequence_survives_text_output() {
        let mut rng = StdRng::seed_from_u64(46);
        let values: Vec<u64> = unsorted_postings(&mut rng, 500);
        let bytes = wire::to_bytes(&CompressedSequence::encode(&values).unwrap()).unwrap();

        let text = decode_to_string(&bytes, ElementWidth::W64).unwrap();
        let parsed: Vec<u64> = text.lines().map(|line| line.parse().unwrap()).collect();
        assert_eq!(parsed, values);
    }

    #[test]
    fn wrong_width_is_detected() {
        // The 32-bit layout is shorter than a 64-bit header.
        let sequence = CompressedSequence::encode_sorted(&[100u32, 102, 104, 108, 110]).unwrap();
        let bytes = wire::to_bytes(&sequence).unwrap();

        assert_matches!(
            decode_to_string(&bytes, ElementWidth::W64),
            Err(Error::Truncated { expected: 14, actual: 12 })
        );
    }

    #[test]
    fn execute_reads_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("postings.rdc");
        let sequence = CompressedSequence::encode(&[7u32, 3, 11]).unwrap();
        std::fs::write(&path, wire::to_bytes(&sequence).unwrap()).unwrap();

        let args = SequenceInput { input: path, width: None };
        let written = execute(&args, &crate::commands::default_settings()).unwrap();
        assert_eq!(written, 3);
    }

    #[test]
    fn execute_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = SequenceInput {
            input: dir.path().join("missing.rdc"),
            width: None,
        };

        assert_matches!(
            execute(&args, &crate::commands::default_settings()),
            Err(Error::Io(_))
        );
    }
}
