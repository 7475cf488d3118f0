//! Subcommands of the `reductor` binary.
//!
//! Every command reads its input through [`std::io::Read`] and writes through
//! [`std::io::Write`], the binary only decides which files or standard
//! streams to hand over.

pub mod decode;
pub mod encode;
pub mod inspect;

use std::path::PathBuf;

use reductor::Element;

use crate::config::ElementWidth;
use crate::error::Error;

/// Arguments shared by commands that read a persisted sequence.
#[derive(Debug, Clone, clap::Args)]
pub struct SequenceInput {
    /// Path of the persisted sequence.
    #[clap(short = 'i', long)]
    pub input: PathBuf,

    /// Element width of the sequence. Overrides `codec.element_width`.
    #[clap(short = 'w', long)]
    pub width: Option<ElementWidth>,
}

/// Splits text into unsigned integers. With a `delimiter`, values are
/// separated by that character and by line breaks, otherwise by any
/// whitespace or comma. Empty tokens are skipped.
pub fn parse_values(text: &str, delimiter: Option<char>) -> Result<Vec<(u64, usize)>, Error> {
    let mut values = Vec::new();

    let is_separator = |c: char| match delimiter {
        Some(delimiter) => c == delimiter,
        None => c.is_whitespace() || c == ',',
    };

    for (index, line) in text.lines().enumerate() {
        let tokens = line.split(is_separator).map(str::trim);

        for token in tokens.filter(|token| !token.is_empty()) {
            let value = token.parse::<u64>().map_err(|source| Error::ParseInt {
                token: token.to_string(),
                line: index + 1,
                source,
            })?;
            values.push((value, index + 1));
        }
    }

    Ok(values)
}

/// Converts parsed values to elements of type `T`, rejecting any that do
/// not fit.
pub fn narrow<T: Element>(values: &[(u64, usize)]) -> Result<Vec<T>, Error> {
    let max = T::MAX.to_u64();
    values
        .iter()
        .map(|&(value, line)| {
            if value > max {
                return Err(Error::ValueOutOfRange { value, line, width: T::BITS });
            }
            Ok(T::from_u64_wrapping(value))
        })
        .collect()
}

/// Settings equal to the configuration defaults.
#[cfg(test)]
pub(crate) fn default_settings() -> crate::config::Settings {
    use crate::config::{CodecConfig, InputConfig, ModeSelection, Settings};

    Settings {
        codec: CodecConfig {
            mode: ModeSelection::Auto,
            element_width: ElementWidth::W32,
        },
        input: InputConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use test_case::test_case;

    use super::*;

    fn values_only(text: &str, delimiter: Option<char>) -> Vec<u64> {
        parse_values(text, delimiter)
            .unwrap()
            .into_iter()
            .map(|(value, _)| value)
            .collect()
    }

    #[test_case("1 2 3", None => vec![1, 2, 3]; "spaces")]
    #[test_case("1,2,3", None => vec![1, 2, 3]; "commas")]
    #[test_case("1\n2\r\n3\n", None => vec![1, 2, 3]; "one per line")]
    #[test_case(" 1 ,\t2,,3 ", None => vec![1, 2, 3]; "mixed separators")]
    #[test_case("1;2; 3\n4", Some(';') => vec![1, 2, 3, 4]; "custom delimiter")]
    #[test_case("", None => Vec::<u64>::new(); "empty")]
    #[test_case("18446744073709551615", None => vec![u64::MAX]; "largest value")]
    fn test_parse_values(text: &str, delimiter: Option<char>) -> Vec<u64> {
        values_only(text, delimiter)
    }

    #[test]
    fn parse_error_reports_line() {
        let result = parse_values("1 2\n3 x4\n", None);
        assert_matches!(result, Err(Error::ParseInt { token, line: 2, .. }) if token == "x4");
    }

    #[test]
    fn negative_values_are_rejected() {
        assert_matches!(parse_values("5 -1", None), Err(Error::ParseInt { line: 1, .. }));
    }

    #[test]
    fn custom_delimiter_does_not_split_on_spaces() {
        assert_matches!(parse_values("1 2;3", Some(';')), Err(Error::ParseInt { .. }));
    }

    #[test]
    fn narrow_rejects_values_out_of_range() {
        let values = parse_values("1\n4294967296", None).unwrap();

        assert_matches!(
            narrow::<u32>(&values),
            Err(Error::ValueOutOfRange { value: 4294967296, line: 2, width: 32 })
        );
        assert_eq!(narrow::<u64>(&values).unwrap(), vec![1, 4294967296]);
    }
}
