//! Configuration management for the command line tool
use std::fmt;
use std::path::Path;

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::error::Error;

/// Prefix of the environment variables read by [`Settings::new`].
pub const ENV_PREFIX: &str = "REDUCTOR";

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Which encoder to run on the input.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelection {
    /// Use the sorted encoder when the input is non-decreasing and the
    /// unsorted encoder otherwise.
    #[default]
    Auto,
    /// Always use the sorted encoder; decreasing input is an error.
    Sorted,
    /// Always use the unsorted encoder.
    Unsorted,
}

/// Width of the integers held by a sequence.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(try_from = "u8")]
pub enum ElementWidth {
    /// `u32` elements.
    #[default]
    #[value(name = "32")]
    W32,
    /// `u64` elements.
    #[value(name = "64")]
    W64,
}

impl ElementWidth {
    /// Number of bits in one element.
    pub fn bits(&self) -> u8 {
        match self {
            ElementWidth::W32 => 32,
            ElementWidth::W64 => 64,
        }
    }
}

impl TryFrom<u8> for ElementWidth {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            32 => Ok(ElementWidth::W32),
            64 => Ok(ElementWidth::W64),
            _ => Err(Error::UnsupportedWidth(bits)),
        }
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// Top-level configuration for the command line tool
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// Codec configuration
    pub codec: CodecConfig,
    /// Text input configuration
    #[serde(default)]
    pub input: InputConfig,
}

/// Settings that choose how sequences are encoded.
#[derive(Deserialize, Clone, Debug)]
pub struct CodecConfig {
    /// The encoder to use.
    pub mode: ModeSelection,
    /// The element width of the sequences.
    pub element_width: ElementWidth,
}

/// Settings for reading integers from text.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct InputConfig {
    /// Character separating values. When unset, any whitespace or comma
    /// separates values.
    pub delimiter: Option<char>,
}

impl Validatable for InputConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(delimiter) = self.delimiter {
            if delimiter.is_ascii_digit() {
                return Err(ConfigError::Message(format!(
                    "[input] Delimiter cannot be a digit, got '{delimiter}'"
                )));
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Initializing the config first with default values, then with the
    /// optional config file, then with environment variables.
    ///
    /// The environment variables are prefixed with `REDUCTOR_` and the nested
    /// fields are separated with double underscores. For example, the path
    /// `codec.element_width` is set with:
    ///
    /// ```text
    /// REDUCTOR_CODEC__ELEMENT_WIDTH
    /// ^^^^^^^^ ^^^^^  ^^^^^^^^^^^^^
    ///     │   ^  │ ^^      └ The `element_width` field of the `codec` object
    ///     │   │  │ └ separator("__")
    ///     │   │  └ The `codec` field of the root object (`Settings`)
    ///     │   └ prefix_separator("_")
    ///     └ with_prefix("REDUCTOR")
    /// ```
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let mut cfg_builder = Self::defaults()?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(Self::environment());

        Self::from_builder(cfg_builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("codec.mode", "auto")?
            .set_default("codec.element_width", 32)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .prefix_separator("_")
    }

    fn from_builder(cfg_builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = cfg_builder.build()?.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.input.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use config::FileFormat;
    use test_case::test_case;

    use super::*;

    fn from_toml(toml: &str) -> Result<Settings, ConfigError> {
        let builder = Settings::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml));
        Settings::from_builder(builder)
    }

    fn from_env(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        let builder = Settings::defaults()
            .unwrap()
            .add_source(Settings::environment().source(Some(vars)));
        Settings::from_builder(builder)
    }

    #[test]
    fn defaults_load_without_sources() {
        let settings = from_toml("").expect("defaults should be valid");

        assert_eq!(settings.codec.mode, ModeSelection::Auto);
        assert_eq!(settings.codec.element_width, ElementWidth::W32);
        assert_eq!(settings.input.delimiter, None);
    }

    #[test]
    fn toml_overrides_defaults() {
        let toml = r#"
            [codec]
            mode = "unsorted"
            element_width = 64

            [input]
            delimiter = ";"
        "#;
        let settings = from_toml(toml).unwrap();

        assert_eq!(settings.codec.mode, ModeSelection::Unsorted);
        assert_eq!(settings.codec.element_width, ElementWidth::W64);
        assert_eq!(settings.input.delimiter, Some(';'));
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = from_env(&[
            ("REDUCTOR_CODEC__MODE", "sorted"),
            ("REDUCTOR_CODEC__ELEMENT_WIDTH", "64"),
        ])
        .unwrap();

        assert_eq!(settings.codec.mode, ModeSelection::Sorted);
        assert_eq!(settings.codec.element_width, ElementWidth::W64);
    }

    #[test]
    fn unprefixed_environment_is_ignored() {
        let settings = from_env(&[("CODEC__MODE", "sorted")]).unwrap();
        assert_eq!(settings.codec.mode, ModeSelection::Auto);
    }

    #[test_case("[codec]\nelement_width = 16"; "unsupported width")]
    #[test_case("[codec]\nmode = \"shuffled\""; "unknown mode")]
    #[test_case("[input]\ndelimiter = \"7\""; "digit delimiter")]
    #[test_case("[input]\ndelimiter = \"ab\""; "multi character delimiter")]
    fn invalid_values_are_rejected(toml: &str) {
        assert!(from_toml(toml).is_err());
    }

    #[test]
    fn digit_delimiter_reports_message() {
        let error = from_toml("[input]\ndelimiter = \"0\"").unwrap_err();
        assert_matches!(error, ConfigError::Message(msg) if msg.contains("Delimiter"));
    }

    #[test_case(32 => matches Ok(ElementWidth::W32); "thirty two")]
    #[test_case(64 => matches Ok(ElementWidth::W64); "sixty four")]
    #[test_case(8 => matches Err(Error::UnsupportedWidth(8)); "eight")]
    fn element_width_from_bits(bits: u8) -> Result<ElementWidth, Error> {
        ElementWidth::try_from(bits)
    }
}
