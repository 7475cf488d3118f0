use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use reductor_cli::commands::decode;
use reductor_cli::commands::encode;
use reductor_cli::commands::encode::EncodeArgs;
use reductor_cli::commands::inspect;
use reductor_cli::commands::inspect::InspectArgs;
use reductor_cli::commands::SequenceInput;
use reductor_cli::config::Settings;
use reductor_cli::logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Command line arguments for reductor.
#[derive(Debug, Parser)]
#[clap(name = "reductor", version, about = "Delta-compressed postings lists")]
struct ReductorArgs {
    /// Optional path to the configuration file. If not provided, defaults
    /// apply unless overridden by environment variables.
    #[clap(short = 'c', long, required = false)]
    config: Option<PathBuf>,

    #[clap(long = "output-format", default_value = "pretty")]
    output_format: Option<LogOutputFormat>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress a text list of integers into a persisted sequence.
    Encode(EncodeArgs),
    /// Print the integers of a persisted sequence, one per line.
    Decode(SequenceInput),
    /// Report the metadata and footprint of a persisted sequence.
    Inspect(InspectArgs),
}

#[tracing::instrument(name = "reductor")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse the command line arguments.
    let args = ReductorArgs::parse();

    // Configure the binary's stderr output based on the provided output format.
    let pretty = matches!(args.output_format, Some(LogOutputFormat::Pretty));
    logging::setup_logging(logging::DEFAULT_DIRECTIVES, pretty);

    // Load the configuration file and/or environment variables.
    let settings = Settings::new(args.config.as_ref()).inspect_err(|error| {
        tracing::error!(%error, "failed to construct the configuration");
    })?;
    tracing::debug!(?settings, "loaded configuration");

    let result = match &args.command {
        Command::Encode(encode_args) => encode::execute(encode_args, &settings).map(|_| ()),
        Command::Decode(input) => decode::execute(input, &settings).map(|_| ()),
        Command::Inspect(inspect_args) => inspect::execute(inspect_args, &settings).map(|_| ()),
    };

    if let Err(error) = &result {
        tracing::error!(%error, "command failed");
    }
    Ok(result?)
}
