//! This module sets up logging for the command line tool using
//! `tracing_subscriber`, in either JSON or pretty format.
//!
//! Log lines go to stderr so that they never mix with decoded values
//! printed on stdout.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter directives, used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVES: &str = "info,reductor=debug";

/// Sets up logging based on the provided format preference
///
/// # Arguments
///
/// * `directives` - Filter directives used when `RUST_LOG` is unset or invalid
/// * `pretty` - Whether to log in a human readable format instead of JSON
pub fn setup_logging(directives: &str, pretty: bool) {
    match pretty {
        true => setup_logging_pretty(directives),
        false => setup_logging_json(directives),
    }
}

fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

fn setup_logging_json(directives: &str) {
    let main_layer = tracing_subscriber::fmt::layer()
        .json()
        .flatten_event(true)
        .with_target(false)
        .with_current_span(true)
        .with_span_list(true)
        .with_line_number(true)
        .with_file(true)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(main_layer)
        .init()
}

fn setup_logging_pretty(directives: &str) {
    let main_layer = tracing_subscriber::fmt::layer()
        .pretty()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(main_layer)
        .init()
}
