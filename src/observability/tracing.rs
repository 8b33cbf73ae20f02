//! `tracing-subscriber` setup for the CLI.
//!
//! Logs go to stderr so they never mix with rendered output on stdout.
//! `RUST_LOG` wins over the `-v` count when set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Directive for `-v` repetitions: warnings by default, then info, debug, trace.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!("cimport={}", level_for_verbosity(verbosity))),
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(verbosity: u8) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_filter(verbosity))
        .with(layer)
        .try_init();
}
