//! Logging setup for the fob-mix CLI.
//!
//! Verbosity is resolved in this order:
//! 1. `--verbose`: debug level for the fob-mix crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. Default: info level for the fob-mix crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "fob_mix=debug,fob_mix_cli=debug";
const QUIET_FILTER: &str = "fob_mix=error,fob_mix_cli=error";
const DEFAULT_FILTER: &str = "fob_mix=info,fob_mix_cli=info";

/// Build the filter for the given flags.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// ```rust,no_run
/// use fob_mix_cli::logger::init_logger;
///
/// init_logger(false, false, false);
/// tracing::info!("replaying mix file");
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false) // keeps output clean
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
