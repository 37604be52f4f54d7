//! Logging initialization
//!
//! Log output goes to stderr so that table and export output on stdout stays
//! clean. `RUST_LOG` overrides the level chosen from the command line.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
///
/// Without `--verbose` only warnings (such as securities skipped in a
/// snapshot) are shown; with it, debug output from folio is enabled.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "folio=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time().with_target(false))
        .with(filter)
        .try_init();
}
