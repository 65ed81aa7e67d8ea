//! Tracing subscriber setup for the command-line tool

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr `fmt` subscriber
///
/// `RUST_LOG` takes precedence. Without it, `verbose` selects `debug` for this
/// crate and everything else stays at `warn`. Installing twice is a no-op.
pub fn init(verbose: bool) {
    let default_directive = if verbose { "warn,nim_ai=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
