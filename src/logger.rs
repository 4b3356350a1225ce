//! Tracing setup for the `tarot-days` binary.
//!
//! The library only emits `tracing` events; the CLI decides where they go.
//! Reports own stdout, so diagnostics are written to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `--verbose` turns on the engine's per-action debug events. `RUST_LOG`
/// overrides either default.
pub fn init_cli_logger(verbose: bool) {
    let default_directives = if verbose {
        "tarot_days=debug,info"
    } else {
        "tarot_days=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
