//! Diagnostic tracing for the evidence CLI.
//!
//! Reports go to stdout; tracing output goes to stderr so the two never mix.
//! Loader and core diagnostics (record counts, skipped lines, computed
//! durations) are emitted at `debug`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "evidence=info",
        _ => "evidence=debug",
    }
}

/// Initialize the stderr tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the filter comes from the `-v`
/// count.
///
/// # Example
/// ```bash
/// RUST_LOG=evidence=debug evidence vte
/// evidence -vv check
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
