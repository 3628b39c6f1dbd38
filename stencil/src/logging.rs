//! Diagnostic logging for the command-line front end.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter (e.g. `STENCIL_LOG=debug`).
pub const LOG_ENV: &str = "STENCIL_LOG";

/// Install a stderr subscriber filtered by [`LOG_ENV`], defaulting to `warn`.
///
/// Stdout is reserved for rendered output, so logs never go there.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();
}
