//! Logging System
//!
//! Structured logging via the `tracing` crate. The filter comes from the
//! `DEPSYNC_LOG` environment variable, falling back to the level the caller
//! passes in. Output goes to stderr so command output on stdout stays clean.

use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "DEPSYNC_LOG";

/// Initialize the logging system.
///
/// Call once per process; the binary does so before executing a command.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(std::io::stderr),
        )
        .init();
}
