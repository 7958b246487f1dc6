//! Logging setup.
//!
//! One-line tracing initialization for binaries embedding the library:
//! compact single-line format on stderr, filter from `RUST_LOG` with a
//! caller-supplied fallback. Stderr keeps stdout free for piped image
//! output.

use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Initialize logging with an `info` default level.
pub fn init() {
    init_with_default("info");
}

/// Initialize logging, honoring `RUST_LOG` and falling back to the
/// given directive when it is unset or malformed.
///
/// Calling this more than once is harmless: the first subscriber wins.
pub fn init_with_default(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_timer(LocalTime::rfc_3339())
        .try_init();
}
