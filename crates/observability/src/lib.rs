//! Process-wide tracing setup for oxcart binaries.
//!
//! Library crates only emit events through `tracing`; installing a
//! subscriber is the binary's job, done once at startup via [`init`].

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Emits JSON lines with timestamps, filtered by `RUST_LOG` and
/// defaulting to `info`. Safe to call more than once; only the first
/// call installs a subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
