//! Logging initialization for hosts embedding the crate.
//!
//! The crate itself only emits `tracing` events; installing a subscriber is
//! the host's choice. [`init`] offers a reasonable default for binaries and
//! examples: console output filtered via the `RUST_LOG` environment variable.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Install a console subscriber honoring `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
