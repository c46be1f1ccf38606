//! Tracing subscriber set-up for binaries.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::settings::LogFormat;

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls log a warning and leave the
/// first subscriber in place.
pub fn init_tracing(format: LogFormat) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
