//! Tracing subscriber setup for the bot binary.
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `info`), either as
//! human-readable lines or as JSON objects for log shippers.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::BeardError;

const DEFAULT_FILTER: &str = "info";

/// Builds the filter from `RUST_LOG`, falling back to `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns [`BeardError::Logging`] when a global subscriber is already set.
pub fn init_tracing(json: bool) -> Result<(), BeardError> {
    let registry = tracing_subscriber::registry().with(env_filter());

    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|error| BeardError::Logging {
        message: error.to_string(),
    })
}
