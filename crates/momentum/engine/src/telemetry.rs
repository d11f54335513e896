//! Tracing bootstrap for hosts embedding the engine.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::settings::LoggingConfig;

/// Install a global subscriber filtered by `RUST_LOG`, falling back to the
/// configured level.
///
/// Returns an error instead of panicking when a subscriber is already set.
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), TryInitError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    }
}
