//! Tracing setup: structured logging with event helpers.

pub mod events;

use serif_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Initialize tracing from the observability section of the config.
///
/// `SERIF_LOG` reaches `log_filter` through the config env layer.
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing_from_config(config: &ObservabilityConfig) -> bool {
    try_init_tracing(&config.log_filter, config.json_logs)
}

/// Install a subscriber with the given filter, ignoring a second installation.
pub fn try_init_tracing(filter: &str, json: bool) -> bool {
    let filter = EnvFilter::new(filter);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.compact().try_init().is_ok()
    }
}
