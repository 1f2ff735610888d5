//! Logging setup
//!
//! `RUST_LOG` wins over the configured filter when set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::RuntimeConfig;

/// Install the global subscriber. Returns `false` if one was already
/// installed, in which case nothing changes.
pub fn init_tracing(config: &RuntimeConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let json = config.json_logs.then(|| fmt::layer().json());
    let text = (!config.json_logs).then(fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()
        .is_ok()
}
