//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter applied when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    format!("stack_bridge={level},tower_http={level}")
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is a no-op.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
