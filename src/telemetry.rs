//! Tracing subscriber setup for the command line.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "taskpilot=info";

/// Installs a compact stderr subscriber. `RUST_LOG` wins over
/// `default_filter`. Later calls are no-ops.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    if subscriber.try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
