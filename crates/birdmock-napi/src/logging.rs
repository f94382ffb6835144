//! Log output for the native harness.

use napi_derive::napi;

const DEFAULT_FILTER: &str = "birdmock_core=warn";

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins over `filter`; `filter` wins over the built-in default.
/// Returns `false` if a subscriber was already installed.
#[napi]
pub fn init_logging(filter: Option<String>) -> bool {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        filter
            .as_deref()
            .unwrap_or(DEFAULT_FILTER)
            .into()
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
