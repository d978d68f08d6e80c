// crates/cli/src/logging.rs
use crate::options::LogLevel;
use std::io;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Records emitted by the engine through `log` are forwarded by the
/// subscriber's `tracing-log` bridge.
pub fn init_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("logging already initialised: {e}");
    }
}
