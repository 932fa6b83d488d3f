//! Structured logging for the Strata camera core.
//!
//! Sets up `tracing` with console output and env-filter based control,
//! plus JSON file logging in debug builds for post-mortem analysis.
//! The camera config's `debug.log_level` can override the default filter.

use std::path::Path;

use strata_config::CameraConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter string used when neither `RUST_LOG` nor a config
/// override is present.
const DEFAULT_FILTER: &str = "info";

/// Resolve the filter string from the config's log-level override.
fn resolve_filter(config: Option<&CameraConfig>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the tracing subscriber.
///
/// Console output carries timestamps (uptime), module paths, and severity.
/// `RUST_LOG` takes precedence over the config's `debug.log_level`. In debug
/// builds, passing a `log_dir` additionally writes structured JSON to
/// `strata.log` in that directory.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&CameraConfig>) {
    let filter_str = resolve_filter(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("strata.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
