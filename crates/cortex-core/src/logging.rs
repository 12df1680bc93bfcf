//! Logging bootstrap — installs a `tracing` subscriber driven by the
//! resolved configuration.

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Initialize the global tracing subscriber from the resolved config.
///
/// `log_level` selects the base filter; `debug = true` raises it to at
/// least `debug`. Called once by the embedding application after
/// `load_config`; repeated calls are no-ops.
pub fn init(config: &AppConfig) {
    let directive = filter_directive(config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Translate the configured level and debug flag into a filter directive.
///
/// `log_level` is not validated against a closed set; an unrecognized value
/// falls back to `info` at subscriber construction.
fn filter_directive(config: &AppConfig) -> String {
    let level = config.log_level.to_lowercase();
    if config.debug && !matches!(level.as_str(), "trace" | "debug") {
        "debug".to_string()
    } else {
        level
    }
}
