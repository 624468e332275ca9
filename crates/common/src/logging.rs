//! Logging and tracing initialization.

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level so operators can
/// raise verbosity without touching the config file.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        fmt()
            .with_env_filter(env_filter)
            .json()
            .try_init()
            .ok();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .try_init()
            .ok();
    }
}

/// Initialize logging at the given level, plain formatting.
///
/// Convenience for CLI entry points mapping a `--verbose` flag to a level.
pub fn init_with_level(level: &str) {
    init_logging(&LoggingConfig {
        level: level.to_string(),
        ..LoggingConfig::default()
    });
}

/// Initialize logging with defaults (useful for tests and quick scripts).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}
