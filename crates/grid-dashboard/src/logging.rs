//! Logging initialization for `gdash`.
//!
//! Configures the `tracing` subscriber with level filtering via the `GDASH_LOG`
//! environment variable. Falls back to the configured `[logging] level` when
//! the variable is unset.
//!
//! # Usage
//!
//! ```bash
//! # Default (config level, `warn` out of the box)
//! gdash show
//!
//! # See every repair made to the saved layout
//! GDASH_LOG=debug gdash check
//!
//! # Module-specific filtering
//! GDASH_LOG=grid_dashboard::session=info,warn gdash reset
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "GDASH_LOG";

/// Builds the filter from `GDASH_LOG`, or from `fallback` when the variable
/// is unset or invalid.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber.
///
/// Output is written to stderr so that stdout stays clean for layout JSON.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (should only be
/// called once, at process startup).
pub fn init(fallback: LogLevel) {
    fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn every_config_level_is_a_valid_directive() {
        let levels = [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ];
        for level in levels {
            let filter = EnvFilter::try_new(level.as_directive());
            assert!(filter.is_ok(), "failed to parse directive: {:?}", level);
        }
    }

    #[test]
    fn env_filter_parses_module_directive() {
        let filter = EnvFilter::try_new("grid_dashboard::layout=debug,warn");
        assert!(filter.is_ok());
    }

    #[test]
    #[serial]
    fn env_var_takes_precedence_over_fallback() {
        let original = std::env::var(LOG_ENV_VAR).ok();
        std::env::set_var(LOG_ENV_VAR, "trace");
        let rendered = filter(LogLevel::Error).to_string();
        match original {
            Some(v) => std::env::set_var(LOG_ENV_VAR, v),
            None => std::env::remove_var(LOG_ENV_VAR),
        }
        assert_eq!(rendered, "trace");
    }

    #[test]
    #[serial]
    fn fallback_used_when_env_var_unset() {
        let original = std::env::var(LOG_ENV_VAR).ok();
        std::env::remove_var(LOG_ENV_VAR);
        let rendered = filter(LogLevel::Debug).to_string();
        if let Some(v) = original {
            std::env::set_var(LOG_ENV_VAR, v);
        }
        assert_eq!(rendered, "debug");
    }
}
