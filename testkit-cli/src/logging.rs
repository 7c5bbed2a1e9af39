//! Logging setup for the CLI.
//!
//! Controlled by environment variables:
//!
//! - `TESTKIT_DEBUG=true|1|yes` - Enable debug logging
//! - `TESTKIT_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific log level
//! - `TESTKIT_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! Logs go to stderr so `check --format json` and `export` keep a clean stdout.

use std::env;
use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `TESTKIT_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    parse_debug(env::var("TESTKIT_DEBUG").ok().as_deref())
}

/// Get the configured log level from `TESTKIT_LOG_LEVEL`.
///
/// Defaults to "debug" if `TESTKIT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    parse_log_level(
        env::var("TESTKIT_LOG_LEVEL").ok().as_deref(),
        is_debug_enabled(),
    )
}

/// Get the configured log format from `TESTKIT_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    parse_log_format(env::var("TESTKIT_LOG_FORMAT").ok().as_deref())
}

fn parse_debug(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
}

fn parse_log_level(value: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };

    match value.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn parse_log_format(value: Option<&str>) -> &'static str {
    match value.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Whether a subscriber should be installed at all.
fn should_init(debug: Option<&str>, level: Option<&str>) -> bool {
    parse_debug(debug) || level.is_some()
}

/// Initialize logging. Subsequent calls are no-ops.
///
/// Nothing is installed unless `TESTKIT_DEBUG` or `TESTKIT_LOG_LEVEL` is set.
pub fn init() {
    INIT.call_once(|| {
        if !should_init(
            env::var("TESTKIT_DEBUG").ok().as_deref(),
            env::var("TESTKIT_LOG_LEVEL").ok().as_deref(),
        ) {
            return;
        }

        let level = get_log_level();
        let filter = EnvFilter::try_new(format!(
            "testkit_env={},testkit_cli={},testkit={}",
            level, level, level
        ))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

        match get_log_format() {
            "json" => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty().with_writer(std::io::stderr))
                    .init();
            }
        }

        tracing::info!(
            level = level,
            format = get_log_format(),
            "testkit logging initialized"
        );
    });
}
