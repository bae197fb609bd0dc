//! Configuration loaded from environment variables
//!
//! | Variable        | Meaning                                   | Default |
//! |-----------------|-------------------------------------------|---------|
//! | `PORT`          | Listening port                            | `80`    |
//! | `STARTUP_DELAY` | Seconds to wait before binding            | `0`     |
//! | `DELAY`         | Seconds to wait after shutdown completes  | `0`     |
//!
//! Malformed values are logged and replaced with the default instead of
//! failing startup.

use std::time::Duration;
use tracing::warn;

/// Default listening port
pub const DEFAULT_PORT: u16 = 80;

pub const PORT_VAR: &str = "PORT";
pub const STARTUP_DELAY_VAR: &str = "STARTUP_DELAY";
pub const SHUTDOWN_DELAY_VAR: &str = "DELAY";

/// Runtime configuration for the probe server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub startup_delay: Duration,
    pub shutdown_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            startup_delay: Duration::ZERO,
            shutdown_delay: Duration::ZERO,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: parse_port(lookup(PORT_VAR).as_deref()),
            startup_delay: parse_delay(STARTUP_DELAY_VAR, lookup(STARTUP_DELAY_VAR).as_deref()),
            shutdown_delay: parse_delay(SHUTDOWN_DELAY_VAR, lookup(SHUTDOWN_DELAY_VAR).as_deref()),
        }
    }
}

/// Parse `PORT`, falling back to 80 when unset, empty, zero or malformed
fn parse_port(raw: Option<&str>) -> u16 {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return DEFAULT_PORT;
    };

    match raw.parse::<u16>() {
        Ok(0) => DEFAULT_PORT,
        Ok(port) => port,
        Err(e) => {
            warn!(
                var = PORT_VAR,
                value = %raw,
                error = %e,
                default = DEFAULT_PORT,
                "Invalid port, using default"
            );
            DEFAULT_PORT
        }
    }
}

/// Parse a delay given in whole seconds
///
/// Unset or empty means no delay. Negative values mean no delay as well,
/// since sleeping for a negative duration is a no-op.
fn parse_delay(var: &str, raw: Option<&str>) -> Duration {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Duration::ZERO;
    };

    match raw.parse::<i64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs as u64),
        Ok(_) => Duration::ZERO,
        Err(e) => {
            warn!(
                var = var,
                value = %raw,
                error = %e,
                "Invalid delay in seconds, using 0"
            );
            Duration::ZERO
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
