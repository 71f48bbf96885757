//! Dashboard configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Unparsable values fall back to their
//! defaults; values that parse but are out of range are rejected.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::event_bus::DEFAULT_EVENT_BUS_CAPACITY;
use crate::domain::event_log::DEFAULT_FEED_CAPACITY;
use crate::simulator::generator::DEFAULT_CRITICAL_THRESHOLD;
use crate::simulator::view::DEFAULT_UPDATE_BUFFER;
use crate::simulator::{FeedSettings, SystemClock};

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 3_000;

/// Configuration rejected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is set but is not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    ListenAddr {
        /// Raw value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// A setting that must be positive is zero.
    #[error("{key} must be greater than zero")]
    NotPositive {
        /// Environment variable name.
        key: &'static str,
    },

    /// `FEED_CRITICAL_THRESHOLD` is outside `[0, 1]`.
    #[error("FEED_CRITICAL_THRESHOLD must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level dashboard configuration.
///
/// Loaded once at startup via [`DashboardConfig::from_env`].
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Milliseconds between simulator ticks.
    pub tick_interval_ms: u64,

    /// Maximum number of records each feed keeps.
    pub feed_capacity: usize,

    /// Draw threshold above which a generated record is critical.
    pub critical_threshold: f64,

    /// Fixed RNG seed for every feed; `None` seeds from the OS.
    pub feed_seed: Option<u64>,

    /// Capacity of each view's update channel.
    pub update_buffer: usize,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            feed_capacity: DEFAULT_FEED_CAPACITY,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            feed_seed: None,
            update_buffer: DEFAULT_UPDATE_BUFFER,
            event_bus_capacity: DEFAULT_EVENT_BUS_CAPACITY,
            log_format: LogFormat::Text,
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `LISTEN_ADDR` cannot be parsed or a
    /// feed setting is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`DashboardConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::ListenAddr { value, source })?,
            None => defaults.listen_addr,
        };

        let config = Self {
            listen_addr,
            tick_interval_ms: parse_var(&lookup, "FEED_TICK_INTERVAL_MS", defaults.tick_interval_ms),
            feed_capacity: parse_var(&lookup, "FEED_CAPACITY", defaults.feed_capacity),
            critical_threshold: parse_var(
                &lookup,
                "FEED_CRITICAL_THRESHOLD",
                defaults.critical_threshold,
            ),
            feed_seed: lookup("FEED_SEED").and_then(|v| v.parse().ok()),
            update_buffer: parse_var(&lookup, "FEED_UPDATE_BUFFER", defaults.update_buffer),
            event_bus_capacity: parse_var(
                &lookup,
                "EVENT_BUS_CAPACITY",
                defaults.event_bus_capacity,
            ),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") | Some("JSON") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks range constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("FEED_TICK_INTERVAL_MS", self.tick_interval_ms),
            ("FEED_CAPACITY", self.feed_capacity as u64),
            ("FEED_UPDATE_BUFFER", self.update_buffer as u64),
            ("EVENT_BUS_CAPACITY", self.event_bus_capacity as u64),
        ] {
            if value == 0 {
                return Err(ConfigError::NotPositive { key });
            }
        }
        if !(0.0..=1.0).contains(&self.critical_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.critical_threshold));
        }
        Ok(())
    }

    /// Returns the simulator settings every mounted view uses.
    #[must_use]
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            capacity: self.feed_capacity,
            critical_threshold: self.critical_threshold,
            seed: self.feed_seed,
            update_buffer: self.update_buffer,
            clock: Arc::new(SystemClock),
        }
    }
}

/// Looks up `key` and parses it as `T`, returning `default` on missing
/// or invalid values.
fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
