//! Service configuration for the HTTP server, snapshot job and sheet sync.

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use crate::application::snapshot::SnapshotScheduleConfig;
use crate::application::sync::SheetSyncConfig;
use crate::error::{ConfigError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Days covered when a query omits `from`/`to`.
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,
}

fn default_bind() -> String {
    "127.0.0.1:8080".into()
}

const fn default_range_days() -> u32 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            default_range_days: default_range_days(),
        }
    }
}

impl ServerConfig {
    /// # Errors
    /// Returns a config error when `bind` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                field: "bind",
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Periodic snapshot job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between runs (default: 3600).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Trailing days re-snapshotted each run, ending yesterday.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

const fn default_true() -> bool {
    true
}

const fn default_interval_secs() -> u64 {
    3600
}

const fn default_lookback_days() -> u32 {
    7
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_secs: default_interval_secs(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl SnapshotConfig {
    #[must_use]
    pub fn schedule(&self) -> SnapshotScheduleConfig {
        SnapshotScheduleConfig {
            interval: Duration::from_secs(self.interval_secs),
            lookback_days: self.lookback_days,
        }
    }
}

/// Spreadsheet sync configuration.
///
/// `webhook_url` may be supplied by `PROFITCAST_SHEETS_WEBHOOK_URL` instead of
/// the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Quiet period before a push (default: 2500ms).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Trailing days pushed, ending today.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Per-request timeout for the webhook call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_debounce_ms() -> u64 {
    2500
}

const fn default_window_days() -> u32 {
    31
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            webhook_url: None,
            debounce_ms: default_debounce_ms(),
            window_days: default_window_days(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SheetsConfig {
    #[must_use]
    pub fn sync(&self) -> SheetSyncConfig {
        SheetSyncConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            window_days: self.window_days,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
