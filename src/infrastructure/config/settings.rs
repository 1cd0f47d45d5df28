//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for deployment-specific values (`PROFITCAST_DATABASE`,
//! `PROFITCAST_SHEETS_WEBHOOK_URL`).
//!
//! # Example
//!
//! ```no_run
//! use profitcast::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::forecast::ForecastConfig;
use super::logging::LoggingConfig;
use super::service::{ServerConfig, SheetsConfig, SnapshotConfig};
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`Config::database`].
pub const DATABASE_ENV: &str = "PROFITCAST_DATABASE";

/// Environment variable overriding [`SheetsConfig::webhook_url`].
pub const SHEETS_WEBHOOK_ENV: &str = "PROFITCAST_SHEETS_WEBHOOK_URL";

/// Main application configuration.
///
/// Every section is optional; an empty file yields a working local setup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path or URL of the SQLite database file.
    ///
    /// Defaults to "profitcast.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Projection model and calibration settings.
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Periodic snapshot job.
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Debounced spreadsheet sync.
    #[serde(default)]
    pub sheets: SheetsConfig,
}

fn default_database_path() -> String {
    "profitcast.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
            forecast: ForecastConfig::default(),
            snapshot: SnapshotConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content, apply environment overrides
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., confidence outside `[0, 1]`)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file when it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is malformed or invalid.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn apply_env(&mut self) {
        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.trim().is_empty() {
                self.database = database;
            }
        }
        if let Ok(url) = std::env::var(SHEETS_WEBHOOK_ENV) {
            if !url.trim().is_empty() {
                self.sheets.webhook_url = Some(url);
            }
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        self.server.socket_addr()?;
        if self.server.default_range_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_range_days",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.server.default_range_days > self.forecast.max_range_days {
            return Err(ConfigError::InvalidValue {
                field: "default_range_days",
                reason: "must not exceed max_range_days".to_string(),
            }
            .into());
        }

        self.forecast.validate()?;

        if self.snapshot.enabled {
            if self.snapshot.interval_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "interval_secs",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            if self.snapshot.lookback_days == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "lookback_days",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            if self.snapshot.lookback_days > self.forecast.max_range_days {
                return Err(ConfigError::InvalidValue {
                    field: "lookback_days",
                    reason: "must not exceed max_range_days".to_string(),
                }
                .into());
            }
            // Settled days are calibration history; periodic runs stay clear.
            if self.snapshot.lookback_days >= self.forecast.maturation_days {
                return Err(ConfigError::InvalidValue {
                    field: "lookback_days",
                    reason: "must be less than maturation_days".to_string(),
                }
                .into());
            }
        }

        if self.sheets.enabled {
            let raw = self
                .sheets
                .webhook_url
                .as_deref()
                .ok_or(ConfigError::MissingField {
                    field: "webhook_url",
                })?;
            let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
                field: "webhook_url",
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue {
                    field: "webhook_url",
                    reason: "must be an http or https URL".to_string(),
                }
                .into());
            }
            if self.sheets.debounce_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "debounce_ms",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
            if self.sheets.window_days == 0 || self.sheets.window_days > self.forecast.max_range_days
            {
                return Err(ConfigError::InvalidValue {
                    field: "window_days",
                    reason: "must be between 1 and max_range_days".to_string(),
                }
                .into());
            }
            if self.sheets.timeout_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "timeout_secs",
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}
